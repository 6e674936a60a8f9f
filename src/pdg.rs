//! Particle rest masses for the configured hypothesis list.

use std::collections::BTreeMap;

use crate::types::{Massf32, PdgId};

/// Hand-curated rest masses [GeV]. A stopgap until a proper particle
/// database service exists; the `[masses]` configuration table can override
/// or extend these.
const CURATED_MASSES: [(PdgId, Massf32); 4] = [
    ( -11, 0.000510999), // e+
    ( 211, 0.13957    ), // pi+
    ( 321, 0.493677   ), // K+
    (2212, 0.938272   ), // p
];

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum PdgError {
    #[error("unknown PDG id {0} in mass table")]
    UnknownParticle(PdgId),
}

/// Read-only PDG id → rest mass mapping, fixed for the whole run.
#[derive(Clone, Debug, PartialEq)]
pub struct PdgMassTable {
    masses: BTreeMap<PdgId, Massf32>,
}

impl Default for PdgMassTable {
    fn default() -> Self { Self::curated() }
}

impl PdgMassTable {

    /// Just the hand-curated set.
    pub fn curated() -> Self {
        Self { masses: CURATED_MASSES.into_iter().collect() }
    }

    /// The curated set overlaid with configuration-supplied masses.
    pub fn with_overrides(overrides: &BTreeMap<PdgId, Massf32>) -> Self {
        let mut table = Self::curated();
        for (&pdg, &mass) in overrides {
            table.masses.insert(pdg, mass);
        }
        table
    }

    pub fn mass(&self, pdg: PdgId) -> Result<Massf32, PdgError> {
        self.masses.get(&pdg).copied().ok_or(PdgError::UnknownParticle(pdg))
    }

    pub fn len(&self) -> usize { self.masses.len() }
    pub fn is_empty(&self) -> bool { self.masses.is_empty() }

}
