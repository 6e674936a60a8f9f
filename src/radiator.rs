//! The radiator registry: per-run, read-only description of each Cherenkov
//! radiator participating in identification.
//!
//! Radiator names are resolved once, at initialization, into stable integer
//! ids; event-time code only ever deals in those ids and in registry slots,
//! never in string keys.

use tracing::{debug, error};

use units::uom::ConstZero;
use units::{radian, Angle, Length};

use crate::config::{Config, RadiatorCfg};
use crate::detector::RadiatorDescription;
use crate::rindex::RIndexCurve;
use crate::types::RIndexf32;

/// Stable small-integer radiator identifier, fixed for the whole run.
pub type RadiatorId = usize;

/// Name ↔ id pairs for the radiators this detector knows how to identify
/// particles with.
const RADIATOR_IDS: [(&str, RadiatorId); 2] = [
    ("Aerogel", 0),
    ("Gas",     1),
];

/// Present in the optics description for simulation purposes only; never
/// participates in identification.
pub const FILTER_RADIATOR: &str = "Filter";

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum RadiatorError {
    #[error("unknown radiator '{0}'")]
    UnknownName(String),
    #[error("unknown radiator id {0}")]
    UnknownId(RadiatorId),
}

pub fn radiator_id(name: &str) -> Result<RadiatorId, RadiatorError> {
    RADIATOR_IDS.iter()
        .find(|&&(n, _)| n == name)
        .map(|&(_, id)| id)
        .ok_or_else(|| RadiatorError::UnknownName(name.into()))
}

pub fn radiator_name(id: RadiatorId) -> Result<&'static str, RadiatorError> {
    RADIATOR_IDS.iter()
        .find(|&&(_, i)| i == id)
        .map(|&(n, _)| n)
        .ok_or(RadiatorError::UnknownId(id))
}

/// Cherenkov-angle smearing applied downstream by the optics. `Off` unless
/// configured with a recognized mode and a positive magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smearing {
    Off,
    Uniform (Angle),
    Gaussian(Angle),
}

#[derive(Clone, Debug)]
pub struct Radiator {
    pub id:   RadiatorId,
    pub name: String,
    /// Finely rebinned at construction; immutable for the rest of the run.
    pub rindex: RIndexCurve,
    pub reference_rindex: RIndexf32,
    pub attenuation: Option<Length>,
    pub smearing: Smearing,
    pub trajectory_bins: usize,
}

impl Radiator {

    fn apply(&mut self, cfg: &RadiatorCfg) {
        self.reference_rindex = cfg.reference_rindex;
        if let Some(attenuation) = cfg.attenuation {
            if attenuation > Length::ZERO { self.attenuation = Some(attenuation) }
        }
        if cfg.smearing > 0.0 {
            match cfg.smearing_mode.as_str() {
                "none"     => {}
                "uniform"  => self.smearing = Smearing::Uniform (radian(cfg.smearing)),
                "gaussian" => self.smearing = Smearing::Gaussian(radian(cfg.smearing)),
                other      => error!("unknown smearing mode '{other}' for {} radiator", self.name),
            }
        }
        self.trajectory_bins = cfg.zbins.saturating_sub(1);
    }

}

/// All PID radiators, resolved from the optics description and configured
/// once at initialization.
#[derive(Clone, Debug, Default)]
pub struct RadiatorRegistry {
    radiators: Vec<Radiator>,
}

impl RadiatorRegistry {

    /// Build the registry from the geometry's radiator descriptions,
    /// rebinning each dispersion curve onto `cfg.rindex_bins` bins and
    /// propagating the per-radiator configuration. The `"Filter"` radiator
    /// is dropped unconditionally; a configured radiator missing from the
    /// geometry (or vice versa) is logged and processing continues without
    /// it.
    pub fn new(descriptions: &[RadiatorDescription], cfg: &Config) -> Result<Self, RadiatorError> {
        let mut radiators = Vec::new();

        for desc in descriptions {
            if desc.name == FILTER_RADIATOR { continue }
            let id = radiator_id(&desc.name)?;

            debug!("rebinning refractive index table for '{}' to {} bins", desc.name, cfg.rindex_bins);
            let rindex = RIndexCurve::new(desc.rindex_samples.clone()).rebin(cfg.rindex_bins);
            if rindex.is_empty() {
                debug!("refractive index table for '{}' cannot be rebinned \
                        ({} samples, {} bins requested)",
                       desc.name, desc.rindex_samples.len(), cfg.rindex_bins);
            }

            let mut radiator = Radiator {
                id,
                name: desc.name.clone(),
                rindex,
                reference_rindex: 1.0,
                attenuation: None,
                smearing: Smearing::Off,
                trajectory_bins: 0,
            };
            match cfg.radiators.get(&desc.name) {
                Some(radiator_cfg) => radiator.apply(radiator_cfg),
                None => error!("cannot find radiator '{}' in the configuration", desc.name),
            }
            radiators.push(radiator);
        }

        // the reverse mismatch: configured radiators the geometry never heard of
        for name in cfg.radiators.keys() {
            if name != FILTER_RADIATOR && !radiators.iter().any(|r| &r.name == name) {
                error!("configured radiator '{name}' has no geometry counterpart; dropped");
            }
        }

        radiators.sort_by_key(|r| r.id);
        Ok(Self { radiators })
    }

    pub fn len     (&self) -> usize { self.radiators.len() }
    pub fn is_empty(&self) -> bool  { self.radiators.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Radiator> { self.radiators.iter() }

    pub fn get(&self, id: RadiatorId) -> Result<&Radiator, RadiatorError> {
        self.radiators.iter()
            .find(|r| r.id == id)
            .ok_or(RadiatorError::UnknownId(id))
    }

    pub fn by_name(&self, name: &str) -> Option<&Radiator> {
        self.radiators.iter().find(|r| r.name == name)
    }

}
