//! Configuration file parser for the identification engine.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

use units::Length;

use crate::types::{Massf32, PdgId, RIndexf32};

fn deserialize_uom_opt<'d, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'d>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    Option::<&str>::deserialize(deserializer)?
        .map(str::parse::<T>)
        .transpose()
        .map_err(de::Error::custom)
}

// TOML keys are strings, PDG ids are (possibly negative) integers.
fn deserialize_pdg_map<'d, D>(deserializer: D) -> Result<BTreeMap<PdgId, Massf32>, D::Error>
where
    D: Deserializer<'d>,
{
    BTreeMap::<String, Massf32>::deserialize(deserializer)?
        .into_iter()
        .map(|(pdg, mass)| pdg.parse::<PdgId>().map(|pdg| (pdg, mass)))
        .collect::<Result<_, _>>()
        .map_err(de::Error::custom)
}

/// Per-radiator configuration table.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RadiatorCfg {

    /// `none`, `uniform` or `gaussian`; validated at engine initialization.
    #[serde(default = "default_smearing_mode")]
    pub smearing_mode: String,

    /// Smearing magnitude [radian]; non-positive leaves smearing off.
    #[serde(default)]
    pub smearing: f32,

    pub reference_rindex: RIndexf32,

    /// Attenuation length, e.g. `"48 mm"`; absent or non-positive keeps the
    /// radiator's default attenuation.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_uom_opt")]
    pub attenuation: Option<Length>,

    /// Trajectory discretization: number of sampled points per track.
    #[serde(default = "default_zbins")]
    pub zbins: usize,

}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {

    /// Fine-binning target for the refractive-index tables.
    #[serde(default = "default_rindex_bins")]
    pub rindex_bins: usize,

    /// PDG ids to build mass hypotheses for.
    #[serde(default = "default_particle_list")]
    pub particle_list: Vec<PdgId>,

    /// Rest-mass overrides [GeV], keyed by PDG id.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_pdg_map")]
    pub masses: BTreeMap<PdgId, Massf32>,

    #[serde(default)]
    pub radiators: BTreeMap<String, RadiatorCfg>,

    /// Diagnostic only: substitute truth photon vertices for reconstructed
    /// ones.
    #[serde(default)]
    pub cheat_photon_vertex: bool,

    /// Diagnostic only: route each photon to its truth radiator instead of
    /// fanning it out over all of them.
    #[serde(default)]
    pub cheat_true_radiator: bool,

}

impl Default for Config {
    fn default() -> Self {
        Self {
            rindex_bins: default_rindex_bins(),
            particle_list: default_particle_list(),
            masses: BTreeMap::new(),
            radiators: BTreeMap::new(),
            cheat_photon_vertex: false,
            cheat_true_radiator: false,
        }
    }
}

fn default_rindex_bins  () -> usize      { 100 }
fn default_particle_list() -> Vec<PdgId> { vec![-11, 211, 321, 2212] }
fn default_smearing_mode() -> String     { "none".into() }
fn default_zbins        () -> usize      { 5 }

pub fn read_config_file(path: &Path) -> Config {
    let config: String = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Couldn't read config file `{path:?}`: {e}"));
    toml::from_str(&config)
        .unwrap_or_else(|e| panic!("Couldn't parse config file `{path:?}`: {e}"))
}
