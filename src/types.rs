pub use units::todo::{Energyf32, Lengthf32, Massf32, Momentumf32, RIndexf32, Weightf32};

/// Raw channel code delivered by the sensor readout.
pub type ChannelId = u64;

/// Particle identifier in the PDG Monte-Carlo numbering scheme.
pub type PdgId = i32;

/// hc, for converting between photon wavelength [nm] and energy [eV].
pub const HC_EV_NM: Energyf32 = 1239.842;

/// GeV → eV.
pub const GEV_TO_EV: Energyf32 = 1e9;
