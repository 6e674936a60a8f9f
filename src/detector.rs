//! Interface to the detector-geometry service.
//!
//! Everything the engine needs to know about the detector arrives through
//! this boundary: which radiators exist (with their dispersion curves), how
//! to turn a raw channel code into a pixel position and a sensor id, and the
//! truth-based radiator classifier used by the diagnostic paths.

use geometry::Point;

use crate::types::{ChannelId, Energyf32, RIndexf32};

/// One radiator as described by the loaded optics geometry.
#[derive(Clone, Debug)]
pub struct RadiatorDescription {
    pub name: String,
    /// Sparse (photon energy [eV], refractive index) samples.
    pub rindex_samples: Vec<(Energyf32, RIndexf32)>,
}

/// Read-only view of the detector, established once at detector load and
/// never mutated afterwards.
pub trait DetectorGeometry {

    /// The radiators known to the optics description, in a stable order.
    fn radiators(&self) -> Vec<RadiatorDescription>;

    /// Bitmask extracting the sensor id from a raw channel code.
    fn readout_mask(&self) -> ChannelId;

    /// Spatial position of the pixel behind a raw channel code.
    fn position_of(&self, channel: ChannelId) -> Point;

    /// Truth-based classification of an emission vertex into a radiator
    /// name. Only the diagnostic (cheat) paths consult this.
    fn guess_radiator(&self, vertex: &Point) -> Option<String>;

}
