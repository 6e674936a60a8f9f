//! Candidate optical photons and their fan-out across radiators.

use tracing::{trace, warn};

use geometry::Point;

use crate::detector::DetectorGeometry;
use crate::event::{PhotonTruth, SensorHit};
use crate::history::RadiatorHistory;
use crate::radiator::Radiator;
use crate::types::{ChannelId, RIndexf32, GEV_TO_EV};

/// A detected Cherenkov-photon candidate.
///
/// Which radiator emitted it is unknown at this stage; the truth fields are
/// populated in diagnostic mode only and stay `None` in production.
#[derive(Clone, Debug, PartialEq)]
pub struct OpticalPhoton {
    /// Position of the pixel that fired.
    pub pixel: Point,
    /// Sensor id, extracted from the raw channel code via the readout mask.
    pub sensor: ChannelId,
    /// Always true for realized detections.
    pub detected: bool,
    /// Truth vertex and momentum (diagnostic mode only).
    pub truth: Option<PhotonTruth>,
    /// Refractive index estimated at the truth vertex, when the truth photon
    /// energy falls inside the radiator's table (diagnostic mode only).
    pub vertex_rindex: Option<RIndexf32>,
}

/// Which truth-injection paths are enabled. Production keeps both off; the
/// engine nags on every event otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Copy truth vertices onto photons and estimate per-photon refractive
    /// indices from them.
    pub photon_vertex: bool,
    /// Route each photon to its truth radiator instead of fanning it out.
    pub true_radiator: bool,
}

impl Diagnostics {

    pub fn any(&self) -> bool { self.photon_vertex || self.true_radiator }

    /// Loud reminder that the output is not a measurement.
    pub fn nag(&self) {
        if self.photon_vertex { warn!("cheat mode 'photon_vertex' is enabled: truth vertices substitute for reconstruction"); }
        if self.true_radiator { warn!("cheat mode 'true_radiator' is enabled: photons are routed by truth classification"); }
    }

}

/// Turns raw sensor hits into photon candidates and distributes them over
/// the radiator histories of one trajectory.
pub struct PhotonAssociator<'g, G: DetectorGeometry> {
    geometry:    &'g G,
    mask:        ChannelId,
    diagnostics: Diagnostics,
}

impl<'g, G: DetectorGeometry> PhotonAssociator<'g, G> {

    pub fn new(geometry: &'g G, diagnostics: Diagnostics) -> Self {
        Self { geometry, mask: geometry.readout_mask(), diagnostics }
    }

    /// One candidate photon per raw hit.
    pub fn build(&self, hits: &[SensorHit]) -> Vec<OpticalPhoton> {
        hits.iter().map(|hit| {
            let pixel  = self.geometry.position_of(hit.channel);
            let sensor = hit.channel & self.mask;
            trace!("channel {:#x}: sensor {:#x}", hit.channel, sensor);
            OpticalPhoton {
                pixel,
                sensor,
                detected: true,
                truth: if self.diagnostics.any() { hit.truth } else { None },
                vertex_rindex: None,
            }
        }).collect()
    }

    /// Append a copy of every candidate photon to `history`.
    ///
    /// The radiator of origin is unknown, so every radiator history gets its
    /// own copy of the full list and the downstream optics sorts out which
    /// photon belongs where. The true-radiator diagnostic instead routes each
    /// photon only to its truth-classified radiator.
    pub fn distribute(&self, photons: &[OpticalPhoton], radiator: &Radiator, history: &mut RadiatorHistory) {
        for photon in photons {

            if self.diagnostics.true_radiator {
                let guessed = photon.truth.as_ref()
                    .and_then(|truth| self.geometry.guess_radiator(&truth.vertex));
                if guessed.as_deref() != Some(radiator.name.as_str()) { continue }
            }

            let mut copy = photon.clone();
            if self.diagnostics.photon_vertex {
                // the truth photon energy will not be exactly the simulated
                // one, but close enough for a table lookup; out-of-table
                // energies leave the field unset
                copy.vertex_rindex = photon.truth
                    .and_then(|truth| radiator.rindex.lookup(GEV_TO_EV * truth.momentum.mag()));
            }
            history.photons.push(copy);
        }
    }

}
