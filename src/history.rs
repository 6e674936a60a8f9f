//! Per-(trajectory, radiator) processing state.

use crate::event::TrajectoryPoint;
use crate::photons::OpticalPhoton;
use crate::radiator::RadiatorId;

/// Everything one trajectory accumulates for one radiator: its path samples
/// and its privately owned photon candidates.
///
/// A history is owned by exactly one trajectory's processing scope and is
/// dropped with it; photon records are copied in, never shared, so dropping
/// one trajectory's histories can not touch a sibling's.
#[derive(Clone, Debug, Default)]
pub struct RadiatorHistory {
    pub radiator: RadiatorId,
    /// Path samples, in path order.
    pub steps: Vec<TrajectoryPoint>,
    /// This history's own copies of the candidate photons.
    pub photons: Vec<OpticalPhoton>,
    /// Index of the source trajectory within the event; `None` marks a
    /// missing association, in which case this radiator is skipped for this
    /// trajectory only.
    pub track: Option<usize>,
}

impl RadiatorHistory {
    pub fn new(radiator: RadiatorId) -> Self {
        Self { radiator, steps: Vec::new(), photons: Vec::new(), track: None }
    }
}
