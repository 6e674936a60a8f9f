//! Contract with the external ray-optics resolver.
//!
//! The actual geometric reconstruction of photon emission angles lives
//! outside this crate. Here it is an opaque strategy: hand it the radiator
//! histories of one trajectory and the candidate masses, get back a verdict
//! per photon and a score per (hypothesis, radiator). Implementations must
//! be deterministic for identical inputs, which is what makes the
//! aggregation layer testable against a stub.

use units::{ratio_, Angle};

use crate::history::RadiatorHistory;
use crate::types::{Massf32, Weightf32};

/// Resolver verdict for one photon candidate in one radiator history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotonEstimate {
    /// At least one mass hypothesis selected this photon for this radiator.
    pub selected: bool,
    /// Cherenkov emission angle estimate.
    pub theta: Angle,
    /// Azimuth of the photon around the track direction.
    pub phi: Angle,
}

/// Accumulated evidence for one (hypothesis, radiator) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HypothesisScore {
    pub weight: Weightf32,
    pub npe:    f32,
}

/// Output of one resolver invocation for one trajectory.
#[derive(Clone, Debug, Default)]
pub struct Resolution {
    /// `photons[r][i]` is the verdict on photon `i` of history `r`, with
    /// histories in the order they were passed in.
    pub photons: Vec<Vec<PhotonEstimate>>,
    /// `scores[h][r]` scores hypothesis `h` (mass-list order) against
    /// history `r`.
    pub scores: Vec<Vec<HypothesisScore>>,
}

pub trait CherenkovResolver {
    fn resolve(&self, histories: &[RadiatorHistory], masses: &[Massf32]) -> Resolution;
}

/// Per-photon weight entering the radiator-level angle average.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PhotonWeighting {
    /// Unweighted mean.
    #[default]
    Uniform,
    /// |sin φ|, de-emphasizing photons whose azimuth carries little angle
    /// information.
    AbsSinPhi,
}

impl PhotonWeighting {
    pub fn weight(&self, phi: Angle) -> Weightf32 {
        match self {
            PhotonWeighting::Uniform   => 1.0,
            PhotonWeighting::AbsSinPhi => ratio_(phi.sin()).abs(),
        }
    }
}
