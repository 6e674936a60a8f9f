//! Output records and the per-radiator reduction that fills them.

use units::uom::ConstZero;
use units::Angle;

use crate::photons::OpticalPhoton;
use crate::radiator::RadiatorId;
use crate::resolver::{PhotonEstimate, PhotonWeighting};
use crate::types::{Lengthf32, PdgId, RIndexf32, Weightf32, GEV_TO_EV, HC_EV_NM};

/// Score of one mass hypothesis for one (trajectory, radiator) pair. Zero
/// weight and NPE are stated explicitly, never encoded by omission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PdgHypothesis {
    pub pdg:    PdgId,
    pub weight: Weightf32,
    pub npe:    f32,
}

/// One identified (trajectory, radiator) pair. Immutable once built.
#[derive(Clone, Debug)]
pub struct PidRecord {
    pub radiator: RadiatorId,
    /// Number of photons entering the angle estimate.
    pub npe: u32,
    /// Weighted-mean Cherenkov angle; exactly zero when no photon was
    /// selected.
    pub theta: Angle,
    /// Mean refractive index at the photon vertices; diagnostic mode only,
    /// zero otherwise.
    pub rindex: RIndexf32,
    /// Mean photon wavelength [nm]; diagnostic mode only, zero otherwise.
    pub wavelength: Lengthf32,
    /// (angle, azimuth) of every contributing photon, in history order.
    pub theta_phi: Vec<(Angle, Angle)>,
    /// One entry per configured hypothesis, in configuration order.
    pub hypotheses: Vec<PdgHypothesis>,
    /// Index of the source trajectory within the event.
    pub track: usize,
}

/// Folds the resolver's verdicts on one radiator's photons into the angle
/// statistics of a `PidRecord`.
#[derive(Clone, Debug)]
pub struct AngleAccumulator {
    npe:            u32,
    weight_sum:     Weightf32,
    theta_sum:      Angle,
    rindex_sum:     f32,
    wavelength_sum: f32,
    theta_phi:      Vec<(Angle, Angle)>,
}

impl Default for AngleAccumulator {
    fn default() -> Self { Self::new() }
}

impl AngleAccumulator {

    pub fn new() -> Self {
        Self {
            npe:            0,
            weight_sum:     0.0,
            theta_sum:      Angle::ZERO,
            rindex_sum:     0.0,
            wavelength_sum: 0.0,
            theta_phi:      Vec::new(),
        }
    }

    pub fn npe(&self) -> u32 { self.npe }

    /// Fold in one selected photon. `vertex_diagnostics` gates the truth
    /// based refractive-index and wavelength sums.
    pub fn add(&mut self,
               photon:    &OpticalPhoton,
               estimate:  &PhotonEstimate,
               weighting: PhotonWeighting,
               vertex_diagnostics: bool,
    ) {
        let weight = weighting.weight(estimate.phi);
        self.npe        += 1;
        self.weight_sum += weight;
        self.theta_sum  += estimate.theta * weight;
        self.theta_phi.push((estimate.theta, estimate.phi));
        if vertex_diagnostics {
            if let Some(rindex) = photon.vertex_rindex { self.rindex_sum += rindex }
            if let Some(truth) = &photon.truth {
                self.wavelength_sum += HC_EV_NM / (GEV_TO_EV * truth.momentum.mag());
            }
        }
    }

    /// Close the accumulation: averages are zero, not NaN, when nothing was
    /// selected.
    pub fn into_record(self,
                       radiator:   RadiatorId,
                       hypotheses: Vec<PdgHypothesis>,
                       track:      usize,
    ) -> PidRecord {
        let Self { npe, weight_sum, theta_sum, rindex_sum, wavelength_sum, theta_phi } = self;
        let theta      = if weight_sum > 0.0 { theta_sum / weight_sum }        else { Angle::ZERO };
        let rindex     = if npe > 0          { rindex_sum / npe as f32 }       else { 0.0 };
        let wavelength = if npe > 0          { wavelength_sum / npe as f32 }   else { 0.0 };
        PidRecord { radiator, npe, theta, rindex, wavelength, theta_phi, hypotheses, track }
    }

}
