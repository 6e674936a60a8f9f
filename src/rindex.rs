//! Refractive-index-vs-photon-energy tables.
//!
//! Radiator dispersion arrives from the optics description as a sparse,
//! irregularly sampled curve. At initialization each curve is resampled onto
//! a fine, (almost) uniform grid, so that the per-photon hot path can find an
//! index with constant-stride arithmetic instead of a search. All the
//! interpolation work happens once, here.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::types::{Energyf32, RIndexf32};

/// Photon-energy [eV] → refractive-index curve, sampled at strictly
/// increasing energies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RIndexCurve {
    samples: Vec<(Energyf32, RIndexf32)>,
}

impl RIndexCurve {

    pub fn new(samples: Vec<(Energyf32, RIndexf32)>) -> Self { Self { samples } }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }
    pub fn len     (&self) -> usize { self.samples.len() }

    pub fn samples(&self) -> &[(Energyf32, RIndexf32)] { &self.samples }

    /// Energy bounds `(min, max)` of the table, when it has any entries.
    pub fn bounds(&self) -> Option<(Energyf32, Energyf32)> {
        let first = self.samples.first()?;
        let last  = self.samples.last ()?;
        Some((first.0, last.0))
    }

    /// Resample onto a grid of roughly `nbins` uniform steps between the
    /// first and last sampled energies, linearly interpolating between
    /// adjacent original samples. Every original sample is kept, so the
    /// result may hold more than `nbins + 1` entries; this keeps the curve
    /// exact at the measured points at the cost of a slightly irregular grid.
    ///
    /// Returns an empty curve when `nbins < 2` or fewer than 2 distinct
    /// samples are available: callers treat an empty curve as "rebinning
    /// unavailable", not as an error.
    pub fn rebin(&self, nbins: usize) -> RIndexCurve {
        // sort and dedupe by energy; the last value wins for duplicate keys
        let buffer: BTreeMap<OrderedFloat<Energyf32>, RIndexf32> =
            self.samples.iter().map(|&(e, n)| (OrderedFloat(e), n)).collect();

        if buffer.len() < 2 || nbins < 2 { return RIndexCurve::default() }

        let from = buffer.keys().next()         .unwrap().0;
        let to   = buffer.keys().next_back()    .unwrap().0;
        let step = (to - from) / nbins as Energyf32;

        let mut out: Vec<(Energyf32, RIndexf32)> = Vec::with_capacity(nbins + buffer.len());
        for (&OrderedFloat(e1), &n1) in &buffer {
            match out.last().copied() {
                None => out.push((e1, n1)),
                Some((e0, n0)) => {
                    // the segment between the previous sample and this one
                    let a = (n1 - n0) / (e1 - e0);
                    let b = n0 - a * e0;
                    let mut e = e0 + step;
                    while e < e1 {
                        out.push((e, a * e + b));
                        e += step;
                    }
                    out.push((e1, n1));
                }
            }
        }
        RIndexCurve { samples: out }
    }

    /// O(1) lookup on a rebinned table: the value at the lower edge of the
    /// uniform bin containing `energy`.
    ///
    /// `None` when the table has fewer than 2 entries or `energy` falls
    /// outside the covered range. A table of `n` entries has `n - 1` usable
    /// bins; the last entry is only the upper edge of the final bin, so the
    /// upper energy bound itself is out of range.
    pub fn lookup(&self, energy: Energyf32) -> Option<RIndexf32> {
        let dim = self.samples.len();
        if dim < 2 { return None }

        let (emin, _) = self.samples[0];
        let (emax, _) = self.samples[dim - 1];
        let step = (emax - emin) / (dim - 1) as Energyf32;
        let ibin = ((energy - emin) / step).floor() as isize;

        if ibin < 0 || ibin >= dim as isize - 1 { return None }
        Some(self.samples[ibin as usize].1)
    }

}
