//! The identification engine: initialization-time wiring of radiators,
//! index tables and hypothesis masses, plus the per-event processing loop.

use std::collections::BTreeMap;

use itertools::izip;
use tracing::{debug, error, trace};

use crate::config::Config;
use crate::detector::DetectorGeometry;
use crate::event::{Event, Trajectory};
use crate::history::RadiatorHistory;
use crate::pdg::{PdgError, PdgMassTable};
use crate::photons::{Diagnostics, PhotonAssociator};
use crate::radiator::{RadiatorError, RadiatorRegistry};
use crate::records::{AngleAccumulator, PdgHypothesis, PidRecord};
use crate::resolver::{CherenkovResolver, PhotonWeighting, Resolution};
use crate::types::{Massf32, PdgId};

#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("no radiators found in the detector geometry")]
    NoRadiators,
    #[error(transparent)]
    Radiator(#[from] RadiatorError),
    #[error(transparent)]
    Pdg(#[from] PdgError),
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum EventError {
    #[error("radiators disagree on the trajectory count ({first} vs {other})")]
    TrajectoryCountMismatch { first: usize, other: usize },
}

/// The per-run identification engine.
///
/// Everything in here is established once, at initialization, and read-only
/// during event processing, so independent events can be processed by
/// independent workers sharing one `Engine`.
pub struct Engine<G, R> {
    geometry:    G,
    registry:    RadiatorRegistry,
    /// (pdg, mass) hypothesis list, in configuration order.
    hypotheses:  Vec<(PdgId, Massf32)>,
    diagnostics: Diagnostics,
    weighting:   PhotonWeighting,
    resolver:    R,
}

impl<G: DetectorGeometry, R: CherenkovResolver> Engine<G, R> {

    pub fn new(geometry: G, resolver: R, cfg: &Config) -> Result<Self, InitError> {
        debug!(?cfg, "initializing the identification engine");

        let descriptions = geometry.radiators();
        if descriptions.is_empty() { return Err(InitError::NoRadiators) }
        let registry = RadiatorRegistry::new(&descriptions, cfg)?;
        if registry.is_empty() { return Err(InitError::NoRadiators) }

        // resolve the hypothesis list now, so that mass lookups can never
        // fail at event time
        let masses = PdgMassTable::with_overrides(&cfg.masses);
        let mut hypotheses = Vec::with_capacity(cfg.particle_list.len());
        for &pdg in &cfg.particle_list {
            let mass = masses.mass(pdg)?;
            debug!("hypothesis {pdg:>6}  M = {mass} GeV");
            hypotheses.push((pdg, mass));
        }

        let diagnostics = Diagnostics {
            photon_vertex: cfg.cheat_photon_vertex,
            true_radiator: cfg.cheat_true_radiator,
        };

        Ok(Self { geometry, registry, hypotheses, diagnostics, weighting: PhotonWeighting::default(), resolver })
    }

    /// Replace the default (uniform) photon weighting entering the
    /// Cherenkov-angle mean.
    pub fn with_weighting(mut self, weighting: PhotonWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn registry(&self) -> &RadiatorRegistry { &self.registry }

    /// Process one event into its PID records: one record per (trajectory,
    /// radiator) pair. Inconsistent input yields an empty set; the error is
    /// logged and the next event is unaffected.
    pub fn process_event(&self, event: &Event) -> Vec<PidRecord> {
        trace!("processing event: {} raw sensor hits", event.hits.len());
        self.diagnostics.nag();

        let n_tracks = match track_count(&event.tracks) {
            Ok(n) => n,
            Err(e) => { error!("{e}; event yields no output"); return Vec::new() }
        };

        let associator = PhotonAssociator::new(&self.geometry, self.diagnostics);
        let photons = associator.build(&event.hits);
        let masses: Vec<Massf32> = self.hypotheses.iter().map(|&(_, mass)| mass).collect();

        let mut records = Vec::new();
        for track in 0..n_tracks {

            // one history per PID radiator, owned by this trajectory alone
            // and dropped at the end of this iteration
            let mut histories: Vec<RadiatorHistory> =
                self.registry.iter().map(|radiator| RadiatorHistory::new(radiator.id)).collect();

            for (radiator, history) in izip!(self.registry.iter(), histories.iter_mut()) {
                let Some(trajectories) = event.tracks.get(&radiator.name) else {
                    error!("cannot find radiator '{}' in the track-segment collections", radiator.name);
                    continue;
                };
                history.track = Some(track);
                history.steps = trajectories[track].points.clone();
                associator.distribute(&photons, radiator, history);
            }

            let resolution = self.resolver.resolve(&histories, &masses);
            self.reduce(&histories, &resolution, &mut records);
        }
        records
    }

    /// Fold one trajectory's resolver output into per-radiator records.
    /// Radiators with no track association produce nothing; their siblings
    /// still do.
    fn reduce(&self, histories: &[RadiatorHistory], resolution: &Resolution, records: &mut Vec<PidRecord>) {
        for (slot, (radiator, history)) in izip!(self.registry.iter(), histories).enumerate() {
            let Some(track) = history.track else { continue };

            let mut acc = AngleAccumulator::new();
            for (photon, estimate) in izip!(&history.photons, &resolution.photons[slot]) {
                if !estimate.selected { continue }
                acc.add(photon, estimate, self.weighting, self.diagnostics.photon_vertex);
            }

            let hypotheses: Vec<PdgHypothesis> = self.hypotheses.iter().enumerate()
                .map(|(h, &(pdg, _))| {
                    let score = resolution.scores[h][slot];
                    PdgHypothesis { pdg, weight: score.weight, npe: score.npe }
                })
                .collect();

            let record = acc.into_record(radiator.id, hypotheses, track);
            trace!("-> {} radiator (id {}): npe {}, <theta> {:?}", radiator.name, radiator.id, record.npe, record.theta);
            records.push(record);
        }
    }

}

/// Number of trajectories in this event, provided every radiator's
/// collection agrees on it. An event with no collections has zero.
fn track_count(tracks: &BTreeMap<String, Vec<Trajectory>>) -> Result<usize, EventError> {
    let mut counts = tracks.values().map(|list| list.len());
    let first = counts.next().unwrap_or(0);
    for other in counts {
        if other != first { return Err(EventError::TrajectoryCountMismatch { first, other }) }
    }
    Ok(first)
}
