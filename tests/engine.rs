//! End-to-end runs of the identification engine against a deterministic
//! resolver stub and a toy two-radiator detector.

use std::collections::BTreeMap;

use float_eq::assert_float_eq;
use pretty_assertions::assert_eq;

use geometry::{Momentum, Point};
use units::uom::ConstZero;
use units::{mm, radian, radian_, Angle};

use richpid::{
    CherenkovResolver, Config, DetectorGeometry, Engine, Event, HypothesisScore, InitError,
    PdgMassTable, PhotonEstimate, PhotonTruth, PhotonWeighting, RadiatorDescription,
    RadiatorHistory, Resolution, SensorHit, Trajectory, TrajectoryPoint, ChannelId, Massf32,
    GEV_TO_EV,
};

// ----- Toy collaborators ------------------------------------------------------------

struct ToyDetector;

impl DetectorGeometry for ToyDetector {
    fn radiators(&self) -> Vec<RadiatorDescription> {
        vec![
            RadiatorDescription { name: "Aerogel".into(), rindex_samples: vec![(1.0, 1.02 ), (3.0, 1.03  )] },
            RadiatorDescription { name: "Gas"    .into(), rindex_samples: vec![(1.0, 1.0007), (3.0, 1.0009)] },
            RadiatorDescription { name: "Filter" .into(), rindex_samples: vec![(1.0, 1.5  ), (3.0, 1.5   )] },
        ]
    }
    fn readout_mask(&self) -> ChannelId { 0xff00 }
    fn position_of(&self, channel: ChannelId) -> Point {
        Point::new(mm(channel as f32), mm(0.0), mm(1500.0))
    }
    fn guess_radiator(&self, vertex: &Point) -> Option<String> {
        if vertex.z < mm(1200.0) { Some("Aerogel".into()) } else { Some("Gas".into()) }
    }
}

struct EmptyDetector;

impl DetectorGeometry for EmptyDetector {
    fn radiators(&self) -> Vec<RadiatorDescription> { vec![] }
    fn readout_mask(&self) -> ChannelId { 0 }
    fn position_of(&self, _channel: ChannelId) -> Point { Point::new(mm(0.0), mm(0.0), mm(0.0)) }
    fn guess_radiator(&self, _vertex: &Point) -> Option<String> { None }
}

/// Selects every photon everywhere. Per radiator slot `r`: θ = 0.2 + 0.1·r,
/// φ grows with the photon index. Hypothesis weights shrink with mass and
/// scale with the photon count, so an empty event scores exactly zero.
struct StubResolver;

impl CherenkovResolver for StubResolver {
    fn resolve(&self, histories: &[RadiatorHistory], masses: &[Massf32]) -> Resolution {
        let photons = histories.iter().enumerate()
            .map(|(r, history)| {
                history.photons.iter().enumerate()
                    .map(|(i, _)| PhotonEstimate {
                        selected: true,
                        theta: radian(0.2 + 0.1 * r as f32),
                        phi:   radian(0.1 * i as f32),
                    })
                    .collect()
            })
            .collect();
        let scores = masses.iter()
            .map(|&mass| histories.iter()
                 .map(|history| {
                     let npe = history.photons.len() as f32;
                     HypothesisScore { weight: npe / (1.0 + mass), npe }
                 })
                 .collect())
            .collect();
        Resolution { photons, scores }
    }
}

// ----- Helpers ----------------------------------------------------------------------

fn trajectory(z: f32) -> Trajectory {
    Trajectory {
        points: vec![TrajectoryPoint {
            position: Point::new(mm(0.0), mm(0.0), mm(z)),
            momentum: Momentum::new(0.0, 0.0, 10.0),
        }],
    }
}

fn tracks(n_aerogel: usize, n_gas: usize) -> BTreeMap<String, Vec<Trajectory>> {
    let mut tracks = BTreeMap::new();
    tracks.insert("Aerogel".to_string(), vec![trajectory(1100.0); n_aerogel]);
    tracks.insert("Gas"    .to_string(), vec![trajectory(1300.0); n_gas]);
    tracks
}

fn event(n_hits: usize, n_tracks: usize) -> Event {
    Event {
        hits:   (0..n_hits).map(|i| SensorHit::new(i as ChannelId)).collect(),
        tracks: tracks(n_tracks, n_tracks),
    }
}

fn engine(cfg: &Config) -> Engine<ToyDetector, StubResolver> {
    Engine::new(ToyDetector, StubResolver, cfg).unwrap()
}

// ----- Scenarios --------------------------------------------------------------------

#[test]
fn one_record_per_trajectory_and_radiator() {
    let records = engine(&Config::default()).process_event(&event(5, 3));
    assert_eq!(records.len(), 6); // 3 trajectories × 2 radiators

    for track in 0..3 {
        let of_track: Vec<_> = records.iter().filter(|r| r.track == track).collect();
        let radiators: Vec<_> = of_track.iter().map(|r| r.radiator).collect();
        assert_eq!(radiators, vec![0, 1]);
    }
}

#[test]
fn stub_statistics_flow_into_the_records() {
    let records = engine(&Config::default()).process_event(&event(4, 1));
    assert_eq!(records.len(), 2);

    let aerogel = &records[0];
    assert_eq!(aerogel.npe, 4);
    assert_float_eq!(radian_(aerogel.theta), 0.2, ulps <= 4);
    assert_eq!(aerogel.theta_phi.len(), 4);
    assert_float_eq!(radian_(aerogel.theta_phi[3].1), 0.3, ulps <= 4);

    let gas = &records[1];
    assert_float_eq!(radian_(gas.theta), 0.3, ulps <= 4);

    // production mode: no diagnostic averages
    assert_eq!(aerogel.rindex, 0.0);
    assert_eq!(aerogel.wavelength, 0.0);
}

#[test]
fn mismatched_trajectory_counts_reject_the_event() {
    let engine = engine(&Config::default());
    let bad = Event { hits: vec![SensorHit::new(1)], tracks: tracks(3, 2) };
    assert!(engine.process_event(&bad).is_empty());

    // the next, consistent event is unaffected
    assert_eq!(engine.process_event(&event(1, 1)).len(), 2);
}

#[test]
fn zero_hit_event_yields_zeroed_records_with_full_hypothesis_lists() {
    let records = engine(&Config::default()).process_event(&event(0, 2));
    assert_eq!(records.len(), 4);
    for record in &records {
        assert_eq!(record.npe, 0);
        assert_eq!(record.theta, Angle::ZERO);
        assert!(record.theta_phi.is_empty());
        let pdgs: Vec<_> = record.hypotheses.iter().map(|h| h.pdg).collect();
        assert_eq!(pdgs, vec![-11, 211, 321, 2212]);
        for hypothesis in &record.hypotheses {
            assert_eq!(hypothesis.weight, 0.0);
            assert_eq!(hypothesis.npe,    0.0);
        }
    }
}

#[test]
fn filter_radiator_never_appears() {
    let engine = engine(&Config::default());
    assert!(engine.registry().by_name("Filter").is_none());

    let mut with_filter = event(3, 1);
    with_filter.tracks.insert("Filter".to_string(), vec![trajectory(0.0)]);
    let records = engine.process_event(&with_filter);
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_ne!(engine.registry().get(record.radiator).unwrap().name, "Filter");
    }
}

#[test]
fn hypothesis_scores_follow_the_stub() {
    let masses = PdgMassTable::curated();
    let records = engine(&Config::default()).process_event(&event(2, 1));
    for record in &records {
        assert_eq!(record.hypotheses.len(), 4);
        for hypothesis in &record.hypotheses {
            assert_float_eq!(hypothesis.npe, 2.0, ulps <= 1);
            let mass = masses.mass(hypothesis.pdg).unwrap();
            assert_float_eq!(hypothesis.weight, 2.0 / (1.0 + mass), ulps <= 4);
        }
    }
}

#[test]
fn missing_radiator_collection_skips_only_that_radiator() {
    let engine = engine(&Config::default());
    let mut partial = event(2, 2);
    partial.tracks.remove("Gas");
    let records = engine.process_event(&partial);

    assert_eq!(records.len(), 2); // aerogel only, for both trajectories
    assert!(records.iter().all(|r| r.radiator == 0));
    assert_eq!(records.iter().map(|r| r.track).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn no_radiators_is_an_initialization_failure() {
    let err = Engine::new(EmptyDetector, StubResolver, &Config::default())
        .err()
        .expect("initialization against an empty geometry must fail");
    assert!(matches!(err, InitError::NoRadiators));
}

#[test]
fn unknown_hypothesis_particle_is_an_initialization_failure() {
    let mut cfg = Config::default();
    cfg.particle_list.push(99999);
    assert!(matches!(Engine::new(ToyDetector, StubResolver, &cfg), Err(InitError::Pdg(_))));
}

#[test]
fn true_radiator_cheat_routes_photons_by_truth() {
    let mut cfg = Config::default();
    cfg.cheat_true_radiator = true;
    let engine = engine(&cfg);

    // all photons emitted in the aerogel region
    let hits: Vec<SensorHit> = (0..3)
        .map(|i| SensorHit {
            channel: i,
            truth: Some(PhotonTruth {
                vertex:   Point::new(mm(0.0), mm(0.0), mm(1100.0)),
                momentum: Momentum::new(0.0, 0.0, 2.0 / GEV_TO_EV),
            }),
        })
        .collect();
    let event = Event { hits, tracks: tracks(1, 1) };
    let records = engine.process_event(&event);

    let aerogel = records.iter().find(|r| r.radiator == 0).unwrap();
    let gas     = records.iter().find(|r| r.radiator == 1).unwrap();
    assert_eq!(aerogel.npe, 3);
    assert_eq!(gas.npe, 0);
}

#[test]
fn photon_vertex_cheat_fills_the_diagnostic_averages() {
    let mut cfg = Config::default();
    cfg.cheat_photon_vertex = true;
    let engine = engine(&cfg);

    let hits: Vec<SensorHit> = (0..2)
        .map(|i| SensorHit {
            channel: i,
            truth: Some(PhotonTruth {
                vertex:   Point::new(mm(0.0), mm(0.0), mm(1100.0)),
                momentum: Momentum::new(0.0, 0.0, 2.0 / GEV_TO_EV), // 2 eV photon
            }),
        })
        .collect();
    let event = Event { hits, tracks: tracks(1, 1) };
    let records = engine.process_event(&event);

    let aerogel = records.iter().find(|r| r.radiator == 0).unwrap();
    assert!(aerogel.rindex > 1.0);
    assert_float_eq!(aerogel.wavelength, 1239.842 / 2.0, ulps <= 8);
}

#[test]
fn sine_weighting_can_be_selected() {
    let engine = engine(&Config::default()).with_weighting(PhotonWeighting::AbsSinPhi);
    let records = engine.process_event(&event(3, 1));

    // all three photons share θ = 0.2, so the weighted mean is unchanged,
    // but the φ = 0 photon still counts towards the NPE
    let aerogel = &records[0];
    assert_eq!(aerogel.npe, 3);
    assert_float_eq!(radian_(aerogel.theta), 0.2, abs <= 1e-5);
}

#[test]
fn histories_do_not_leak_across_trajectories() {
    // processing many trajectories over the same photon list must give each
    // trajectory its own identical, independent statistics
    let records = engine(&Config::default()).process_event(&event(3, 4));
    let aerogel: Vec<_> = records.iter().filter(|r| r.radiator == 0).collect();
    assert_eq!(aerogel.len(), 4);
    for record in aerogel {
        assert_eq!(record.npe, 3);
        assert_float_eq!(radian_(record.theta), 0.2, ulps <= 4);
    }
}
