//! Per-event input data, as handed over by the event store.

use std::collections::BTreeMap;

use geometry::{Momentum, Point};

use crate::types::ChannelId;

/// Monte-Carlo truth embedded in a raw hit. Ignored outside diagnostic mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotonTruth {
    pub vertex:   Point,
    pub momentum: Momentum,
}

/// One raw photo-sensor hit.
#[derive(Clone, Copy, Debug)]
pub struct SensorHit {
    pub channel: ChannelId,
    pub truth:   Option<PhotonTruth>,
}

impl SensorHit {
    pub fn new(channel: ChannelId) -> Self { Self { channel, truth: None } }
}

/// Position + momentum sample along a charged particle's path. Ordering
/// within a trajectory is path order and is significant.
#[derive(Clone, Copy, Debug)]
pub struct TrajectoryPoint {
    pub position: Point,
    pub momentum: Momentum,
}

/// A charged particle's path through one radiator.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
}

/// One event: raw sensor hits plus, per radiator name, one trajectory
/// collection. All collections must agree on the trajectory count; a
/// mismatch rejects the whole event.
#[derive(Clone, Debug, Default)]
pub struct Event {
    pub hits:   Vec<SensorHit>,
    pub tracks: BTreeMap<String, Vec<Trajectory>>,
}
