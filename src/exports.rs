pub use crate::config::{read_config_file, Config, RadiatorCfg};
pub use crate::detector::{DetectorGeometry, RadiatorDescription};
pub use crate::engine::{Engine, EventError, InitError};
pub use crate::event::{Event, PhotonTruth, SensorHit, Trajectory, TrajectoryPoint};
pub use crate::history::RadiatorHistory;
pub use crate::pdg::{PdgError, PdgMassTable};
pub use crate::photons::{Diagnostics, OpticalPhoton, PhotonAssociator};
pub use crate::radiator::{Radiator, RadiatorError, RadiatorId, RadiatorRegistry, Smearing};
pub use crate::records::{AngleAccumulator, PdgHypothesis, PidRecord};
pub use crate::resolver::{CherenkovResolver, HypothesisScore, PhotonEstimate, PhotonWeighting, Resolution};
pub use crate::rindex::RIndexCurve;
pub use crate::types::*;

pub use geometry::{Momentum, Point, Vector};
