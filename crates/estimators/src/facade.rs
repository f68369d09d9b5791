//! Re-exported APIs for consumers of the estimators crate.

pub use crate::catalog::{Category, InfoItem, Unit};
pub use crate::impact::{ImpactPrediction, ImpactTimeEstimator};
pub use crate::outcome::{Estimate, NotApplicable};
pub use crate::rendezvous::{AxisTriple, Rendezvous, TargetApproach};
pub use crate::state::{Snapshot, TargetState, VesselAxes, VesselState};
pub use crate::suicide_burn::{SuicideBurn, SuicideBurnEstimator, effective_deceleration};
pub use crate::vessel_info::{Coordinates, OrbitSummary};

use telemetry_config::{ApproachSettings, EstimatorSettings};
use telemetry_orbits::ApproachSearch;

/// Closest-approach search grid described by `settings`.
pub fn approach_search(settings: &ApproachSettings) -> ApproachSearch {
    ApproachSearch {
        divisions: settings.divisions,
        rounds: settings.rounds,
        hyperbolic_horizon_radians: settings.hyperbolic_horizon_radians,
    }
}

/// Estimators configured from loaded settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimators {
    pub impact: ImpactTimeEstimator,
    pub suicide_burn: SuicideBurnEstimator,
    pub approach: ApproachSearch,
}

impl Default for Estimators {
    fn default() -> Self {
        Self::from_settings(&EstimatorSettings::default())
    }
}

impl Estimators {
    pub fn from_settings(settings: &EstimatorSettings) -> Self {
        let impact = ImpactTimeEstimator::from_settings(&settings.impact);
        Self {
            impact,
            suicide_burn: SuicideBurnEstimator::default(),
            approach: approach_search(&settings.approach),
        }
    }
}
