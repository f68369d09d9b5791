//! Reason-coded results.
//!
//! "Not applicable" is an ordinary, frequent outcome (no target selected, orbit
//! never touches the ground, ...). It is returned as a value and rendered by the
//! display layer as a placeholder.

use telemetry_core::geometry::GeometryError;
use telemetry_orbits::BodyId;
use thiserror::Error;

/// Value of an estimator, or why it has none.
pub type Estimate<T> = Result<T, NotApplicable>;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NotApplicable {
    #[error("orbit does not intersect the terrain (periapsis altitude {periapsis_altitude_m:.0} m)")]
    NoTerrainIntersection { periapsis_altitude_m: f64 },
    #[error("orbit never reaches radius {radius_m:.0} m")]
    RadiusNotReached { radius_m: f64 },
    #[error("no target selected")]
    NoTarget,
    #[error("target has no orbit")]
    NoTargetOrbit,
    #[error("target orbits {target}, vessel orbits {vessel}")]
    DifferentReferenceBody { vessel: BodyId, target: BodyId },
    #[error("vessel has no surface velocity")]
    NoVelocity,
    #[error("thrust acceleration {thrust_accel:.3} m/s² cannot overcome gravity {gravity:.3} m/s²")]
    InsufficientThrust { thrust_accel: f64, gravity: f64 },
    #[error("orbit is not closed")]
    OpenOrbit,
    #[error("orbit does not leave the current sphere of influence")]
    FinalPatch,
    #[error("no maneuver node planned")]
    NoManeuverNode,
    #[error("body has no atmosphere")]
    NoAtmosphere,
    #[error("degenerate geometry: {0}")]
    DegenerateVector(#[from] GeometryError),
    #[error("{quantity} is not finite")]
    NonFinite { quantity: &'static str },
}

impl NotApplicable {
    /// `true` for degenerate numeric input, `false` for an unmet precondition.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            NotApplicable::DegenerateVector(_) | NotApplicable::NonFinite { .. }
        )
    }

    /// Stable snake-case identifier used in machine-readable reports.
    pub fn code(&self) -> &'static str {
        match self {
            NotApplicable::NoTerrainIntersection { .. } => "no_terrain_intersection",
            NotApplicable::RadiusNotReached { .. } => "radius_not_reached",
            NotApplicable::NoTarget => "no_target",
            NotApplicable::NoTargetOrbit => "no_target_orbit",
            NotApplicable::DifferentReferenceBody { .. } => "different_reference_body",
            NotApplicable::NoVelocity => "no_velocity",
            NotApplicable::InsufficientThrust { .. } => "insufficient_thrust",
            NotApplicable::OpenOrbit => "open_orbit",
            NotApplicable::FinalPatch => "final_patch",
            NotApplicable::NoManeuverNode => "no_maneuver_node",
            NotApplicable::NoAtmosphere => "no_atmosphere",
            NotApplicable::DegenerateVector(_) => "degenerate_vector",
            NotApplicable::NonFinite { .. } => "non_finite",
        }
    }
}

/// Pass `value` through if finite, otherwise report it as degenerate.
pub(crate) fn finite(quantity: &'static str, value: f64) -> Estimate<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NotApplicable::NonFinite { quantity })
    }
}
