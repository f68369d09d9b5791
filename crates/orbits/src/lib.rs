//! Orbit collaborators consumed by the estimators.
//!
//! [`OrbitModel`] and [`ReferenceBody`] are the seams the estimators query; the
//! host flight software normally supplies its own implementations. [`ConicOrbit`]
//! and [`CelestialBody`] are reference implementations used by the CLI and tests.

pub mod body;
pub mod conic;
pub mod search;

pub use body::{BodyId, CelestialBody, ReferenceBody, Terrain};
pub use conic::{ConicOrbit, OrbitError};
pub use search::{ApproachSearch, ClosestApproach};

use telemetry_core::vector::Vector3;

/// Read-only orbit queries. Positions and velocities are relative to the reference body.
pub trait OrbitModel {
    fn reference_body(&self) -> BodyId;
    fn eccentricity(&self) -> f64;
    fn inclination_deg(&self) -> f64;
    /// Periapsis altitude above the reference body's mean radius (m).
    fn periapsis_altitude(&self) -> f64;
    /// Apoapsis altitude (m); `None` for open trajectories.
    fn apoapsis_altitude(&self) -> Option<f64>;
    /// Orbital period (s); `None` for open trajectories.
    fn period(&self) -> Option<f64>;
    /// Mean motion (rad/s).
    fn mean_motion(&self) -> f64;
    /// Unit vector along the specific angular momentum.
    fn orbit_normal(&self) -> Vector3;
    fn position_at(&self, ut: f64) -> Vector3;
    fn velocity_at(&self, ut: f64) -> Vector3;
    /// First time at or after `ut` when the orbital radius equals `radius`.
    fn next_time_of_radius(&self, ut: f64, radius: f64) -> Option<f64>;

    /// Time at which this patch ends with a sphere-of-influence change.
    fn patch_end_ut(&self) -> Option<f64> {
        None
    }

    /// Earliest minimum of separation from `target` within one search horizon after `ut`.
    fn next_closest_approach(
        &self,
        target: &dyn OrbitModel,
        ut: f64,
        search: &ApproachSearch,
    ) -> ClosestApproach {
        search::closest_approach(self, target, ut, search)
    }

    /// Time between successive alignments with `target`; `None` unless both orbits are closed.
    fn synodic_period(&self, target: &dyn OrbitModel) -> Option<f64> {
        search::synodic_period(self, target)
    }
}
