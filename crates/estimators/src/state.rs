//! Per-tick inputs to the estimators.
//!
//! All positions are world-frame unless a field says otherwise; the reference
//! body's world position converts between the two.

use std::fmt;

use telemetry_core::vector::{self, Vector3};
use telemetry_orbits::{OrbitModel, ReferenceBody};

/// Vessel body axes as world-frame unit vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VesselAxes {
    pub right: Vector3,
    pub forward: Vector3,
    pub up: Vector3,
}

impl Default for VesselAxes {
    fn default() -> Self {
        Self {
            right: [1.0, 0.0, 0.0],
            forward: [0.0, 1.0, 0.0],
            up: [0.0, 0.0, 1.0],
        }
    }
}

/// Physical snapshot of the active vessel. Masses in tonnes, thrust in kN.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselState {
    pub ut: f64,
    /// Centre of mass.
    pub com: Vector3,
    pub velocity_surface: Vector3,
    pub velocity_orbit: Vector3,
    /// Local vertical (unit vector away from the body centre).
    pub up: Vector3,
    /// Local gravitational acceleration magnitude (m/s²).
    pub local_g: f64,
    /// Thrust acceleration at full throttle (m/s²).
    pub max_thrust_accel: f64,
    pub mass_t: f64,
    pub thrust_available_kn: f64,
    pub thrust_minimum_kn: f64,
    /// Sum over parts of mass times drag coefficient.
    pub mass_drag: f64,
    /// Current throttle in `[0, 1]`.
    pub throttle: f64,
    pub axes: VesselAxes,
    /// Delta-v vector of the next maneuver node, if one is planned.
    pub next_node_burn: Option<Vector3>,
}

impl VesselState {
    /// Kinematic snapshot around `body` with no engines and default axes.
    pub fn coasting<B: ReferenceBody + ?Sized>(
        body: &B,
        ut: f64,
        body_relative_position: Vector3,
        velocity: Vector3,
        mass_t: f64,
    ) -> Self {
        let com = vector::add(&body.position(), &body_relative_position);
        let r = vector::norm(&body_relative_position);
        let up = if r > 0.0 {
            vector::scale(&body_relative_position, 1.0 / r)
        } else {
            [0.0, 0.0, 1.0]
        };
        Self {
            ut,
            com,
            velocity_surface: velocity,
            velocity_orbit: velocity,
            up,
            local_g: if r > 0.0 { body.mu() / (r * r) } else { 0.0 },
            max_thrust_accel: 0.0,
            mass_t,
            thrust_available_kn: 0.0,
            thrust_minimum_kn: 0.0,
            mass_drag: 0.0,
            throttle: 0.0,
            axes: VesselAxes::default(),
            next_node_burn: None,
        }
    }

    /// Centre of mass relative to `body`.
    pub fn body_relative_position<B: ReferenceBody + ?Sized>(&self, body: &B) -> Vector3 {
        vector::sub(&self.com, &body.position())
    }

    /// Altitude above the mean radius of `body`.
    pub fn altitude<B: ReferenceBody + ?Sized>(&self, body: &B) -> f64 {
        vector::norm(&self.body_relative_position(body)) - body.radius()
    }

    pub fn surface_speed(&self) -> f64 {
        vector::norm(&self.velocity_surface)
    }
}

/// Selected target. `orbit` is absent for targets that do not orbit anything
/// (e.g. a surface position); only distance is defined for those, and
/// `relative_velocity` is never read.
pub struct TargetState {
    pub relative_position: Vector3,
    pub relative_velocity: Vector3,
    pub position: Vector3,
    pub orbit: Option<Box<dyn OrbitModel>>,
}

impl TargetState {
    pub fn orbiting(
        relative_position: Vector3,
        relative_velocity: Vector3,
        position: Vector3,
        orbit: impl OrbitModel + 'static,
    ) -> Self {
        Self {
            relative_position,
            relative_velocity,
            position,
            orbit: Some(Box::new(orbit)),
        }
    }

    /// Target without an orbit, e.g. a landed vessel or a waypoint.
    pub fn fixed(relative_position: Vector3, position: Vector3) -> Self {
        Self {
            relative_position,
            relative_velocity: [0.0; 3],
            position,
            orbit: None,
        }
    }
}

impl fmt::Debug for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetState")
            .field("relative_position", &self.relative_position)
            .field("relative_velocity", &self.relative_velocity)
            .field("position", &self.position)
            .field("has_orbit", &self.orbit.is_some())
            .finish()
    }
}

/// Everything the estimators read during one evaluation tick.
#[derive(Clone, Copy)]
pub struct Snapshot<'a> {
    pub vessel: &'a VesselState,
    pub orbit: &'a dyn OrbitModel,
    pub body: &'a dyn ReferenceBody,
    pub target: Option<&'a TargetState>,
}
