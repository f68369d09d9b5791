//! Countdown to the last moment a full-thrust braking burn can start.

use telemetry_core::geometry;
use telemetry_core::vector::{self, Vector3};
use telemetry_orbits::{OrbitModel, ReferenceBody};

use crate::outcome::{Estimate, NotApplicable, finite};
use crate::state::VesselState;

/// Surface speeds below this are treated as stationary (m/s).
const MIN_SURFACE_SPEED: f64 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuicideBurn {
    /// Seconds until the burn must start. Negative when it is already too late.
    pub countdown_s: f64,
    /// Net deceleration at full thrust along the current flight path (m/s²).
    pub deceleration: f64,
    /// Time to null the surface speed at that deceleration (s).
    pub burn_duration: f64,
    pub impact_ut: f64,
    /// Projected touchdown point relative to the body centre.
    pub landing_site: Vector3,
}

/// Positive root of `x² + 2·g·sine·x − (T² − g²) = 0`: the deceleration left
/// along the flight path after thrust `T` has also cancelled gravity `g`, with
/// `sine` the sine of the flight-path angle below the horizontal.
pub fn effective_deceleration(gravity: f64, thrust_accel: f64, sine: f64) -> f64 {
    let b = 2.0 * gravity * sine;
    0.5 * (-b + (b * b + 4.0 * (thrust_accel * thrust_accel - gravity * gravity)).sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SuicideBurnEstimator;

impl SuicideBurnEstimator {
    pub fn estimate<O, B>(
        &self,
        vessel: &VesselState,
        orbit: &O,
        body: &B,
    ) -> Estimate<SuicideBurn>
    where
        O: OrbitModel + ?Sized,
        B: ReferenceBody + ?Sized,
    {
        let periapsis_altitude_m = orbit.periapsis_altitude();
        if periapsis_altitude_m > 0.0 {
            return Err(NotApplicable::NoTerrainIntersection {
                periapsis_altitude_m,
            });
        }

        let speed = vessel.surface_speed();
        if !(speed >= MIN_SURFACE_SPEED) {
            return Err(NotApplicable::NoVelocity);
        }

        let gravity = vessel.local_g;
        let thrust_accel = vessel.max_thrust_accel;
        if !(thrust_accel >= gravity) {
            return Err(NotApplicable::InsufficientThrust {
                thrust_accel,
                gravity,
            });
        }

        let descent = vector::neg(&vessel.velocity_surface);
        let angle_from_horizontal =
            (90.0 - geometry::angle_between(&descent, &vessel.up)?).clamp(0.0, 90.0);
        let sine = angle_from_horizontal.to_radians().sin();

        let deceleration = effective_deceleration(gravity, thrust_accel, sine);
        if !(deceleration > 0.0) {
            // Hover-capable with no margin: the burn could never finish.
            return Err(NotApplicable::InsufficientThrust {
                thrust_accel,
                gravity,
            });
        }
        let burn_duration = finite("burn duration", speed / deceleration)?;

        // Coast at current velocity for half the burn to find where it touches down.
        let coast = vector::scale(&vessel.velocity_surface, 0.5 * burn_duration);
        let landing_site = vector::sub(&vector::add(&vessel.com, &coast), &body.position());
        let radius_m = body.terrain_radius(&landing_site);
        let impact_ut = orbit
            .next_time_of_radius(vessel.ut, radius_m)
            .ok_or(NotApplicable::RadiusNotReached { radius_m })?;

        let countdown_s = finite(
            "suicide burn countdown",
            impact_ut - burn_duration / 2.0 - vessel.ut,
        )?;
        tracing::debug!(countdown_s, deceleration, burn_duration, "suicide burn estimated");
        Ok(SuicideBurn {
            countdown_s,
            deceleration,
            burn_duration,
            impact_ut,
            landing_site,
        })
    }
}
