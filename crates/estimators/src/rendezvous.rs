//! Geometry relative to the selected target.
//!
//! Every quantity checks its preconditions (target selected, target has an
//! orbit, both orbits share a reference body) before any orbit query runs.

use serde::Serialize;
use telemetry_core::geometry;
use telemetry_core::vector::{self, Vector3};
use telemetry_orbits::{ApproachSearch, OrbitModel, ReferenceBody};

use crate::outcome::{Estimate, NotApplicable, finite};
use crate::state::{Snapshot, TargetState, VesselAxes, VesselState};

/// A vector expressed along the vessel's right, forward and up axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTriple {
    pub right: f64,
    pub forward: f64,
    pub up: f64,
}

impl AxisTriple {
    pub fn project(v: &Vector3, axes: &VesselAxes) -> Self {
        Self {
            right: vector::dot(v, &axes.right),
            forward: vector::dot(v, &axes.forward),
            up: vector::dot(v, &axes.up),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetApproach {
    pub time_to_approach: f64,
    pub ut: f64,
    pub distance: f64,
}

/// Rendezvous quantities for one snapshot.
pub struct Rendezvous<'a> {
    vessel: &'a VesselState,
    orbit: &'a dyn OrbitModel,
    body: &'a dyn ReferenceBody,
    target: Option<&'a TargetState>,
    search: ApproachSearch,
}

impl<'a> Rendezvous<'a> {
    pub fn new(snapshot: Snapshot<'a>, search: ApproachSearch) -> Self {
        Self {
            vessel: snapshot.vessel,
            orbit: snapshot.orbit,
            body: snapshot.body,
            target: snapshot.target,
            search,
        }
    }

    fn target(&self) -> Estimate<&'a TargetState> {
        self.target.ok_or(NotApplicable::NoTarget)
    }

    /// Selected target, provided it has an orbit of its own.
    fn orbiting_target(&self) -> Estimate<&'a TargetState> {
        let target = self.target()?;
        if target.orbit.is_none() {
            return Err(NotApplicable::NoTargetOrbit);
        }
        Ok(target)
    }

    /// Target orbit, provided it shares the vessel's reference body.
    fn comparable_orbit(&self) -> Estimate<&'a dyn OrbitModel> {
        let target = self.target()?;
        let orbit = target.orbit.as_deref().ok_or(NotApplicable::NoTargetOrbit)?;
        let vessel = self.orbit.reference_body();
        let other = orbit.reference_body();
        if vessel != other {
            return Err(NotApplicable::DifferentReferenceBody {
                vessel,
                target: other,
            });
        }
        Ok(orbit)
    }

    pub fn distance(&self) -> Estimate<f64> {
        Ok(vector::norm(&self.target()?.relative_position))
    }

    pub fn relative_speed(&self) -> Estimate<f64> {
        Ok(vector::norm(&self.orbiting_target()?.relative_velocity))
    }

    /// Target-relative velocity along the vessel axes.
    pub fn relative_velocity_axes(&self) -> Estimate<AxisTriple> {
        let target = self.orbiting_target()?;
        Ok(AxisTriple::project(&target.relative_velocity, &self.vessel.axes))
    }

    /// Target-relative position along the vessel axes.
    pub fn relative_position_axes(&self) -> Estimate<AxisTriple> {
        let target = self.orbiting_target()?;
        Ok(AxisTriple::project(&target.relative_position, &self.vessel.axes))
    }

    pub fn closest_approach(&self) -> Estimate<TargetApproach> {
        let target_orbit = self.comparable_orbit()?;
        let now = self.vessel.ut;
        let approach = self
            .orbit
            .next_closest_approach(target_orbit, now, &self.search);
        Ok(TargetApproach {
            time_to_approach: finite("time to closest approach", approach.ut - now)?,
            ut: approach.ut,
            distance: finite("closest approach distance", approach.distance)?,
        })
    }

    pub fn synodic_period(&self) -> Estimate<f64> {
        let target_orbit = self.comparable_orbit()?;
        let period = self
            .orbit
            .synodic_period(target_orbit)
            .ok_or(NotApplicable::OpenOrbit)?;
        finite("synodic period", period)
    }

    /// Angle in `[0, 360)` from the vessel to the target, measured in the
    /// vessel's orbital plane in the direction of motion.
    pub fn phase_angle(&self) -> Estimate<f64> {
        self.comparable_orbit()?;
        let target = self.target()?;
        let centre = self.body.position();
        let normal = self.orbit.orbit_normal();
        let projected =
            geometry::exclude_component(&vector::sub(&target.position, &centre), &normal)?;
        let vessel_position = vector::sub(&self.vessel.com, &centre);
        geometry::signed_angle(&vessel_position, &projected, &normal).map_err(Into::into)
    }
}
