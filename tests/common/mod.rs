//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use vessel_telemetry::common::vector::{self, Vector3};
use vessel_telemetry::estimators::VesselState;
use vessel_telemetry::orbits::{
    ApproachSearch, BodyId, CelestialBody, ClosestApproach, ConicOrbit, OrbitModel,
};

pub const KERBIN_MU: f64 = 3.5316e12;
pub const KERBIN_RADIUS: f64 = 600_000.0;

pub fn flat_body() -> CelestialBody {
    CelestialBody::new(BodyId(1), "Flatland", KERBIN_RADIUS, KERBIN_MU)
}

/// Straight-line fall toward the body centre at a constant rate.
///
/// A purely vertical trajectory has no angular momentum, so a conic cannot
/// represent it; this double stands in for the host's orbit model.
#[derive(Debug, Clone)]
pub struct RadialDescent {
    pub body: BodyId,
    pub body_radius: f64,
    pub direction: Vector3,
    pub start_radius: f64,
    pub epoch: f64,
    /// Descent rate (m/s, positive toward the centre).
    pub rate: f64,
    pub periapsis_altitude: f64,
}

impl RadialDescent {
    pub fn new(body_radius: f64, altitude: f64, rate: f64, periapsis_altitude: f64) -> Self {
        Self {
            body: BodyId(1),
            body_radius,
            direction: [1.0, 0.0, 0.0],
            start_radius: body_radius + altitude,
            epoch: 0.0,
            rate,
            periapsis_altitude,
        }
    }

    /// Vessel snapshot at the descent's epoch with the given gravity and thrust acceleration.
    pub fn vessel(&self, local_g: f64, max_thrust_accel: f64) -> VesselState {
        let body = CelestialBody::new(self.body, "double", self.body_radius, KERBIN_MU);
        let mut vessel = VesselState::coasting(
            &body,
            self.epoch,
            self.position_at(self.epoch),
            self.velocity_at(self.epoch),
            1.0,
        );
        vessel.local_g = local_g;
        vessel.max_thrust_accel = max_thrust_accel;
        vessel
    }
}

impl OrbitModel for RadialDescent {
    fn reference_body(&self) -> BodyId {
        self.body
    }

    fn eccentricity(&self) -> f64 {
        1.0
    }

    fn inclination_deg(&self) -> f64 {
        0.0
    }

    fn periapsis_altitude(&self) -> f64 {
        self.periapsis_altitude
    }

    fn apoapsis_altitude(&self) -> Option<f64> {
        None
    }

    fn period(&self) -> Option<f64> {
        None
    }

    fn mean_motion(&self) -> f64 {
        (KERBIN_MU / self.start_radius.powi(3)).sqrt()
    }

    fn orbit_normal(&self) -> Vector3 {
        [0.0, 0.0, 1.0]
    }

    fn position_at(&self, ut: f64) -> Vector3 {
        let r = self.start_radius - self.rate * (ut - self.epoch);
        vector::scale(&self.direction, r)
    }

    fn velocity_at(&self, _ut: f64) -> Vector3 {
        vector::scale(&self.direction, -self.rate)
    }

    fn next_time_of_radius(&self, ut: f64, radius: f64) -> Option<f64> {
        if self.rate == 0.0 {
            return None;
        }
        let t = self.epoch + (self.start_radius - radius) / self.rate;
        (t >= ut).then_some(t)
    }
}

/// Conic orbit that counts cross-orbit queries made through it.
#[derive(Debug, Clone)]
pub struct CountingOrbit {
    pub inner: ConicOrbit,
    pub cross_queries: Rc<Cell<usize>>,
    pub position_queries: Rc<Cell<usize>>,
}

impl CountingOrbit {
    pub fn new(inner: ConicOrbit) -> Self {
        Self {
            inner,
            cross_queries: Rc::new(Cell::new(0)),
            position_queries: Rc::new(Cell::new(0)),
        }
    }
}

impl OrbitModel for CountingOrbit {
    fn reference_body(&self) -> BodyId {
        self.inner.reference_body()
    }

    fn eccentricity(&self) -> f64 {
        self.inner.eccentricity()
    }

    fn inclination_deg(&self) -> f64 {
        self.inner.inclination_deg()
    }

    fn periapsis_altitude(&self) -> f64 {
        self.inner.periapsis_altitude()
    }

    fn apoapsis_altitude(&self) -> Option<f64> {
        self.inner.apoapsis_altitude()
    }

    fn period(&self) -> Option<f64> {
        self.inner.period()
    }

    fn mean_motion(&self) -> f64 {
        self.inner.mean_motion()
    }

    fn orbit_normal(&self) -> Vector3 {
        self.inner.orbit_normal()
    }

    fn position_at(&self, ut: f64) -> Vector3 {
        self.position_queries.set(self.position_queries.get() + 1);
        self.inner.position_at(ut)
    }

    fn velocity_at(&self, ut: f64) -> Vector3 {
        self.inner.velocity_at(ut)
    }

    fn next_time_of_radius(&self, ut: f64, radius: f64) -> Option<f64> {
        self.inner.next_time_of_radius(ut, radius)
    }

    fn next_closest_approach(
        &self,
        target: &dyn OrbitModel,
        ut: f64,
        search: &ApproachSearch,
    ) -> ClosestApproach {
        self.cross_queries.set(self.cross_queries.get() + 1);
        self.inner.next_closest_approach(target, ut, search)
    }

    fn synodic_period(&self, target: &dyn OrbitModel) -> Option<f64> {
        self.cross_queries.set(self.cross_queries.get() + 1);
        self.inner.synodic_period(target)
    }
}

/// Circular equatorial orbit of `radius` around `body`, starting at `phase_rad`.
pub fn circular(body: BodyId, radius: f64, phase_rad: f64) -> ConicOrbit {
    let speed = (KERBIN_MU / radius).sqrt();
    let (s, c) = phase_rad.sin_cos();
    ConicOrbit::from_state_parts(
        body,
        KERBIN_MU,
        KERBIN_RADIUS,
        [radius * c, radius * s, 0.0],
        [-speed * s, speed * c, 0.0],
        0.0,
    )
    .expect("circular orbit")
}
