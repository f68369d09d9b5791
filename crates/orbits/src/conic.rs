//! Two-body elliptic and hyperbolic orbits built from a state vector.

use std::f64::consts::{PI, TAU};

use telemetry_core::vector::{self, Vector3};
use thiserror::Error;

use crate::OrbitModel;
use crate::body::{BodyId, ReferenceBody};

/// Eccentricities below this are treated as circular.
const CIRCULAR_EPSILON: f64 = 1.0e-9;
/// Half-width of the rejected band around e = 1.
const PARABOLIC_BAND: f64 = 1.0e-9;
const KEPLER_TOLERANCE: f64 = 1.0e-13;
const KEPLER_MAX_ITERATIONS: usize = 200;

#[derive(Debug, Error, PartialEq)]
pub enum OrbitError {
    #[error("gravitational parameter must be positive (got {0})")]
    InvalidMu(f64),
    #[error("state vector or epoch is not finite")]
    NonFinite,
    #[error("position coincides with the body centre")]
    ZeroRadius,
    #[error("state has no angular momentum (radial trajectory)")]
    Radial,
    #[error("parabolic trajectories are not supported (e = {0})")]
    Parabolic(f64),
}

#[derive(Debug, Clone)]
pub struct ConicOrbit {
    body: BodyId,
    mu: f64,
    body_radius: f64,
    epoch: f64,
    eccentricity: f64,
    semi_major_axis: f64,
    semi_latus_rectum: f64,
    mean_motion: f64,
    mean_anomaly_at_epoch: f64,
    p_hat: Vector3,
    q_hat: Vector3,
    normal: Vector3,
    patch_end_ut: Option<f64>,
}

impl ConicOrbit {
    /// Orbit around `body` through `position`/`velocity` (body-relative) at `epoch`.
    pub fn from_state<B: ReferenceBody + ?Sized>(
        body: &B,
        position: Vector3,
        velocity: Vector3,
        epoch: f64,
    ) -> Result<Self, OrbitError> {
        Self::from_state_parts(body.id(), body.mu(), body.radius(), position, velocity, epoch)
    }

    pub fn from_state_parts(
        body: BodyId,
        mu: f64,
        body_radius: f64,
        position: Vector3,
        velocity: Vector3,
        epoch: f64,
    ) -> Result<Self, OrbitError> {
        if !(mu > 0.0 && mu.is_finite()) {
            return Err(OrbitError::InvalidMu(mu));
        }
        if !vector::is_finite(&position) || !vector::is_finite(&velocity) || !epoch.is_finite() {
            return Err(OrbitError::NonFinite);
        }
        let r = vector::norm(&position);
        if r < 1.0e-9 {
            return Err(OrbitError::ZeroRadius);
        }

        let h_vec = vector::cross(&position, &velocity);
        let h = vector::norm(&h_vec);
        if h <= 1.0e-12 * r * vector::norm(&velocity).max(1.0) {
            return Err(OrbitError::Radial);
        }

        let v2 = vector::dot(&velocity, &velocity);
        let rv = vector::dot(&position, &velocity);
        let e_vec = vector::scale(
            &vector::sub(
                &vector::scale(&position, v2 - mu / r),
                &vector::scale(&velocity, rv),
            ),
            1.0 / mu,
        );
        let eccentricity = vector::norm(&e_vec);
        if (eccentricity - 1.0).abs() < PARABOLIC_BAND {
            return Err(OrbitError::Parabolic(eccentricity));
        }

        let energy = 0.5 * v2 - mu / r;
        let semi_major_axis = -mu / (2.0 * energy);
        let semi_latus_rectum = h * h / mu;
        let normal = vector::scale(&h_vec, 1.0 / h);
        let p_hat = if eccentricity > CIRCULAR_EPSILON {
            vector::scale(&e_vec, 1.0 / eccentricity)
        } else {
            vector::scale(&position, 1.0 / r)
        };
        let q_hat = vector::cross(&normal, &p_hat);
        let true_anomaly = vector::dot(&position, &q_hat).atan2(vector::dot(&position, &p_hat));

        Ok(Self {
            body,
            mu,
            body_radius,
            epoch,
            eccentricity,
            semi_major_axis,
            semi_latus_rectum,
            mean_motion: (mu / semi_major_axis.abs().powi(3)).sqrt(),
            mean_anomaly_at_epoch: mean_anomaly_from_true(eccentricity, true_anomaly),
            p_hat,
            q_hat,
            normal,
            patch_end_ut: None,
        })
    }

    /// Mark this orbit as a patch that ends (sphere-of-influence change) at `ut`.
    pub fn with_patch_end(mut self, ut: f64) -> Self {
        self.patch_end_ut = Some(ut);
        self
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Semi-major axis (m); negative for hyperbolic orbits.
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_latus_rectum
    }

    fn is_closed(&self) -> bool {
        self.eccentricity < 1.0
    }

    fn periapsis_radius(&self) -> f64 {
        self.semi_latus_rectum / (1.0 + self.eccentricity)
    }

    fn apoapsis_radius(&self) -> Option<f64> {
        self.is_closed()
            .then(|| self.semi_latus_rectum / (1.0 - self.eccentricity))
    }

    fn true_anomaly_at(&self, ut: f64) -> f64 {
        let e = self.eccentricity;
        let mean_anomaly = self.mean_anomaly_at_epoch + self.mean_motion * (ut - self.epoch);
        if self.is_closed() {
            let ecc_anomaly = solve_elliptic_kepler(mean_anomaly.rem_euclid(TAU), e);
            ((1.0 - e * e).sqrt() * ecc_anomaly.sin()).atan2(ecc_anomaly.cos() - e)
        } else {
            let hyp_anomaly = solve_hyperbolic_kepler(mean_anomaly, e);
            2.0 * (((e + 1.0) / (e - 1.0)).sqrt() * (0.5 * hyp_anomaly).tanh()).atan()
        }
    }

    /// Earliest time at or after `ut` at which the orbit passes `true_anomaly`.
    fn time_of_true_anomaly_after(&self, true_anomaly: f64, ut: f64) -> Option<f64> {
        let mean_anomaly = mean_anomaly_from_true(self.eccentricity, true_anomaly);
        let t = self.epoch + (mean_anomaly - self.mean_anomaly_at_epoch) / self.mean_motion;
        if self.is_closed() {
            let period = TAU / self.mean_motion;
            Some(ut + (t - ut).rem_euclid(period))
        } else {
            (t >= ut).then_some(t)
        }
    }
}

impl OrbitModel for ConicOrbit {
    fn reference_body(&self) -> BodyId {
        self.body
    }

    fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    fn inclination_deg(&self) -> f64 {
        self.normal[2].clamp(-1.0, 1.0).acos().to_degrees()
    }

    fn periapsis_altitude(&self) -> f64 {
        self.periapsis_radius() - self.body_radius
    }

    fn apoapsis_altitude(&self) -> Option<f64> {
        self.apoapsis_radius().map(|ra| ra - self.body_radius)
    }

    fn period(&self) -> Option<f64> {
        self.is_closed().then(|| TAU / self.mean_motion)
    }

    fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    fn orbit_normal(&self) -> Vector3 {
        self.normal
    }

    fn position_at(&self, ut: f64) -> Vector3 {
        let nu = self.true_anomaly_at(ut);
        let r = self.semi_latus_rectum / (1.0 + self.eccentricity * nu.cos());
        vector::add(
            &vector::scale(&self.p_hat, r * nu.cos()),
            &vector::scale(&self.q_hat, r * nu.sin()),
        )
    }

    fn velocity_at(&self, ut: f64) -> Vector3 {
        let nu = self.true_anomaly_at(ut);
        let k = (self.mu / self.semi_latus_rectum).sqrt();
        vector::add(
            &vector::scale(&self.p_hat, -k * nu.sin()),
            &vector::scale(&self.q_hat, k * (self.eccentricity + nu.cos())),
        )
    }

    fn next_time_of_radius(&self, ut: f64, radius: f64) -> Option<f64> {
        if !(radius > 0.0 && radius.is_finite()) {
            return None;
        }
        let rp = self.periapsis_radius();
        if radius < rp * (1.0 - 1.0e-12) {
            return None;
        }
        if let Some(ra) = self.apoapsis_radius() {
            if radius > ra * (1.0 + 1.0e-12) {
                return None;
            }
        }
        if self.eccentricity < CIRCULAR_EPSILON {
            // Every point of a circular orbit sits at the periapsis radius.
            return Some(ut);
        }

        let cos_nu = ((self.semi_latus_rectum / radius - 1.0) / self.eccentricity).clamp(-1.0, 1.0);
        let nu = cos_nu.acos();
        [nu, -nu]
            .into_iter()
            .filter_map(|candidate| self.time_of_true_anomaly_after(candidate, ut))
            .min_by(f64::total_cmp)
    }

    fn patch_end_ut(&self) -> Option<f64> {
        self.patch_end_ut
    }
}

fn mean_anomaly_from_true(e: f64, true_anomaly: f64) -> f64 {
    let (sin_nu, cos_nu) = true_anomaly.sin_cos();
    if e < 1.0 {
        let ecc_anomaly = ((1.0 - e * e).sqrt() * sin_nu).atan2(e + cos_nu);
        ecc_anomaly - e * ecc_anomaly.sin()
    } else {
        let hyp_anomaly = ((e * e - 1.0).sqrt() * sin_nu / (1.0 + e * cos_nu)).asinh();
        e * hyp_anomaly.sinh() - hyp_anomaly
    }
}

/// Solve `E - e sin E = M` for `M` in `[0, 2π)`.
fn solve_elliptic_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc_anomaly = if e < 0.8 { mean_anomaly } else { PI };
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = ecc_anomaly - e * ecc_anomaly.sin() - mean_anomaly;
        let step = f / (1.0 - e * ecc_anomaly.cos());
        ecc_anomaly -= step;
        if step.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    ecc_anomaly
}

/// Solve `e sinh H - H = M`.
fn solve_hyperbolic_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut hyp_anomaly = (mean_anomaly / e).asinh();
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = e * hyp_anomaly.sinh() - hyp_anomaly - mean_anomaly;
        let step = f / (e * hyp_anomaly.cosh() - 1.0);
        hyp_anomaly -= step;
        if step.abs() < KEPLER_TOLERANCE * hyp_anomaly.abs().max(1.0) {
            break;
        }
    }
    hyp_anomaly
}

#[cfg(test)]
mod tests {
    use super::*;

    const MU: f64 = 3.5316e12;
    const RADIUS: f64 = 600_000.0;

    fn orbit(position: Vector3, velocity: Vector3) -> ConicOrbit {
        ConicOrbit::from_state_parts(BodyId(1), MU, RADIUS, position, velocity, 0.0).unwrap()
    }

    fn assert_close(a: &Vector3, b: &Vector3, tol: f64) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < tol, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn state_vector_is_reproduced_at_epoch() {
        let r = [700_000.0, 50_000.0, 10_000.0];
        let v = [-150.0, 2_300.0, 120.0];
        let o = orbit(r, v);
        assert_close(&o.position_at(0.0), &r, 1e-4);
        assert_close(&o.velocity_at(0.0), &v, 1e-7);
    }

    #[test]
    fn circular_orbit_closes_after_one_period() {
        let r = 700_000.0;
        let speed = (MU / r).sqrt();
        let o = orbit([r, 0.0, 0.0], [0.0, speed, 0.0]);
        assert!(o.eccentricity() < 1e-9);
        let period = o.period().unwrap();
        assert_close(&o.position_at(period), &[r, 0.0, 0.0], 1e-3);
        assert_close(&o.position_at(0.25 * period), &[0.0, r, 0.0], 1e-3);
        assert!(o.inclination_deg().abs() < 1e-9);
    }

    #[test]
    fn time_of_radius_lands_on_requested_radius() {
        let o = orbit([610_000.0, 0.0, 0.0], [0.0, 1_500.0, 0.0]);
        assert!(o.periapsis_altitude() < 0.0);
        let t = o.next_time_of_radius(0.0, RADIUS).unwrap();
        assert!(t > 0.0);
        let r = vector::norm(&o.position_at(t));
        assert!((r - RADIUS).abs() < 1e-3, "r = {r}");
    }

    #[test]
    fn unreachable_radius_has_no_time() {
        let o = orbit([610_000.0, 0.0, 0.0], [0.0, 1_500.0, 0.0]);
        // The starting point is the apoapsis.
        assert!(o.next_time_of_radius(0.0, 650_000.0).is_none());
        assert!(o.next_time_of_radius(0.0, 10.0).is_none());
    }

    #[test]
    fn outbound_hyperbola_never_returns_inward() {
        let r = 700_000.0;
        let escape = (2.0 * MU / r).sqrt();
        let o = orbit([r, 0.0, 0.0], [800.0, escape * 1.2, 0.0]);
        assert!(o.eccentricity() > 1.0);
        assert!(o.period().is_none());
        assert!(o.next_time_of_radius(0.0, 690_000.0).is_none());
        let t = o.next_time_of_radius(0.0, 2_000_000.0).unwrap();
        let reached = vector::norm(&o.position_at(t));
        assert!((reached - 2_000_000.0).abs() < 1e-2, "reached = {reached}");
    }

    #[test]
    fn radial_states_are_rejected() {
        let err = ConicOrbit::from_state_parts(
            BodyId(1),
            MU,
            RADIUS,
            [610_000.0, 0.0, 0.0],
            [-50.0, 0.0, 0.0],
            0.0,
        )
        .unwrap_err();
        assert_eq!(err, OrbitError::Radial);
    }
}
