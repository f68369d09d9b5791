//! Time until the orbit meets the terrain.
//!
//! The terrain radius under the impact point depends on where the vessel comes
//! down, which depends on the impact time being solved for. The estimator
//! resolves this by fixed-point iteration: sample the position at the current
//! guess, look up the terrain radius there, and ask the orbit when it next
//! reaches that radius. The default budget is 10 rounds with no convergence
//! test, which is an approximation rather than a guarantee; terrain varies
//! slowly relative to orbital motion so it is normally converged well before.

use telemetry_config::ImpactSettings;
use telemetry_orbits::{OrbitModel, ReferenceBody};

use crate::outcome::{Estimate, NotApplicable, finite};

/// Bounded fixed-point solver for the terrain impact time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactTimeEstimator {
    max_iterations: usize,
    tolerance_s: Option<f64>,
}

impl Default for ImpactTimeEstimator {
    fn default() -> Self {
        Self::from_settings(&ImpactSettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactPrediction {
    /// Seconds from `now` until impact.
    pub time_to_impact: f64,
    pub impact_ut: f64,
    /// Rounds actually run.
    pub iterations: usize,
    /// Whether the last correction fell within tolerance (exactly zero when no
    /// tolerance is configured).
    pub converged: bool,
    /// Size of the final update to the impact time (s).
    pub last_correction: f64,
}

impl ImpactTimeEstimator {
    /// Run `max_iterations` rounds (at least one), stopping early once an update
    /// is smaller than `tolerance_s` when a tolerance is given.
    pub fn new(max_iterations: usize, tolerance_s: Option<f64>) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
            tolerance_s,
        }
    }

    pub fn from_settings(settings: &ImpactSettings) -> Self {
        Self::new(settings.max_iterations, settings.tolerance_s)
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance_s(&self) -> Option<f64> {
        self.tolerance_s
    }

    /// Predict the impact starting from `now`.
    pub fn estimate<O, B>(&self, orbit: &O, body: &B, now: f64) -> Estimate<ImpactPrediction>
    where
        O: OrbitModel + ?Sized,
        B: ReferenceBody + ?Sized,
    {
        self.refine(orbit, body, now, now)
    }

    /// Predict the impact using `seed` as the first guess. Radius crossings are
    /// still searched forward from `now`.
    pub fn refine<O, B>(
        &self,
        orbit: &O,
        body: &B,
        now: f64,
        seed: f64,
    ) -> Estimate<ImpactPrediction>
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
        finite("seed time", seed)?;

        let mut t = seed;
        let mut last_correction = f64::INFINITY;
        let mut iterations = 0;
        let mut converged = false;
        while iterations < self.max_iterations {
            iterations += 1;
            let position = orbit.position_at(t);
            let radius_m = body.terrain_radius(&position);
            let next = orbit
                .next_time_of_radius(now, radius_m)
                .ok_or(NotApplicable::RadiusNotReached { radius_m })?;
            last_correction = (next - t).abs();
            t = next;
            tracing::trace!(round = iterations, ut = t, radius_m, "impact iteration");

            converged = match self.tolerance_s {
                Some(tolerance) => last_correction < tolerance,
                None => last_correction == 0.0,
            };
            if converged && self.tolerance_s.is_some() {
                break;
            }
        }

        let time_to_impact = finite("time to impact", t - now)?;
        tracing::debug!(
            time_to_impact,
            iterations,
            converged,
            last_correction,
            "impact time estimated"
        );
        Ok(ImpactPrediction {
            time_to_impact,
            impact_ut: t,
            iterations,
            converged,
            last_correction,
        })
    }
}
