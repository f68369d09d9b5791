//! Closest-approach search and synodic period between two orbits.

use telemetry_core::vector;

use crate::OrbitModel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    pub ut: f64,
    pub distance: f64,
}

/// Grid-refinement settings for [`closest_approach`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachSearch {
    /// Samples per refinement round.
    pub divisions: usize,
    /// Number of times the window is narrowed around the best sample.
    pub rounds: usize,
    /// Open trajectories are searched over this many radians of mean motion.
    pub hyperbolic_horizon_radians: f64,
}

impl Default for ApproachSearch {
    fn default() -> Self {
        Self {
            divisions: 20,
            rounds: 8,
            hyperbolic_horizon_radians: 100.0,
        }
    }
}

/// Minimum separation between `vessel` and `target` over one vessel period after `ut`
/// (or `hyperbolic_horizon_radians / mean_motion` on open trajectories).
///
/// Each round samples the current window uniformly, then shrinks the window to one
/// sample spacing either side of the best point.
pub fn closest_approach<A, B>(
    vessel: &A,
    target: &B,
    ut: f64,
    search: &ApproachSearch,
) -> ClosestApproach
where
    A: OrbitModel + ?Sized,
    B: OrbitModel + ?Sized,
{
    let mut best = ClosestApproach {
        ut,
        distance: separation(vessel, target, ut),
    };
    let horizon = vessel
        .period()
        .unwrap_or_else(|| search.hyperbolic_horizon_radians / vessel.mean_motion());
    if !(horizon.is_finite() && horizon > 0.0) {
        return best;
    }

    let divisions = search.divisions.max(2);
    let end = ut + horizon;
    let (mut lo, mut hi) = (ut, end);
    for _ in 0..search.rounds.max(1) {
        let dt = (hi - lo) / divisions as f64;
        for i in 0..=divisions {
            let t = lo + dt * i as f64;
            let distance = separation(vessel, target, t);
            if distance < best.distance {
                best = ClosestApproach { ut: t, distance };
            }
        }
        lo = (best.ut - dt).max(ut);
        hi = (best.ut + dt).min(end);
    }
    tracing::trace!(ut = best.ut, distance = best.distance, "closest approach refined");
    best
}

/// `|1 / (1/Pa - s/Pb)|` where `s` is +1 for prograde-aligned orbit normals and -1 otherwise.
///
/// Infinite when both orbits share a period and direction.
pub fn synodic_period<A, B>(a: &A, b: &B) -> Option<f64>
where
    A: OrbitModel + ?Sized,
    B: OrbitModel + ?Sized,
{
    let pa = a.period()?;
    let pb = b.period()?;
    let sense = if vector::dot(&a.orbit_normal(), &b.orbit_normal()) > 0.0 {
        1.0
    } else {
        -1.0
    };
    Some((1.0 / (1.0 / pa - sense / pb)).abs())
}

fn separation<A, B>(a: &A, b: &B, ut: f64) -> f64
where
    A: OrbitModel + ?Sized,
    B: OrbitModel + ?Sized,
{
    vector::norm(&vector::sub(&a.position_at(ut), &b.position_at(ut)))
}
