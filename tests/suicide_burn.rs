mod common;

use common::{KERBIN_RADIUS, RadialDescent, flat_body};
use vessel_telemetry::estimators::{
    NotApplicable, SuicideBurnEstimator, VesselState, effective_deceleration,
};
use vessel_telemetry::orbits::ConicOrbit;

const G: f64 = 9.81;

fn vertical_descent() -> RadialDescent {
    RadialDescent::new(KERBIN_RADIUS, 10_000.0, 50.0, -KERBIN_RADIUS)
}

#[test]
fn vertical_descent_countdown_leaves_half_the_burn_before_impact() {
    let descent = vertical_descent();
    let vessel = descent.vessel(G, 2.0 * G);
    let burn = SuicideBurnEstimator
        .estimate(&vessel, &descent, &flat_body())
        .expect("burn is possible");

    assert!((burn.deceleration - G).abs() < 1e-9);
    assert!((burn.burn_duration - 50.0 / G).abs() < 1e-9);
    assert!((burn.impact_ut - 200.0).abs() < 1e-9);
    let expected = 200.0 - 25.0 / G;
    assert!((burn.countdown_s - expected).abs() < 1e-4, "{burn:?}");
    assert!((burn.countdown_s - 197.4516).abs() < 1e-4);
}

#[test]
fn hover_thrust_is_not_enough_to_stop() {
    let descent = vertical_descent();
    let vessel = descent.vessel(G, G);
    let err = SuicideBurnEstimator
        .estimate(&vessel, &descent, &flat_body())
        .unwrap_err();
    assert!(matches!(err, NotApplicable::InsufficientThrust { .. }));
}

#[test]
fn hover_thrust_leaves_no_deceleration_at_any_flight_path_angle() {
    for degrees in [0.0f64, 15.0, 45.0, 80.0, 90.0] {
        let decel = effective_deceleration(G, G, degrees.to_radians().sin());
        assert!(decel.abs() < 1e-12, "{degrees}° -> {decel}");
    }

    // Same outcome on a trajectory with a horizontal velocity component.
    let body = flat_body();
    let position = [700_000.0, 0.0, 0.0];
    let velocity = [-3_500.0, 500.0, 0.0];
    let orbit = ConicOrbit::from_state(&body, position, velocity, 0.0).expect("hyperbola");
    let mut vessel = VesselState::coasting(&body, 0.0, position, velocity, 1.0);
    vessel.max_thrust_accel = vessel.local_g;
    let err = SuicideBurnEstimator
        .estimate(&vessel, &orbit, &body)
        .unwrap_err();
    assert!(matches!(err, NotApplicable::InsufficientThrust { .. }));
}

#[test]
fn thrust_below_gravity_is_not_applicable() {
    let descent = vertical_descent();
    let vessel = descent.vessel(G, 0.5 * G);
    let err = SuicideBurnEstimator
        .estimate(&vessel, &descent, &flat_body())
        .unwrap_err();
    assert!(matches!(
        err,
        NotApplicable::InsufficientThrust { thrust_accel, gravity }
            if thrust_accel < gravity
    ));
    assert!(!err.is_degenerate());
}

#[test]
fn motionless_vessel_has_no_countdown() {
    let resting = RadialDescent::new(KERBIN_RADIUS, 10_000.0, 0.0, -KERBIN_RADIUS);
    let vessel = resting.vessel(G, 2.0 * G);
    let err = SuicideBurnEstimator
        .estimate(&vessel, &resting, &flat_body())
        .unwrap_err();
    assert_eq!(err, NotApplicable::NoVelocity);
}

#[test]
fn periapsis_above_ground_skips_the_estimate() {
    let passing = RadialDescent::new(KERBIN_RADIUS, 10_000.0, 50.0, 1_000.0);
    let vessel = passing.vessel(G, 2.0 * G);
    let err = SuicideBurnEstimator
        .estimate(&vessel, &passing, &flat_body())
        .unwrap_err();
    assert!(matches!(err, NotApplicable::NoTerrainIntersection { .. }));
}

#[test]
fn fast_hyperbolic_arrival_is_already_too_late() {
    let body = flat_body();
    let position = [700_000.0, 0.0, 0.0];
    let velocity = [-3_500.0, 500.0, 0.0];
    let orbit = ConicOrbit::from_state(&body, position, velocity, 0.0).expect("hyperbola");
    let mut vessel = VesselState::coasting(&body, 0.0, position, velocity, 1.0);
    vessel.max_thrust_accel = 30.0;

    let burn = SuicideBurnEstimator
        .estimate(&vessel, &orbit, &body)
        .expect("burn is possible");
    assert!(burn.burn_duration > 0.0);
    assert!(burn.countdown_s < 0.0, "{burn:?}");
}
