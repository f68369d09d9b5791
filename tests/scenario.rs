use vessel_telemetry::config::{EstimatorSettings, load_bodies, load_settings};
use vessel_telemetry::estimators::{Estimators, NotApplicable, catalog};
use vessel_telemetry::orbits::ReferenceBody;
use vessel_telemetry::readout;
use vessel_telemetry::scenario::{ScenarioError, build_bodies, load_scenario};
use vessel_telemetry::staging::GravityContext;

fn bodies() -> Vec<vessel_telemetry::orbits::CelestialBody> {
    let configs = load_bodies("configs/bodies").expect("body catalog");
    build_bodies(&configs).expect("bodies")
}

#[test]
fn body_catalog_loads_in_file_order() {
    let bodies = bodies();
    let names: Vec<_> = bodies.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Kerbin", "Mun", "Minmus"]);
    assert!(bodies[0].atmosphere().is_some());
    assert!(bodies[1].atmosphere().is_none());
    assert!((bodies[0].gee_asl() - 1.00034).abs() < 1e-9);
}

#[test]
fn shipped_settings_match_the_defaults() {
    let settings = load_settings("configs/estimators.toml").expect("settings");
    assert_eq!(settings, EstimatorSettings::default());
}

#[test]
fn rendezvous_scenario_reads_target_ahead() {
    let bodies = bodies();
    let scenario = load_scenario("scenarios/kerbin_rendezvous.yaml", &bodies).expect("scenario");
    assert!(scenario.target.is_some());

    let gravity = GravityContext::Flight {
        gee_asl: scenario.body.gee_asl,
    };
    let readout = readout::evaluate(scenario.snapshot(), &Estimators::default(), gravity);
    let ids: Vec<_> = readout.entries.iter().map(|entry| entry.item.id).collect();
    let catalog_ids: Vec<_> = catalog::ALL.iter().map(|item| item.id).collect();
    assert_eq!(ids, catalog_ids);
    assert!(readout.get("vessel_mass").expect("mass item").is_ok());
    assert!(readout.get("latitude").expect("latitude item").is_ok());

    let phase = readout.get("phase_angle").expect("phase item").expect("phase value");
    assert!((phase - 60.0).abs() < 1e-6, "phase {phase}");
    let distance = readout.get("target_distance").expect("item").expect("value");
    // Chord between 700 km and 900 km radii 60 degrees apart.
    let expected = (700_000f64.powi(2) + 900_000f64.powi(2) - 700_000.0 * 900_000.0).sqrt();
    assert!((distance - expected).abs() < 1e-3);

    assert!(matches!(
        readout.get("time_to_impact"),
        Some(Err(NotApplicable::NoTerrainIntersection { .. }))
    ));
    let soi = readout.get("time_to_soi_transition").expect("item").expect("value");
    assert!((soi - 86_400.0).abs() < 1e-9);
    let burn = readout.get("node_burn_time").expect("item").expect("value");
    assert!((burn - 120.0 / 20.0).abs() < 1e-9);
    assert!(readout.get("synodic_period").expect("item").is_ok());
}

#[test]
fn mun_descent_predicts_an_impact_and_a_burn() {
    let bodies = bodies();
    let scenario = load_scenario("scenarios/mun_descent.yaml", &bodies).expect("scenario");
    assert!(scenario.target.is_none());
    assert_eq!(scenario.vehicle.as_ref().map(|v| v.stages().len()), Some(2));

    let readout = readout::evaluate(
        scenario.snapshot(),
        &Estimators::default(),
        GravityContext::Editor,
    );
    let impact = readout.get("time_to_impact").expect("item").expect("impact");
    let countdown = readout
        .get("suicide_burn_countdown")
        .expect("item")
        .expect("countdown");
    assert!(impact > 0.0);
    assert!(countdown < impact);
    assert_eq!(
        readout.get("target_distance"),
        Some(&Err(NotApplicable::NoTarget))
    );
    assert_eq!(
        readout.get("atmospheric_pressure"),
        Some(&Err(NotApplicable::NoAtmosphere))
    );
    let twr = readout.get("surface_twr").expect("item").expect("twr");
    assert!((twr - 30.0 / (5.0 * 9.81)).abs() < 1e-9);
}

#[test]
fn report_mirrors_the_readout() {
    let bodies = bodies();
    let scenario = load_scenario("scenarios/mun_descent.yaml", &bodies).expect("scenario");
    let readout = readout::evaluate(
        scenario.snapshot(),
        &Estimators::default(),
        GravityContext::Editor,
    );
    let report = readout::to_report(&scenario.name, &readout, Vec::new());
    assert_eq!(report.scenario, "mun-descent");
    assert_eq!(report.readings.len(), readout.entries.len());
    assert!(report.reading("phase_angle").is_some());
}

#[test]
fn unknown_body_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("eve.yaml");
    std::fs::write(
        &path,
        "name: lost\nbody: Eve\nvessel:\n  position_m: [800000.0, 0.0, 0.0]\n  \
         velocity_m_s: [0.0, 2000.0, 0.0]\n  mass_t: 1.0\n",
    )
    .expect("write scenario");

    let err = load_scenario(&path, &bodies()).unwrap_err();
    assert!(matches!(err, ScenarioError::UnknownBody(ref name) if name == "Eve"));
}
