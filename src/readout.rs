//! Evaluates every info item for one snapshot and packages the results.

use telemetry_estimators::catalog::{self, InfoItem};
use telemetry_estimators::outcome::{Estimate, NotApplicable};
use telemetry_estimators::vessel_info::{self, OrbitSummary};
use telemetry_estimators::{Estimators, Rendezvous, Snapshot};
use telemetry_export::report::{NamedReading, Reading, TelemetryReport};
use telemetry_staging::{GravityContext, StageSummary};

/// One evaluated info item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadoutEntry {
    pub item: InfoItem,
    pub value: Estimate<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub ut: f64,
    pub entries: Vec<ReadoutEntry>,
}

impl Readout {
    pub fn get(&self, id: &str) -> Option<&Estimate<f64>> {
        self.entries
            .iter()
            .find(|entry| entry.item.id == id)
            .map(|entry| &entry.value)
    }
}

fn entry(item: InfoItem, value: Estimate<f64>) -> ReadoutEntry {
    if let Err(reason) = &value {
        tracing::trace!(item = item.id, reason = %reason, "not applicable");
    }
    ReadoutEntry { item, value }
}

/// Evaluate every catalog item against `snapshot`, in catalog display order.
pub fn evaluate(
    snapshot: Snapshot<'_>,
    estimators: &Estimators,
    gravity: GravityContext,
) -> Readout {
    let Snapshot {
        vessel,
        orbit,
        body,
        ..
    } = snapshot;
    let now = vessel.ut;
    let rendezvous = Rendezvous::new(snapshot, estimators.approach);
    let summary = vessel_info::orbit_summary(orbit);
    let closest = rendezvous.closest_approach();
    let docking_velocity = rendezvous.relative_velocity_axes();
    let docking_position = rendezvous.relative_position_axes();

    let impact = estimators
        .impact
        .estimate(orbit, body, now)
        .map(|prediction| prediction.time_to_impact);
    let countdown = estimators
        .suicide_burn
        .estimate(vessel, orbit, body)
        .map(|burn| burn.countdown_s);
    let apoapsis = match summary {
        OrbitSummary::Closed { apoapsis_m, .. } => Ok(apoapsis_m),
        OrbitSummary::Hyperbolic { .. } => Err(NotApplicable::OpenOrbit),
    };

    let coordinates = vessel_info::coordinates(vessel, body);

    let entries = vec![
        entry(catalog::PERIAPSIS, Ok(orbit.periapsis_altitude())),
        entry(catalog::APOAPSIS, apoapsis),
        entry(catalog::INCLINATION, Ok(orbit.inclination_deg())),
        entry(
            catalog::CIRCULAR_ORBIT_SPEED,
            vessel_info::circular_orbit_speed(vessel, body),
        ),
        entry(
            catalog::TIME_TO_SOI_TRANSITION,
            vessel_info::time_to_soi_transition(orbit, now),
        ),
        entry(catalog::LATITUDE, coordinates.map(|c| c.latitude_deg)),
        entry(catalog::LONGITUDE, coordinates.map(|c| c.longitude_deg)),
        entry(catalog::SURFACE_GRAVITY, Ok(vessel_info::surface_gravity(body))),
        entry(catalog::VESSEL_MASS, vessel_info::vessel_mass(vessel)),
        entry(catalog::MAX_THRUST, vessel_info::max_thrust(vessel)),
        entry(catalog::MIN_THRUST, vessel_info::min_thrust(vessel)),
        entry(catalog::SURFACE_TWR, vessel_info::surface_twr(vessel, gravity)),
        entry(catalog::MAX_ACCELERATION, vessel_info::max_acceleration(vessel)),
        entry(catalog::MIN_ACCELERATION, vessel_info::min_acceleration(vessel)),
        entry(
            catalog::CURRENT_ACCELERATION,
            vessel_info::current_acceleration(vessel),
        ),
        entry(catalog::DRAG_COEFFICIENT, vessel_info::drag_coefficient(vessel)),
        entry(
            catalog::ATMOSPHERIC_DRAG,
            vessel_info::atmospheric_drag(vessel, body),
        ),
        entry(catalog::TARGET_DISTANCE, rendezvous.distance()),
        entry(catalog::RELATIVE_SPEED, rendezvous.relative_speed()),
        entry(
            catalog::TIME_TO_CLOSEST_APPROACH,
            closest.map(|approach| approach.time_to_approach),
        ),
        entry(
            catalog::CLOSEST_APPROACH_DISTANCE,
            closest.map(|approach| approach.distance),
        ),
        entry(catalog::SYNODIC_PERIOD, rendezvous.synodic_period()),
        entry(catalog::PHASE_ANGLE, rendezvous.phase_angle()),
        entry(catalog::DOCKING_VELOCITY_RIGHT, docking_velocity.map(|v| v.right)),
        entry(catalog::DOCKING_VELOCITY_FORWARD, docking_velocity.map(|v| v.forward)),
        entry(catalog::DOCKING_VELOCITY_UP, docking_velocity.map(|v| v.up)),
        entry(catalog::DOCKING_POSITION_RIGHT, docking_position.map(|p| p.right)),
        entry(catalog::DOCKING_POSITION_FORWARD, docking_position.map(|p| p.forward)),
        entry(catalog::DOCKING_POSITION_UP, docking_position.map(|p| p.up)),
        entry(catalog::TIME_TO_IMPACT, impact),
        entry(catalog::SUICIDE_BURN_COUNTDOWN, countdown),
        entry(
            catalog::ATMOSPHERIC_PRESSURE,
            vessel_info::atmospheric_pressure(vessel, body),
        ),
        entry(catalog::NODE_BURN_TIME, vessel_info::node_burn_time(vessel)),
    ];

    Readout { ut: now, entries }
}

/// Package a readout and stage rows into an exportable report.
pub fn to_report(scenario: &str, readout: &Readout, stages: Vec<StageSummary>) -> TelemetryReport {
    let mut report = TelemetryReport::new(scenario, readout.ut);
    report.readings = readout
        .entries
        .iter()
        .map(|entry| NamedReading {
            id: entry.item.id,
            label: entry.item.label,
            category: entry.item.category,
            reading: match entry.value {
                Ok(value) => Reading::value(value, entry.item.unit.symbol()),
                Err(reason) => Reading::not_applicable(reason.code()),
            },
        })
        .collect();
    report.stages = stages;
    report
}
