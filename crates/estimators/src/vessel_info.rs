//! Descriptive vessel and orbit readouts.

use serde::Serialize;
use telemetry_core::units::gees_to_ms2;
use telemetry_core::vector;
use telemetry_orbits::{OrbitModel, ReferenceBody};
use telemetry_staging::GravityContext;

use crate::outcome::{Estimate, NotApplicable, finite};
use crate::state::VesselState;

/// Burn time for the next maneuver node at full thrust.
pub fn node_burn_time(vessel: &VesselState) -> Estimate<f64> {
    let burn = vessel.next_node_burn.ok_or(NotApplicable::NoManeuverNode)?;
    finite("node burn time", vector::norm(&burn) / vessel.max_thrust_accel)
}

/// Available thrust over weight. In the editor the weight is taken at 1 g.
pub fn surface_twr(vessel: &VesselState, context: GravityContext) -> Estimate<f64> {
    let weight_kn = vessel.mass_t * gees_to_ms2(context.gee_asl());
    finite("thrust-to-weight ratio", vessel.thrust_available_kn / weight_kn)
}

pub fn vessel_mass(vessel: &VesselState) -> Estimate<f64> {
    finite("vessel mass", vessel.mass_t)
}

pub fn max_thrust(vessel: &VesselState) -> Estimate<f64> {
    finite("max thrust", vessel.thrust_available_kn)
}

pub fn min_thrust(vessel: &VesselState) -> Estimate<f64> {
    finite("min thrust", vessel.thrust_minimum_kn)
}

pub fn max_acceleration(vessel: &VesselState) -> Estimate<f64> {
    finite("max acceleration", vessel.thrust_available_kn / vessel.mass_t)
}

pub fn min_acceleration(vessel: &VesselState) -> Estimate<f64> {
    finite("min acceleration", vessel.thrust_minimum_kn / vessel.mass_t)
}

/// Acceleration at the current throttle setting.
pub fn current_acceleration(vessel: &VesselState) -> Estimate<f64> {
    let thrust = vessel.thrust_minimum_kn
        + vessel.throttle * (vessel.thrust_available_kn - vessel.thrust_minimum_kn);
    finite("current acceleration", thrust / vessel.mass_t)
}

pub fn drag_coefficient(vessel: &VesselState) -> Estimate<f64> {
    finite("drag coefficient", vessel.mass_drag / vessel.mass_t)
}

/// Static pressure at the vessel's altitude.
pub fn atmospheric_pressure<B>(vessel: &VesselState, body: &B) -> Estimate<f64>
where
    B: ReferenceBody + ?Sized,
{
    let atmosphere = body.atmosphere().ok_or(NotApplicable::NoAtmosphere)?;
    Ok(atmosphere.pressure_atm(vessel.altitude(body)))
}

/// Magnitude of the drag acceleration against orbital velocity (m/s²).
pub fn atmospheric_drag<B>(vessel: &VesselState, body: &B) -> Estimate<f64>
where
    B: ReferenceBody + ?Sized,
{
    let atmosphere = body.atmosphere().ok_or(NotApplicable::NoAtmosphere)?;
    let cd = drag_coefficient(vessel)?;
    let drag = atmosphere.drag_acceleration(vessel.altitude(body), &vessel.velocity_orbit, cd);
    finite("atmospheric drag", vector::norm(&drag))
}

pub fn time_to_soi_transition<O>(orbit: &O, now: f64) -> Estimate<f64>
where
    O: OrbitModel + ?Sized,
{
    let end = orbit.patch_end_ut().ok_or(NotApplicable::FinalPatch)?;
    finite("time to SoI transition", end - now)
}

pub fn surface_gravity<B: ReferenceBody + ?Sized>(body: &B) -> f64 {
    gees_to_ms2(body.gee_asl())
}

/// Latitude and longitude of the vessel over `body`, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

/// Body-fixed coordinates below the vessel. Longitude is measured from the
/// body's +x axis towards +y, matching the terrain model.
pub fn coordinates<B>(vessel: &VesselState, body: &B) -> Estimate<Coordinates>
where
    B: ReferenceBody + ?Sized,
{
    let position = vessel.body_relative_position(body);
    let r = vector::norm(&position);
    let latitude_deg = finite("latitude", (position[2] / r).asin().to_degrees())?;
    let longitude_deg = finite("longitude", position[1].atan2(position[0]).to_degrees())?;
    Ok(Coordinates {
        latitude_deg,
        longitude_deg,
    })
}

/// Speed of a circular orbit at the vessel's current radius.
pub fn circular_orbit_speed<B>(vessel: &VesselState, body: &B) -> Estimate<f64>
where
    B: ReferenceBody + ?Sized,
{
    let r = vector::norm(&vessel.body_relative_position(body));
    finite("circular orbit speed", (body.mu() / r).sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrbitSummary {
    Closed {
        periapsis_m: f64,
        apoapsis_m: f64,
        inclination_deg: f64,
    },
    Hyperbolic {
        periapsis_m: f64,
        inclination_deg: f64,
    },
}

pub fn orbit_summary<O: OrbitModel + ?Sized>(orbit: &O) -> OrbitSummary {
    let periapsis_m = orbit.periapsis_altitude();
    let inclination_deg = orbit.inclination_deg();
    match orbit.apoapsis_altitude() {
        Some(apoapsis_m) => OrbitSummary::Closed {
            periapsis_m,
            apoapsis_m,
            inclination_deg,
        },
        None => OrbitSummary::Hyperbolic {
            periapsis_m,
            inclination_deg,
        },
    }
}

#[cfg(test)]
mod tests {
    use telemetry_atmosphere::Atmosphere;
    use telemetry_core::constants::G0;
    use telemetry_orbits::{BodyId, CelestialBody};

    use super::*;

    fn kerbin() -> CelestialBody {
        CelestialBody::new(BodyId(1), "Kerbin", 600_000.0, 3.5316e12)
    }

    fn vessel(body: &CelestialBody) -> VesselState {
        let mut vessel =
            VesselState::coasting(body, 0.0, [605_000.0, 0.0, 0.0], [0.0, 200.0, 0.0], 10.0);
        vessel.thrust_available_kn = 200.0;
        vessel.thrust_minimum_kn = 50.0;
        vessel.throttle = 0.5;
        vessel.mass_drag = 2.0;
        vessel.max_thrust_accel = 20.0;
        vessel
    }

    #[test]
    fn accelerations_follow_throttle() {
        let body = kerbin();
        let vessel = vessel(&body);
        assert_eq!(max_acceleration(&vessel), Ok(20.0));
        assert_eq!(min_acceleration(&vessel), Ok(5.0));
        assert_eq!(current_acceleration(&vessel), Ok(12.5));
    }

    #[test]
    fn mass_and_thrust_come_straight_from_the_snapshot() {
        let body = kerbin();
        let vessel = vessel(&body);
        assert_eq!(vessel_mass(&vessel), Ok(10.0));
        assert_eq!(max_thrust(&vessel), Ok(200.0));
        assert_eq!(min_thrust(&vessel), Ok(50.0));
    }

    #[test]
    fn coordinates_follow_body_relative_position() {
        let body = kerbin();
        let mut vessel = vessel(&body);
        let equator = coordinates(&vessel, &body).unwrap();
        assert_eq!(equator.latitude_deg, 0.0);
        assert_eq!(equator.longitude_deg, 0.0);

        vessel.com = [0.0, -300_000.0, 300_000.0];
        let north_west = coordinates(&vessel, &body).unwrap();
        assert!((north_west.latitude_deg - 45.0).abs() < 1e-9);
        assert!((north_west.longitude_deg + 90.0).abs() < 1e-9);

        vessel.com = [0.0; 3];
        assert!(coordinates(&vessel, &body).unwrap_err().is_degenerate());
    }

    #[test]
    fn massless_vessel_is_degenerate() {
        let body = kerbin();
        let mut vessel = vessel(&body);
        vessel.mass_t = 0.0;
        assert!(max_acceleration(&vessel).unwrap_err().is_degenerate());
    }

    #[test]
    fn editor_twr_uses_one_gee() {
        let body = kerbin();
        let vessel = vessel(&body);
        let twr = surface_twr(&vessel, GravityContext::Editor).unwrap();
        assert!((twr - 200.0 / (10.0 * G0)).abs() < 1e-12);
    }

    #[test]
    fn node_burn_time_needs_a_node() {
        let body = kerbin();
        let mut vessel = vessel(&body);
        assert_eq!(node_burn_time(&vessel), Err(NotApplicable::NoManeuverNode));
        vessel.next_node_burn = Some([30.0, 40.0, 0.0]);
        assert_eq!(node_burn_time(&vessel), Ok(2.5));
    }

    #[test]
    fn drag_uses_stock_area_per_tonne() {
        let body = kerbin().with_atmosphere(Atmosphere::new(1.0, 5_000.0).unwrap());
        let vessel = vessel(&body);
        let rho = (-1.0f64).exp() * telemetry_core::constants::DENSITY_PER_ATM;
        let expected = 0.5 * rho * 200.0 * 200.0 * 0.2 * 0.008;
        let drag = atmospheric_drag(&vessel, &body).unwrap();
        assert!((drag - expected).abs() < 1e-9, "{drag} vs {expected}");
        assert_eq!(atmospheric_pressure(&vessel, &kerbin()), Err(NotApplicable::NoAtmosphere));
    }
}
