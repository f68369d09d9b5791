//! Scenario files: a vessel snapshot around a catalog body, with an optional
//! target and vehicle, loaded from YAML.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use telemetry_atmosphere::{Atmosphere, AtmosphereError};
use telemetry_config::{BodyConfig, TerrainConfig};
use telemetry_core::vector::{self, Vector3};
use telemetry_estimators::{Snapshot, TargetState, VesselAxes, VesselState};
use telemetry_orbits::{BodyId, CelestialBody, ConicOrbit, OrbitError, ReferenceBody, Terrain};
use telemetry_propulsion::{PropulsionError, StageDefinition, Vehicle};
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub ut: f64,
    pub body: String,
    pub vessel: VesselConfig,
    #[serde(default)]
    pub target: Option<TargetConfig>,
    #[serde(default)]
    pub vehicle: Option<VehicleConfig>,
}

/// Vessel state relative to the scenario body. Masses in tonnes, thrust in kN.
#[derive(Debug, Deserialize, Clone)]
pub struct VesselConfig {
    pub position_m: Vector3,
    pub velocity_m_s: Vector3,
    /// Defaults to `velocity_m_s` (non-rotating body).
    #[serde(default)]
    pub surface_velocity_m_s: Option<Vector3>,
    pub mass_t: f64,
    #[serde(default)]
    pub thrust_available_kn: f64,
    #[serde(default)]
    pub thrust_minimum_kn: f64,
    #[serde(default)]
    pub throttle: f64,
    #[serde(default)]
    pub mass_drag: f64,
    #[serde(default)]
    pub axes: Option<AxesConfig>,
    #[serde(default)]
    pub next_node_burn_m_s: Option<Vector3>,
    /// Universal time at which the current patch leaves the body's sphere of influence.
    #[serde(default)]
    pub patch_end_ut: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AxesConfig {
    pub right: Vector3,
    pub forward: Vector3,
    pub up: Vector3,
}

/// Target state relative to its body (the vessel's body unless `body` is set).
/// Without a velocity the target is treated as fixed and has no orbit.
#[derive(Debug, Deserialize, Clone)]
pub struct TargetConfig {
    #[serde(default)]
    pub body: Option<String>,
    pub position_m: Vector3,
    #[serde(default)]
    pub velocity_m_s: Option<Vector3>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VehicleConfig {
    pub name: String,
    pub stages: Vec<StageConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StageConfig {
    pub name: String,
    pub dry_mass_t: f64,
    pub propellant_mass_t: f64,
    pub thrust_kn: f64,
    pub isp_vacuum_s: f64,
    #[serde(default)]
    pub isp_atmosphere_s: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read YAML: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("body '{0}' not found in catalog")]
    UnknownBody(String),
    #[error("invalid body '{name}': {source}")]
    Atmosphere {
        name: String,
        #[source]
        source: AtmosphereError,
    },
    #[error("invalid orbit: {0}")]
    Orbit(#[from] OrbitError),
    #[error("invalid vehicle: {0}")]
    Vehicle(#[from] PropulsionError),
}

/// Runtime scenario: everything one evaluation tick reads.
#[derive(Debug)]
pub struct Scenario {
    pub name: String,
    pub body: CelestialBody,
    pub vessel: VesselState,
    pub orbit: ConicOrbit,
    pub target: Option<TargetState>,
    pub vehicle: Option<Vehicle>,
}

impl Scenario {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            vessel: &self.vessel,
            orbit: &self.orbit,
            body: &self.body,
            target: self.target.as_ref(),
        }
    }
}

/// Convert catalog entries into bodies; ids follow catalog order starting at 1.
pub fn build_bodies(configs: &[BodyConfig]) -> Result<Vec<CelestialBody>, ScenarioError> {
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| body_from_config(BodyId(index as u32 + 1), config))
        .collect()
}

fn body_from_config(id: BodyId, config: &BodyConfig) -> Result<CelestialBody, ScenarioError> {
    let mut body = CelestialBody::new(id, config.name.clone(), config.radius_m, config.mu_m3_s2)
        .with_terrain(match config.terrain {
            TerrainConfig::Flat => Terrain::Flat,
            TerrainConfig::Plateau { altitude_m } => Terrain::Plateau { altitude_m },
            TerrainConfig::Ridged { amplitude_m, lobes } => Terrain::Ridged { amplitude_m, lobes },
        });
    if let Some(gee_asl) = config.gee_asl {
        body.gee_asl = gee_asl;
    }
    if let Some(position) = config.position_m {
        body = body.with_position(position);
    }
    if let Some(atmosphere) = &config.atmosphere {
        let atmosphere = Atmosphere::new(atmosphere.surface_pressure_atm, atmosphere.scale_height_m)
            .map_err(|source| ScenarioError::Atmosphere {
                name: config.name.clone(),
                source,
            })?;
        body = body.with_atmosphere(atmosphere);
    }
    Ok(body)
}

pub fn find_body<'a>(
    bodies: &'a [CelestialBody],
    name: &str,
) -> Result<&'a CelestialBody, ScenarioError> {
    bodies
        .iter()
        .find(|body| body.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ScenarioError::UnknownBody(name.to_string()))
}

pub fn load_scenario_config<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ScenarioError> {
    let reader = File::open(path)?;
    Ok(serde_yaml::from_reader(reader)?)
}

/// Load a scenario and resolve it against `bodies`.
pub fn load_scenario<P: AsRef<Path>>(
    path: P,
    bodies: &[CelestialBody],
) -> Result<Scenario, ScenarioError> {
    let config = load_scenario_config(path)?;
    Scenario::try_from((config, bodies))
}

impl<'a> TryFrom<(ScenarioConfig, &'a [CelestialBody])> for Scenario {
    type Error = ScenarioError;

    fn try_from(
        (config, bodies): (ScenarioConfig, &'a [CelestialBody]),
    ) -> Result<Self, Self::Error> {
        let body = find_body(bodies, &config.body)?.clone();
        let state = &config.vessel;

        let mut orbit =
            ConicOrbit::from_state(&body, state.position_m, state.velocity_m_s, config.ut)?;
        if let Some(end) = state.patch_end_ut {
            orbit = orbit.with_patch_end(end);
        }

        let mut vessel = VesselState::coasting(
            &body,
            config.ut,
            state.position_m,
            state.velocity_m_s,
            state.mass_t,
        );
        vessel.velocity_surface = state.surface_velocity_m_s.unwrap_or(state.velocity_m_s);
        vessel.thrust_available_kn = state.thrust_available_kn;
        vessel.thrust_minimum_kn = state.thrust_minimum_kn;
        vessel.max_thrust_accel = if state.mass_t > 0.0 {
            state.thrust_available_kn / state.mass_t
        } else {
            0.0
        };
        vessel.throttle = state.throttle.clamp(0.0, 1.0);
        vessel.mass_drag = state.mass_drag;
        vessel.next_node_burn = state.next_node_burn_m_s;
        if let Some(axes) = &state.axes {
            vessel.axes = VesselAxes {
                right: axes.right,
                forward: axes.forward,
                up: axes.up,
            };
        }

        let target = config
            .target
            .as_ref()
            .map(|target| build_target(target, &vessel, &body, bodies, config.ut))
            .transpose()?;

        let vehicle = config
            .vehicle
            .map(|vehicle| {
                let stages = vehicle.stages.into_iter().map(StageDefinition::from).collect();
                Vehicle::new(vehicle.name, stages)
            })
            .transpose()?;

        tracing::debug!(scenario = %config.name, body = %body.name, "scenario resolved");
        Ok(Scenario {
            name: config.name,
            body,
            vessel,
            orbit,
            target,
            vehicle,
        })
    }
}

fn build_target(
    config: &TargetConfig,
    vessel: &VesselState,
    vessel_body: &CelestialBody,
    bodies: &[CelestialBody],
    ut: f64,
) -> Result<TargetState, ScenarioError> {
    let body = match &config.body {
        Some(name) => find_body(bodies, name)?,
        None => vessel_body,
    };
    let position = vector::add(&body.position(), &config.position_m);
    let relative_position = vector::sub(&position, &vessel.com);
    Ok(match config.velocity_m_s {
        Some(velocity) => {
            let orbit = ConicOrbit::from_state(body, config.position_m, velocity, ut)?;
            TargetState::orbiting(
                relative_position,
                vector::sub(&velocity, &vessel.velocity_orbit),
                position,
                orbit,
            )
        }
        None => TargetState::fixed(relative_position, position),
    })
}

impl From<StageConfig> for StageDefinition {
    fn from(value: StageConfig) -> Self {
        StageDefinition {
            name: value.name,
            dry_mass_t: value.dry_mass_t,
            propellant_mass_t: value.propellant_mass_t,
            thrust_kn: value.thrust_kn,
            isp_vacuum_s: value.isp_vacuum_s,
            isp_atmosphere_s: value.isp_atmosphere_s.unwrap_or(value.isp_vacuum_s),
        }
    }
}
