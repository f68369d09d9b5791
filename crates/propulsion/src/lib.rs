//! Stage definitions and vehicle mass properties.

use telemetry_core::constants::G0;
use telemetry_staging::{SimulationFailure, StageSimulator, StageStats, StageTables};
use thiserror::Error;

/// One stage of a vehicle. Masses in tonnes, thrust in kN.
#[derive(Debug, Clone, PartialEq)]
pub struct StageDefinition {
    pub name: String,
    pub dry_mass_t: f64,
    pub propellant_mass_t: f64,
    pub thrust_kn: f64,
    pub isp_vacuum_s: f64,
    pub isp_atmosphere_s: f64,
}

impl StageDefinition {
    pub fn wet_mass_t(&self) -> f64 {
        self.dry_mass_t + self.propellant_mass_t
    }

    fn validate(&self) -> Result<(), PropulsionError> {
        let checks = [
            ("dry mass", self.dry_mass_t),
            ("propellant mass", self.propellant_mass_t),
            ("thrust", self.thrust_kn),
            ("vacuum isp", self.isp_vacuum_s),
            ("atmospheric isp", self.isp_atmosphere_s),
        ];
        for (quantity, value) in checks {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(PropulsionError::InvalidValue {
                    stage: self.name.clone(),
                    quantity,
                    value,
                });
            }
        }
        if self.dry_mass_t <= 0.0 {
            return Err(PropulsionError::InvalidValue {
                stage: self.name.clone(),
                quantity: "dry mass",
                value: self.dry_mass_t,
            });
        }
        Ok(())
    }
}

/// Ambient conditions a stage is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambient {
    Vacuum,
    Atmosphere,
}

#[derive(Debug, Error, PartialEq)]
pub enum PropulsionError {
    #[error("vehicle has no stages")]
    NoStages,
    #[error("stage `{stage}` has invalid {quantity}: {value}")]
    InvalidValue {
        stage: String,
        quantity: &'static str,
        value: f64,
    },
}

/// Vehicle whose stage 0 burns first; later stages ride along as payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub name: String,
    stages: Vec<StageDefinition>,
}

impl Vehicle {
    pub fn new(
        name: impl Into<String>,
        stages: Vec<StageDefinition>,
    ) -> Result<Self, PropulsionError> {
        if stages.is_empty() {
            return Err(PropulsionError::NoStages);
        }
        for stage in &stages {
            stage.validate()?;
        }
        Ok(Self {
            name: name.into(),
            stages,
        })
    }

    pub fn stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    /// Convenience accessor for total initial mass.
    pub fn initial_mass_t(&self) -> f64 {
        self.stages.iter().map(StageDefinition::wet_mass_t).sum()
    }

    /// Thrust of the stage that is currently burning.
    pub fn active_thrust_kn(&self) -> f64 {
        self.stages.first().map_or(0.0, |s| s.thrust_kn)
    }

    /// Tsiolkovsky statistics for stage `index` with every later stage as payload.
    pub fn stage_stats(&self, index: usize, ambient: Ambient) -> Option<StageStats> {
        let stage = self.stages.get(index)?;
        let payload: f64 = self.stages[index + 1..]
            .iter()
            .map(StageDefinition::wet_mass_t)
            .sum();
        let start_mass = stage.wet_mass_t() + payload;
        let isp = match ambient {
            Ambient::Vacuum => stage.isp_vacuum_s,
            Ambient::Atmosphere => stage.isp_atmosphere_s,
        };

        if stage.thrust_kn <= 0.0 || isp <= 0.0 || stage.propellant_mass_t <= 0.0 {
            return Some(StageStats {
                start_mass,
                end_mass: start_mass,
                start_thrust: stage.thrust_kn,
                max_accel: stage.thrust_kn / start_mass,
                delta_time: 0.0,
                delta_v: 0.0,
            });
        }

        let end_mass = start_mass - stage.propellant_mass_t;
        let exhaust_velocity = isp * G0;
        let mass_flow = stage.thrust_kn / exhaust_velocity;
        Some(StageStats {
            start_mass,
            end_mass,
            start_thrust: stage.thrust_kn,
            max_accel: stage.thrust_kn / end_mass,
            delta_time: stage.propellant_mass_t / mass_flow,
            delta_v: exhaust_velocity * (start_mass / end_mass).ln(),
        })
    }

    fn table(&self, ambient: Ambient) -> Vec<StageStats> {
        (0..self.stages.len())
            .filter_map(|i| self.stage_stats(i, ambient))
            .collect()
    }
}

/// [`StageSimulator`] that evaluates the rocket equation per stage.
#[derive(Debug, Clone)]
pub struct RocketEquationSimulator {
    vehicle: Vehicle,
}

impl RocketEquationSimulator {
    pub fn new(vehicle: Vehicle) -> Self {
        Self { vehicle }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Replace the vehicle, e.g. after staging. Takes effect on the next refresh.
    pub fn set_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicle = vehicle;
    }
}

impl StageSimulator for RocketEquationSimulator {
    fn simulate(&mut self) -> Result<StageTables, SimulationFailure> {
        let tables = StageTables::new(
            self.vehicle.table(Ambient::Vacuum),
            self.vehicle.table(Ambient::Atmosphere),
        )?;
        Ok(tables)
    }
}
