//! Stage statistics read through from an external staged-burn simulation.
//!
//! The simulation itself lives behind [`StageSimulator`]. [`StageStatsAdapter`]
//! only runs it when [`StageStatsAdapter::request_refresh`] is called; every read
//! uses the most recently produced [`StageTables`].

use std::error::Error as StdError;

use serde::Serialize;
use telemetry_core::units::gees_to_ms2;
use thiserror::Error;

/// Result of simulating one stage. Masses in tonnes, thrust in kN, accelerations in m/s².
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StageStats {
    pub start_mass: f64,
    pub end_mass: f64,
    pub start_thrust: f64,
    pub max_accel: f64,
    pub delta_time: f64,
    pub delta_v: f64,
}

impl StageStats {
    /// Thrust-to-weight at ignition for a body with surface gravity `gee_asl` (in g0).
    pub fn start_twr(&self, gee_asl: f64) -> f64 {
        self.start_thrust / (gees_to_ms2(gee_asl) * self.start_mass)
    }

    /// Thrust-to-weight at burnout for a body with surface gravity `gee_asl` (in g0).
    pub fn max_twr(&self, gee_asl: f64) -> f64 {
        self.max_accel / gees_to_ms2(gee_asl)
    }
}

/// Vacuum and atmospheric results, one row per stage; row 0 burns first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StageTables {
    vacuum: Vec<StageStats>,
    atmospheric: Vec<StageStats>,
}

impl StageTables {
    pub fn new(
        vacuum: Vec<StageStats>,
        atmospheric: Vec<StageStats>,
    ) -> Result<Self, StagingError> {
        if vacuum.len() != atmospheric.len() {
            return Err(StagingError::LengthMismatch {
                vacuum: vacuum.len(),
                atmospheric: atmospheric.len(),
            });
        }
        Ok(Self {
            vacuum,
            atmospheric,
        })
    }

    pub fn stage_count(&self) -> usize {
        self.vacuum.len()
    }

    pub fn vacuum(&self) -> &[StageStats] {
        &self.vacuum
    }

    pub fn atmospheric(&self) -> &[StageStats] {
        &self.atmospheric
    }

    /// Display rows with TWR evaluated for `context`.
    pub fn summaries(&self, context: GravityContext) -> Vec<StageSummary> {
        let gee = context.gee_asl();
        self.vacuum
            .iter()
            .zip(&self.atmospheric)
            .enumerate()
            .map(|(stage, (vac, atmo))| StageSummary {
                stage,
                start_mass_t: vac.start_mass,
                end_mass_t: vac.end_mass,
                start_twr: vac.start_twr(gee),
                max_twr: vac.max_twr(gee),
                vacuum_delta_v_m_s: vac.delta_v,
                vacuum_time_s: vac.delta_time,
                atmospheric_delta_v_m_s: atmo.delta_v,
                atmospheric_time_s: atmo.delta_time,
            })
            .collect()
    }

    pub fn total_vacuum_delta_v(&self) -> f64 {
        self.vacuum.iter().map(|s| s.delta_v).sum()
    }

    pub fn total_atmospheric_delta_v(&self) -> f64 {
        self.atmospheric.iter().map(|s| s.delta_v).sum()
    }
}

/// Where TWR is evaluated: against a body's surface gravity in flight, or 1 g in the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GravityContext {
    Flight { gee_asl: f64 },
    Editor,
}

impl GravityContext {
    pub fn gee_asl(&self) -> f64 {
        match *self {
            GravityContext::Flight { gee_asl } => gee_asl,
            GravityContext::Editor => 1.0,
        }
    }
}

/// One row of the stage statistics display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage: usize,
    pub start_mass_t: f64,
    pub end_mass_t: f64,
    pub start_twr: f64,
    pub max_twr: f64,
    pub vacuum_delta_v_m_s: f64,
    pub vacuum_time_s: f64,
    pub atmospheric_delta_v_m_s: f64,
    pub atmospheric_time_s: f64,
}

pub type SimulationFailure = Box<dyn StdError + Send + Sync>;

/// External staged-burn simulation. Running it may be expensive.
pub trait StageSimulator {
    fn simulate(&mut self) -> Result<StageTables, SimulationFailure>;
}

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("no stage simulation result is available yet")]
    UpstreamUnavailable,
    #[error("stage tables differ in length (vacuum {vacuum}, atmospheric {atmospheric})")]
    LengthMismatch { vacuum: usize, atmospheric: usize },
    #[error("stage simulation failed: {0}")]
    Simulation(#[source] SimulationFailure),
}

/// Holds the latest simulation output and refreshes it only on request.
pub struct StageStatsAdapter<S> {
    simulator: S,
    latest: Option<StageTables>,
    refreshes: u64,
}

impl<S: StageSimulator> StageStatsAdapter<S> {
    pub fn new(simulator: S) -> Self {
        Self {
            simulator,
            latest: None,
            refreshes: 0,
        }
    }

    /// Run the simulation now. On failure the previous table, if any, is kept.
    pub fn request_refresh(&mut self) -> Result<&StageTables, StagingError> {
        match self.simulator.simulate() {
            Ok(tables) => {
                self.refreshes += 1;
                tracing::info!(
                    stages = tables.stage_count(),
                    refresh = self.refreshes,
                    "stage statistics refreshed"
                );
                Ok(&*self.latest.insert(tables))
            }
            Err(err) => {
                tracing::warn!(error = %err, "stage simulation failed; keeping previous result");
                Err(StagingError::Simulation(err))
            }
        }
    }

    /// Most recent table. Never triggers a simulation.
    pub fn tables(&self) -> Result<&StageTables, StagingError> {
        self.latest.as_ref().ok_or(StagingError::UpstreamUnavailable)
    }

    pub fn summaries(&self, context: GravityContext) -> Result<Vec<StageSummary>, StagingError> {
        Ok(self.tables()?.summaries(context))
    }

    /// Number of successful refreshes so far.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut S {
        &mut self.simulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSimulator {
        runs: usize,
        fail: bool,
    }

    impl StageSimulator for CountingSimulator {
        fn simulate(&mut self) -> Result<StageTables, SimulationFailure> {
            self.runs += 1;
            if self.fail {
                return Err("engine data missing".into());
            }
            let stage = StageStats {
                start_mass: 10.0,
                end_mass: 4.0,
                start_thrust: 196.2,
                max_accel: 49.05,
                delta_time: 60.0,
                delta_v: 3_000.0,
            };
            Ok(StageTables::new(vec![stage], vec![StageStats { delta_v: 2_600.0, ..stage }])?)
        }
    }

    #[test]
    fn reads_before_refresh_are_unavailable() {
        let adapter = StageStatsAdapter::new(CountingSimulator { runs: 0, fail: false });
        assert!(matches!(adapter.tables(), Err(StagingError::UpstreamUnavailable)));
        assert_eq!(adapter.simulator().runs, 0);
    }

    #[test]
    fn reads_do_not_trigger_simulation() {
        let mut adapter = StageStatsAdapter::new(CountingSimulator { runs: 0, fail: false });
        adapter.request_refresh().unwrap();
        for _ in 0..5 {
            adapter.tables().unwrap();
        }
        assert_eq!(adapter.simulator().runs, 1);
        assert_eq!(adapter.refresh_count(), 1);
    }

    #[test]
    fn failed_refresh_keeps_previous_table() {
        let mut adapter = StageStatsAdapter::new(CountingSimulator { runs: 0, fail: false });
        adapter.request_refresh().unwrap();
        adapter.simulator_mut().fail = true;
        assert!(matches!(adapter.request_refresh(), Err(StagingError::Simulation(_))));
        assert_eq!(adapter.tables().unwrap().stage_count(), 1);
    }

    #[test]
    fn twr_uses_editor_gravity_of_one() {
        let mut adapter = StageStatsAdapter::new(CountingSimulator { runs: 0, fail: false });
        adapter.request_refresh().unwrap();
        let editor = adapter.summaries(GravityContext::Editor).unwrap();
        assert!((editor[0].start_twr - 2.0).abs() < 1e-12);
        assert!((editor[0].max_twr - 5.0).abs() < 1e-12);

        let mun = adapter
            .summaries(GravityContext::Flight { gee_asl: 0.5 })
            .unwrap();
        assert!((mun[0].start_twr - 4.0).abs() < 1e-12);
        assert_eq!(mun[0].atmospheric_delta_v_m_s, 2_600.0);
    }

    #[test]
    fn mismatched_tables_are_rejected() {
        let err = StageTables::new(vec![StageStats::default(); 2], vec![]).unwrap_err();
        assert!(matches!(
            err,
            StagingError::LengthMismatch {
                vacuum: 2,
                atmospheric: 0
            }
        ));
    }
}
