use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vessel_telemetry::config::{EstimatorSettings, load_bodies, load_settings};
use vessel_telemetry::estimators::Estimators;
use vessel_telemetry::export::report::write_report_json;
use vessel_telemetry::export::stages::write_stage_csv;
use vessel_telemetry::format;
use vessel_telemetry::propulsion::{RocketEquationSimulator, Vehicle};
use vessel_telemetry::readout::{self, Readout};
use vessel_telemetry::scenario::{build_bodies, load_scenario};
use vessel_telemetry::staging::{GravityContext, StageStatsAdapter, StageSummary};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Derived telemetry readout for a vessel snapshot"
)]
struct Cli {
    /// Scenario YAML describing the vessel, target and vehicle
    #[arg(long)]
    scenario: PathBuf,

    /// Body catalog: YAML list, TOML file, or directory of TOML files
    #[arg(long, default_value = "configs/bodies")]
    bodies: PathBuf,

    /// Estimator settings (YAML or TOML); defaults apply when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the readout as JSON to this path (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write per-stage statistics as CSV to this path
    #[arg(long)]
    stages_csv: Option<PathBuf>,

    /// Evaluate thrust-to-weight at 1 g, as in the vehicle editor
    #[arg(long)]
    editor: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let body_configs = load_bodies(&cli.bodies)
        .with_context(|| format!("loading bodies from {}", cli.bodies.display()))?;
    let bodies = build_bodies(&body_configs)?;
    let settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EstimatorSettings::default(),
    };
    let scenario = load_scenario(&cli.scenario, &bodies)
        .with_context(|| format!("loading scenario {}", cli.scenario.display()))?;

    let gravity = if cli.editor {
        GravityContext::Editor
    } else {
        GravityContext::Flight {
            gee_asl: scenario.body.gee_asl,
        }
    };
    let estimators = Estimators::from_settings(&settings);
    let readout = readout::evaluate(scenario.snapshot(), &estimators, gravity);

    let stages = scenario
        .vehicle
        .clone()
        .map(|vehicle| simulate_stages(vehicle, gravity))
        .transpose()?;
    let rows = stages
        .as_ref()
        .map(|stages| stages.rows.as_slice())
        .unwrap_or_default();

    let json_to_stdout = cli.json.as_deref() == Some(std::path::Path::new("-"));
    if !json_to_stdout {
        print_readout(&scenario.name, &readout, stages.as_ref());
    }
    if let Some(path) = &cli.json {
        let report = readout::to_report(&scenario.name, &readout, rows.to_vec());
        write_report_json(path, &report)?;
    }
    if let Some(path) = &cli.stages_csv {
        write_stage_csv(path, rows)?;
        if !json_to_stdout {
            println!("Stage table written to {}", path.display());
        }
    }

    Ok(())
}

/// Stage rows plus whole-vehicle totals from one simulator refresh.
struct StageReport {
    vehicle: String,
    mass_t: f64,
    thrust_kn: f64,
    vacuum_delta_v: f64,
    atmospheric_delta_v: f64,
    rows: Vec<StageSummary>,
}

fn simulate_stages(vehicle: Vehicle, gravity: GravityContext) -> anyhow::Result<StageReport> {
    let mut adapter = StageStatsAdapter::new(RocketEquationSimulator::new(vehicle));
    let tables = adapter.request_refresh()?;
    let vacuum_delta_v = tables.total_vacuum_delta_v();
    let atmospheric_delta_v = tables.total_atmospheric_delta_v();
    let rows = adapter.summaries(gravity)?;
    let vehicle = adapter.simulator().vehicle();
    Ok(StageReport {
        vehicle: vehicle.name.clone(),
        mass_t: vehicle.initial_mass_t(),
        thrust_kn: vehicle.active_thrust_kn(),
        vacuum_delta_v,
        atmospheric_delta_v,
        rows,
    })
}

fn print_readout(name: &str, readout: &Readout, stages: Option<&StageReport>) {
    println!("=== {name} (UT {}) ===", format::dhms(readout.ut));
    let mut section = None;
    for entry in &readout.entries {
        if section != Some(entry.item.category) {
            section = Some(entry.item.category);
            println!("[{}]", entry.item.category.title());
        }
        println!(
            "  {:<28} {}",
            entry.item.label,
            format::estimate(&entry.value, entry.item.unit)
        );
    }

    let Some(stages) = stages else {
        return;
    };
    println!("[Stages]");
    println!(
        "  {}: {:.3} t, {:.1} kN, vac Δv {}, atm Δv {}",
        stages.vehicle,
        stages.mass_t,
        stages.thrust_kn,
        format::si(stages.vacuum_delta_v, "m/s"),
        format::si(stages.atmospheric_delta_v, "m/s")
    );
    println!(
        "  {:>5} {:>10} {:>10} {:>7} {:>7} {:>10} {:>10}",
        "stage", "start t", "end t", "TWR", "maxTWR", "vac Δv", "atm Δv"
    );
    for row in &stages.rows {
        println!(
            "  {:>5} {:>10.3} {:>10.3} {:>7.2} {:>7.2} {:>10.1} {:>10.1}",
            row.stage,
            row.start_mass_t,
            row.end_mass_t,
            row.start_twr,
            row.max_twr,
            row.vacuum_delta_v_m_s,
            row.atmospheric_delta_v_m_s
        );
    }
}
