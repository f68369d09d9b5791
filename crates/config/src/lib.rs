//! Configuration models and loaders for the vessel telemetry estimators.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Celestial body parsed from a body catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub radius_m: f64,
    pub mu_m3_s2: f64,
    /// Surface gravity in multiples of g0; derived from `mu / r²` when omitted.
    #[serde(default)]
    pub gee_asl: Option<f64>,
    #[serde(default)]
    pub position_m: Option<[f64; 3]>,
    #[serde(default)]
    pub atmosphere: Option<AtmosphereConfig>,
    #[serde(default)]
    pub terrain: TerrainConfig,
}

/// Static atmosphere parameters.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AtmosphereConfig {
    pub surface_pressure_atm: f64,
    pub scale_height_m: f64,
}

/// Terrain model in body catalogs.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(tag = "type")]
pub enum TerrainConfig {
    #[default]
    #[serde(rename = "flat")]
    Flat,
    #[serde(rename = "plateau")]
    Plateau { altitude_m: f64 },
    #[serde(rename = "ridged")]
    Ridged { amplitude_m: f64, lobes: u32 },
}

/// Numerical settings for the estimators.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EstimatorSettings {
    pub impact: ImpactSettings,
    pub approach: ApproachSettings,
}

/// Bounded fixed-point iteration used by the impact estimators.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ImpactSettings {
    pub max_iterations: usize,
    /// Stop early once successive impact times differ by less than this (seconds).
    /// Absent: always run `max_iterations` rounds.
    pub tolerance_s: Option<f64>,
}

impl Default for ImpactSettings {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            tolerance_s: None,
        }
    }
}

/// Grid refinement used by closest-approach searches.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApproachSettings {
    pub divisions: usize,
    pub rounds: usize,
    pub hyperbolic_horizon_radians: f64,
}

impl Default for ApproachSettings {
    fn default() -> Self {
        Self {
            divisions: 20,
            rounds: 8,
            hyperbolic_horizon_radians: 100.0,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Load body configurations from a YAML list, a TOML file, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Load estimator settings from a single YAML or TOML file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<EstimatorSettings, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let settings: EstimatorSettings = if is_toml(path) {
        toml::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };
    settings.validate()?;
    Ok(settings)
}

impl EstimatorSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.impact.max_iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "impact.max_iterations",
                reason: "must be at least 1".into(),
            });
        }
        if let Some(tol) = self.impact.tolerance_s {
            if !(tol > 0.0 && tol.is_finite()) {
                return Err(ConfigError::Invalid {
                    field: "impact.tolerance_s",
                    reason: format!("must be a positive number of seconds (got {tol})"),
                });
            }
        }
        if self.approach.divisions < 2 {
            return Err(ConfigError::Invalid {
                field: "approach.divisions",
                reason: "must be at least 2".into(),
            });
        }
        if !(self.approach.hyperbolic_horizon_radians > 0.0) {
            return Err(ConfigError::Invalid {
                field: "approach.hyperbolic_horizon_radians",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
