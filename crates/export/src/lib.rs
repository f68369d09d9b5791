//! Export helpers for telemetry readouts (JSON) and stage tables (CSV).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod report {
    use std::io::Write;
    use std::path::Path;

    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use telemetry_estimators::Category;
    use telemetry_staging::StageSummary;

    use super::{ExportError, writer_for_path};

    /// A single exported quantity: a value with its unit, or the reason it is unavailable.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    #[serde(untagged)]
    pub enum Reading {
        Value { value: f64, unit: &'static str },
        NotApplicable { not_applicable: &'static str },
    }

    impl Reading {
        pub fn value(value: f64, unit: &'static str) -> Self {
            Reading::Value { value, unit }
        }

        pub fn not_applicable(reason: &'static str) -> Self {
            Reading::NotApplicable {
                not_applicable: reason,
            }
        }
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct NamedReading {
        pub id: &'static str,
        pub label: &'static str,
        pub category: Category,
        #[serde(flatten)]
        pub reading: Reading,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct TelemetryReport {
        pub generated_at: DateTime<Utc>,
        pub scenario: String,
        pub ut: f64,
        pub readings: Vec<NamedReading>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub stages: Vec<StageSummary>,
    }

    impl TelemetryReport {
        pub fn new(scenario: impl Into<String>, ut: f64) -> Self {
            Self {
                generated_at: Utc::now(),
                scenario: scenario.into(),
                ut,
                readings: Vec::new(),
                stages: Vec::new(),
            }
        }

        pub fn reading(&self, id: &str) -> Option<&Reading> {
            self.readings
                .iter()
                .find(|named| named.id == id)
                .map(|named| &named.reading)
        }
    }

    /// Write the report as pretty JSON to `path` (`-` for stdout).
    pub fn write_report_json(path: &Path, report: &TelemetryReport) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        serde_json::to_writer_pretty(&mut writer, report)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub mod stages {
    use std::path::Path;

    use telemetry_staging::StageSummary;

    use super::{ExportError, writer_for_path};

    /// Write one CSV row per stage, header included.
    pub fn write_stage_csv(path: &Path, rows: &[StageSummary]) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_writer(writer_for_path(path)?);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use telemetry_estimators::Category;
    use telemetry_staging::StageSummary;

    use super::report::{NamedReading, Reading, TelemetryReport, write_report_json};
    use super::stages::write_stage_csv;

    #[test]
    fn not_applicable_readings_serialize_with_reason() {
        let mut report = TelemetryReport::new("descent", 12.0);
        report.readings.push(NamedReading {
            id: "target_distance",
            label: "Distance to target",
            category: Category::Target,
            reading: Reading::not_applicable("no_target"),
        });
        report.readings.push(NamedReading {
            id: "time_to_impact",
            label: "Time to impact",
            category: Category::Misc,
            reading: Reading::value(200.0, "s"),
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.json");
        write_report_json(&path, &report).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["scenario"], "descent");
        assert_eq!(json["readings"][0]["not_applicable"], "no_target");
        assert_eq!(json["readings"][0]["category"], "target");
        assert_eq!(json["readings"][1]["category"], "misc");
        assert_eq!(json["readings"][1]["value"], 200.0);
        assert_eq!(json["readings"][1]["unit"], "s");
        assert!(json.get("stages").is_none());
    }

    #[test]
    fn stage_csv_has_header_and_rows() {
        let row = StageSummary {
            stage: 0,
            start_mass_t: 13.0,
            end_mass_t: 5.0,
            start_twr: 1.5,
            max_twr: 4.0,
            vacuum_delta_v_m_s: 2_800.0,
            vacuum_time_s: 117.0,
            atmospheric_delta_v_m_s: 2_300.0,
            atmospheric_time_s: 98.0,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stages.csv");
        write_stage_csv(&path, &[row, StageSummary { stage: 1, ..row }]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("stage,start_mass_t,end_mass_t,start_twr"));
        assert!(lines[2].starts_with("1,13.0,5.0"));
    }
}
