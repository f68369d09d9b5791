//! Derived telemetry for a flight computer.
//!
//! The estimator crates do the numerical work; this crate wires them to
//! scenario files, assembles readouts, and hosts the `telemetry` binary.

pub mod format;
pub mod readout;
pub mod scenario;

pub use telemetry_atmosphere as atmosphere;
pub use telemetry_config as config;
pub use telemetry_core as common;
pub use telemetry_estimators as estimators;
pub use telemetry_export as export;
pub use telemetry_orbits as orbits;
pub use telemetry_propulsion as propulsion;
pub use telemetry_staging as staging;
