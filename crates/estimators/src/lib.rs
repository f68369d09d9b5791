//! Derived-telemetry estimators over a vessel/orbit snapshot.
//!
//! Every estimator is a pure function of its inputs and returns an [`Estimate`]:
//! either the value or the [`NotApplicable`] reason it could not be computed.

pub mod catalog;
pub mod impact;
pub mod outcome;
pub mod rendezvous;
pub mod state;
pub mod suicide_burn;
pub mod vessel_info;

pub use facade::*;

mod facade;
