//! Exponential atmosphere used for pressure and drag readouts.

use telemetry_core::constants::{DENSITY_PER_ATM, DRAG_AREA_PER_TONNE};
use telemetry_core::vector::{self, Vector3};
use thiserror::Error;

/// Pressure (atm) at which the atmosphere is considered to end.
const CEILING_PRESSURE_ATM: f64 = 1.0e-6;

/// Static atmosphere of a celestial body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    surface_pressure_atm: f64,
    scale_height_m: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum AtmosphereError {
    #[error("atmosphere scale height must be positive (got {0})")]
    InvalidScaleHeight(f64),
    #[error("surface pressure must be positive (got {0})")]
    InvalidSurfacePressure(f64),
}

impl Atmosphere {
    pub fn new(surface_pressure_atm: f64, scale_height_m: f64) -> Result<Self, AtmosphereError> {
        if !(scale_height_m > 0.0 && scale_height_m.is_finite()) {
            return Err(AtmosphereError::InvalidScaleHeight(scale_height_m));
        }
        if !(surface_pressure_atm > 0.0 && surface_pressure_atm.is_finite()) {
            return Err(AtmosphereError::InvalidSurfacePressure(surface_pressure_atm));
        }
        Ok(Self {
            surface_pressure_atm,
            scale_height_m,
        })
    }

    pub fn surface_pressure_atm(&self) -> f64 {
        self.surface_pressure_atm
    }

    pub fn scale_height_m(&self) -> f64 {
        self.scale_height_m
    }

    /// Altitude above which pressure and drag are reported as zero.
    pub fn ceiling_m(&self) -> f64 {
        -self.scale_height_m * (CEILING_PRESSURE_ATM / self.surface_pressure_atm).ln()
    }

    /// Static pressure in atmospheres. Altitudes below sea level use the surface value.
    pub fn pressure_atm(&self, altitude_m: f64) -> f64 {
        if altitude_m >= self.ceiling_m() {
            return 0.0;
        }
        let h = altitude_m.max(0.0);
        self.surface_pressure_atm * (-h / self.scale_height_m).exp()
    }

    pub fn density_kg_m3(&self, altitude_m: f64) -> f64 {
        self.pressure_atm(altitude_m) * DENSITY_PER_ATM
    }

    /// Drag acceleration (m/s²) opposing `velocity` for a vessel whose mass-weighted
    /// drag coefficient is `drag_coefficient`.
    pub fn drag_acceleration(
        &self,
        altitude_m: f64,
        velocity: &Vector3,
        drag_coefficient: f64,
    ) -> Vector3 {
        let rho = self.density_kg_m3(altitude_m);
        let speed = vector::norm(velocity);
        if rho == 0.0 || speed == 0.0 {
            return [0.0; 3];
        }
        // 0.5 * rho * v^2 * Cd * A along -v, written as a multiple of v.
        let factor = -0.5 * rho * speed * drag_coefficient * DRAG_AREA_PER_TONNE;
        vector::scale(velocity, factor)
    }
}
