//! Celestial bodies and their terrain.

use std::fmt;

use telemetry_atmosphere::Atmosphere;
use telemetry_core::constants::G0;
use telemetry_core::vector::Vector3;

/// Identifier of a reference body. Two orbits share a reference frame iff their ids match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Terrain height above the mean radius.
///
/// Bodies without solid terrain (oceans, gas giants) use [`Terrain::Flat`]: altitude 0 everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Terrain {
    #[default]
    Flat,
    /// Constant elevation.
    Plateau { altitude_m: f64 },
    /// `amplitude * sin(lobes * longitude)`, varying slowly along the equator.
    Ridged { amplitude_m: f64, lobes: u32 },
}

impl Terrain {
    /// Terrain altitude under a body-relative position.
    pub fn altitude_at(&self, body_relative: &Vector3) -> f64 {
        match *self {
            Terrain::Flat => 0.0,
            Terrain::Plateau { altitude_m } => altitude_m,
            Terrain::Ridged { amplitude_m, lobes } => {
                let longitude = body_relative[1].atan2(body_relative[0]);
                amplitude_m * (f64::from(lobes) * longitude).sin()
            }
        }
    }
}

/// Body-level queries needed by the estimators.
pub trait ReferenceBody {
    fn id(&self) -> BodyId;
    /// Mean radius (m).
    fn radius(&self) -> f64;
    /// Gravitational parameter (m³/s²).
    fn mu(&self) -> f64;
    /// Surface gravity in multiples of `G0`.
    fn gee_asl(&self) -> f64;
    /// World-frame position of the body centre.
    fn position(&self) -> Vector3;
    fn terrain_altitude(&self, body_relative: &Vector3) -> f64;
    fn atmosphere(&self) -> Option<&Atmosphere>;

    /// Mean radius plus terrain altitude under `body_relative`.
    fn terrain_radius(&self, body_relative: &Vector3) -> f64 {
        self.radius() + self.terrain_altitude(body_relative)
    }
}

#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    pub radius_m: f64,
    pub mu_m3_s2: f64,
    pub gee_asl: f64,
    pub position: Vector3,
    pub terrain: Terrain,
    pub atmosphere: Option<Atmosphere>,
}

impl CelestialBody {
    /// Airless, flat body at the world origin; surface gravity derived from `mu / r²`.
    pub fn new(id: BodyId, name: impl Into<String>, radius_m: f64, mu_m3_s2: f64) -> Self {
        Self {
            id,
            name: name.into(),
            radius_m,
            mu_m3_s2,
            gee_asl: mu_m3_s2 / (radius_m * radius_m) / G0,
            position: [0.0; 3],
            terrain: Terrain::Flat,
            atmosphere: None,
        }
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = Some(atmosphere);
        self
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }
}

impl ReferenceBody for CelestialBody {
    fn id(&self) -> BodyId {
        self.id
    }

    fn radius(&self) -> f64 {
        self.radius_m
    }

    fn mu(&self) -> f64 {
        self.mu_m3_s2
    }

    fn gee_asl(&self) -> f64 {
        self.gee_asl
    }

    fn position(&self) -> Vector3 {
        self.position
    }

    fn terrain_altitude(&self, body_relative: &Vector3) -> f64 {
        self.terrain.altitude_at(body_relative)
    }

    fn atmosphere(&self) -> Option<&Atmosphere> {
        self.atmosphere.as_ref()
    }
}
