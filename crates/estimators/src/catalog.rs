//! Named info items with their display category and semantic unit.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Orbit,
    Surface,
    Vessel,
    Target,
    Misc,
}

impl Category {
    /// Section heading for human-readable output.
    pub fn title(self) -> &'static str {
        match self {
            Category::Orbit => "Orbit",
            Category::Surface => "Surface",
            Category::Vessel => "Vessel",
            Category::Target => "Target",
            Category::Misc => "Misc",
        }
    }
}

/// Semantic unit of a reading. Formatting is left to the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Seconds,
    Meters,
    MetersPerSecond,
    MetersPerSecondSquared,
    Degrees,
    Atmospheres,
    Tonnes,
    Kilonewtons,
    Ratio,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Seconds => "s",
            Unit::Meters => "m",
            Unit::MetersPerSecond => "m/s",
            Unit::MetersPerSecondSquared => "m/s²",
            Unit::Degrees => "°",
            Unit::Atmospheres => "atm",
            Unit::Tonnes => "t",
            Unit::Kilonewtons => "kN",
            Unit::Ratio => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InfoItem {
    pub id: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub unit: Unit,
}

const fn item(
    id: &'static str,
    label: &'static str,
    category: Category,
    unit: Unit,
) -> InfoItem {
    InfoItem {
        id,
        label,
        category,
        unit,
    }
}

pub const TIME_TO_IMPACT: InfoItem = item(
    "time_to_impact",
    "Time to impact",
    Category::Misc,
    Unit::Seconds,
);
pub const SUICIDE_BURN_COUNTDOWN: InfoItem = item(
    "suicide_burn_countdown",
    "Suicide burn countdown",
    Category::Misc,
    Unit::Seconds,
);
pub const LATITUDE: InfoItem = item("latitude", "Latitude", Category::Surface, Unit::Degrees);
pub const LONGITUDE: InfoItem = item("longitude", "Longitude", Category::Surface, Unit::Degrees);
pub const VESSEL_MASS: InfoItem = item(
    "vessel_mass",
    "Vessel mass",
    Category::Vessel,
    Unit::Tonnes,
);
pub const MAX_THRUST: InfoItem = item(
    "max_thrust",
    "Max thrust",
    Category::Vessel,
    Unit::Kilonewtons,
);
pub const MIN_THRUST: InfoItem = item(
    "min_thrust",
    "Min thrust",
    Category::Vessel,
    Unit::Kilonewtons,
);
pub const SURFACE_TWR: InfoItem = item("surface_twr", "TWR", Category::Vessel, Unit::Ratio);
pub const MAX_ACCELERATION: InfoItem = item(
    "max_acceleration",
    "Max acceleration",
    Category::Vessel,
    Unit::MetersPerSecondSquared,
);
pub const MIN_ACCELERATION: InfoItem = item(
    "min_acceleration",
    "Min acceleration",
    Category::Vessel,
    Unit::MetersPerSecondSquared,
);
pub const CURRENT_ACCELERATION: InfoItem = item(
    "current_acceleration",
    "Current acceleration",
    Category::Vessel,
    Unit::MetersPerSecondSquared,
);
pub const DRAG_COEFFICIENT: InfoItem = item(
    "drag_coefficient",
    "Drag coefficient",
    Category::Vessel,
    Unit::Ratio,
);
pub const NODE_BURN_TIME: InfoItem = item(
    "node_burn_time",
    "Node burn time",
    Category::Misc,
    Unit::Seconds,
);
pub const ATMOSPHERIC_PRESSURE: InfoItem = item(
    "atmospheric_pressure",
    "Atmospheric pressure",
    Category::Misc,
    Unit::Atmospheres,
);
pub const ATMOSPHERIC_DRAG: InfoItem = item(
    "atmospheric_drag",
    "Atmospheric drag",
    Category::Vessel,
    Unit::MetersPerSecondSquared,
);
pub const SURFACE_GRAVITY: InfoItem = item(
    "surface_gravity",
    "Surface gravity",
    Category::Surface,
    Unit::MetersPerSecondSquared,
);
pub const TIME_TO_SOI_TRANSITION: InfoItem = item(
    "time_to_soi_transition",
    "Time to SoI switch",
    Category::Orbit,
    Unit::Seconds,
);
pub const CIRCULAR_ORBIT_SPEED: InfoItem = item(
    "circular_orbit_speed",
    "Circular orbit speed",
    Category::Orbit,
    Unit::MetersPerSecond,
);
pub const PERIAPSIS: InfoItem = item("periapsis", "Periapsis", Category::Orbit, Unit::Meters);
pub const APOAPSIS: InfoItem = item("apoapsis", "Apoapsis", Category::Orbit, Unit::Meters);
pub const INCLINATION: InfoItem = item(
    "inclination",
    "Inclination",
    Category::Orbit,
    Unit::Degrees,
);
pub const TARGET_DISTANCE: InfoItem = item(
    "target_distance",
    "Distance to target",
    Category::Target,
    Unit::Meters,
);
pub const RELATIVE_SPEED: InfoItem = item(
    "relative_speed",
    "Relative speed",
    Category::Target,
    Unit::MetersPerSecond,
);
pub const TIME_TO_CLOSEST_APPROACH: InfoItem = item(
    "time_to_closest_approach",
    "Time to closest approach",
    Category::Target,
    Unit::Seconds,
);
pub const CLOSEST_APPROACH_DISTANCE: InfoItem = item(
    "closest_approach_distance",
    "Closest approach distance",
    Category::Target,
    Unit::Meters,
);
pub const SYNODIC_PERIOD: InfoItem = item(
    "synodic_period",
    "Synodic period",
    Category::Target,
    Unit::Seconds,
);
pub const PHASE_ANGLE: InfoItem = item(
    "phase_angle",
    "Phase angle to target",
    Category::Target,
    Unit::Degrees,
);
pub const DOCKING_VELOCITY_RIGHT: InfoItem = item(
    "docking_velocity_right",
    "Relative velocity (right)",
    Category::Target,
    Unit::MetersPerSecond,
);
pub const DOCKING_VELOCITY_FORWARD: InfoItem = item(
    "docking_velocity_forward",
    "Relative velocity (forward)",
    Category::Target,
    Unit::MetersPerSecond,
);
pub const DOCKING_VELOCITY_UP: InfoItem = item(
    "docking_velocity_up",
    "Relative velocity (up)",
    Category::Target,
    Unit::MetersPerSecond,
);
pub const DOCKING_POSITION_RIGHT: InfoItem = item(
    "docking_position_right",
    "Relative position (right)",
    Category::Target,
    Unit::Meters,
);
pub const DOCKING_POSITION_FORWARD: InfoItem = item(
    "docking_position_forward",
    "Relative position (forward)",
    Category::Target,
    Unit::Meters,
);
pub const DOCKING_POSITION_UP: InfoItem = item(
    "docking_position_up",
    "Relative position (up)",
    Category::Target,
    Unit::Meters,
);

/// Every item, in display order. Items of one category are contiguous.
pub const ALL: &[InfoItem] = &[
    PERIAPSIS,
    APOAPSIS,
    INCLINATION,
    CIRCULAR_ORBIT_SPEED,
    TIME_TO_SOI_TRANSITION,
    LATITUDE,
    LONGITUDE,
    SURFACE_GRAVITY,
    VESSEL_MASS,
    MAX_THRUST,
    MIN_THRUST,
    SURFACE_TWR,
    MAX_ACCELERATION,
    MIN_ACCELERATION,
    CURRENT_ACCELERATION,
    DRAG_COEFFICIENT,
    ATMOSPHERIC_DRAG,
    TARGET_DISTANCE,
    RELATIVE_SPEED,
    TIME_TO_CLOSEST_APPROACH,
    CLOSEST_APPROACH_DISTANCE,
    SYNODIC_PERIOD,
    PHASE_ANGLE,
    DOCKING_VELOCITY_RIGHT,
    DOCKING_VELOCITY_FORWARD,
    DOCKING_VELOCITY_UP,
    DOCKING_POSITION_RIGHT,
    DOCKING_POSITION_FORWARD,
    DOCKING_POSITION_UP,
    TIME_TO_IMPACT,
    SUICIDE_BURN_COUNTDOWN,
    ATMOSPHERIC_PRESSURE,
    NODE_BURN_TIME,
];

pub fn lookup(id: &str) -> Option<&'static InfoItem> {
    ALL.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn identifiers_are_unique() {
        let ids: HashSet<_> = ALL.iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), ALL.len());
    }

    #[test]
    fn lookup_finds_target_items() {
        let item = lookup("phase_angle").unwrap();
        assert_eq!(item.category, Category::Target);
        assert_eq!(item.unit.symbol(), "°");
        assert!(lookup("warp_factor").is_none());
    }

    #[test]
    fn landing_items_sit_under_misc() {
        for id in ["time_to_impact", "suicide_burn_countdown", "atmospheric_pressure"] {
            assert_eq!(lookup(id).unwrap().category, Category::Misc, "{id}");
        }
        assert_eq!(lookup("latitude").unwrap().category, Category::Surface);
        assert_eq!(lookup("max_thrust").unwrap().unit.symbol(), "kN");
    }

    #[test]
    fn categories_are_contiguous() {
        let mut seen = Vec::new();
        for item in ALL {
            if seen.last() != Some(&item.category) {
                assert!(!seen.contains(&item.category), "{:?} split", item.category);
                seen.push(item.category);
            }
        }
    }
}
