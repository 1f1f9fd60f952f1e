//! Preset scenario definitions.

use bevy::math::DVec2;

use super::Scenario;
use crate::config::{BodyConfig, CraftConfig, SimulationConfig};

/// All available preset scenarios.
pub static SCENARIOS: &[Scenario] = &[LOW_ORBIT, MOON_TRANSFER, ESCAPE];

/// Scenario 1: Low Orbit (default)
///
/// Circular orbit just above Terra with Luna further out. Free flying.
pub static LOW_ORBIT: Scenario = Scenario {
    id: "low_orbit",
    name: "Low Orbit",
    description: "Circular orbit around Terra. Free experimentation mode.",
    build: SimulationConfig::default,
};

/// Scenario 2: Moon Transfer
///
/// Higher parking orbit with a larger tank; reach Luna's sphere of
/// influence without hitting it.
pub static MOON_TRANSFER: Scenario = Scenario {
    id: "moon_transfer",
    name: "Moon Transfer",
    description: "Raise your orbit from a parking orbit and fly past Luna.",
    build: moon_transfer,
};

/// Scenario 3: Escape
///
/// The craft starts above escape speed; burn retrograde before the
/// boundary grace period runs out.
pub static ESCAPE: Scenario = Scenario {
    id: "escape",
    name: "Escape Recovery",
    description: "Craft on an escape trajectory. Kill enough speed to stay bound.",
    build: escape,
};

fn moon_transfer() -> SimulationConfig {
    let g = 1.0;
    let terra = BodyConfig::fixed("Terra", DVec2::ZERO, 1.0e6, 50.0);
    let luna = BodyConfig::circular(
        "Luna",
        &terra,
        g,
        900.0,
        std::f64::consts::FRAC_PI_2,
        3.0e4,
        15.0,
    );
    let craft = CraftConfig {
        fuel_consumption_rate: 0.02,
        ..CraftConfig::circular_orbit(&terra, g, 250.0)
    };

    SimulationConfig {
        g,
        boundary_radius: 3000.0,
        time_scale: 2.0,
        craft,
        bodies: vec![terra, luna],
        ..SimulationConfig::default()
    }
}

fn escape() -> SimulationConfig {
    let g = 1.0;
    let terra = BodyConfig::fixed("Terra", DVec2::ZERO, 1.0e6, 50.0);
    let orbit = CraftConfig::circular_orbit(&terra, g, 200.0);
    let craft = CraftConfig {
        velocity: orbit.velocity * 1.6,
        // Facing retrograde
        orientation: -std::f64::consts::FRAC_PI_2,
        ..orbit
    };

    SimulationConfig {
        g,
        boundary_radius: 1500.0,
        boundary_grace: 10.0,
        craft,
        bodies: vec![terra],
        ..SimulationConfig::default()
    }
}
