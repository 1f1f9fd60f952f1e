//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::DVec2;
use orbital_sandbox::config::{BodyConfig, CraftConfig, SimulationConfig};
use orbital_sandbox::outcome::TickOutcome;
use orbital_sandbox::Simulation;

/// Mass of the single central body used by most fixtures.
pub const CENTRAL_MASS: f64 = 1.0e6;
/// Radius of the central body.
pub const CENTRAL_RADIUS: f64 = 50.0;
/// Physics step used by the tests (equal to the default `max_dt`).
pub const DT: f64 = 0.1;

/// One fixed central body and a craft at the given state, with a boundary
/// far enough away that it never interferes.
pub fn single_body_config(position: DVec2, velocity: DVec2) -> SimulationConfig {
    let terra = BodyConfig::fixed("Terra", DVec2::ZERO, CENTRAL_MASS, CENTRAL_RADIUS);
    SimulationConfig {
        g: 1.0,
        boundary_radius: 1.0e6,
        craft: CraftConfig {
            position,
            velocity,
            orientation: 0.0,
            ..CraftConfig::default()
        },
        bodies: vec![terra],
        ..SimulationConfig::default()
    }
}

/// Circular orbit state of radius `r` around the central body.
pub fn circular_orbit(r: f64) -> (DVec2, DVec2) {
    (
        DVec2::new(r, 0.0),
        DVec2::new(0.0, (CENTRAL_MASS / r).sqrt()),
    )
}

/// Built and started simulation.
pub fn running(config: SimulationConfig) -> Simulation {
    let mut sim = Simulation::new(config).expect("valid test config");
    sim.start();
    sim
}

/// Tick `n` times, stopping early on a terminal outcome.
pub fn run_ticks(sim: &mut Simulation, n: usize, dt: f64) -> Vec<TickOutcome> {
    let mut outcomes = Vec::with_capacity(n);
    for _ in 0..n {
        let outcome = sim.tick(dt);
        let terminal = outcome.is_terminal();
        outcomes.push(outcome);
        if terminal {
            break;
        }
    }
    outcomes
}

/// Specific orbital energy around the central body.
pub fn orbital_energy(pos: DVec2, vel: DVec2) -> f64 {
    0.5 * vel.length_squared() - CENTRAL_MASS / pos.length()
}

/// Orbital period for a given semi-major axis around the central body.
pub fn orbital_period(semi_major_axis: f64) -> f64 {
    std::f64::consts::TAU * (semi_major_axis.powi(3) / CENTRAL_MASS).sqrt()
}
