//! Orbital Sandbox - 2D orbital mechanics core
//!
//! A piloted craft flies among fixed and ephemeris-driven gravitating
//! bodies. The library holds the simulation core (force model, integrator,
//! collision, boundary, prediction, clock and coordinator) plus the Bevy
//! plugins that host it.

pub mod bodies;
pub mod boundary;
pub mod camera;
pub mod collision;
pub mod config;
pub mod coordinator;
pub mod craft;
pub mod ephemeris;
pub mod input;
pub mod outcome;
pub mod physics;
pub mod prediction;
pub mod render;
pub mod scenarios;
pub mod telemetry;
pub mod time;
pub mod types;
pub mod ui;

pub use config::SimulationConfig;
pub use coordinator::{Simulation, SimulationPlugin};

#[cfg(test)]
pub mod test_utils;
