//! Preset scenarios.
//!
//! Each scenario is a named recipe for a [`SimulationConfig`]:
//! - Low orbit (default sandbox)
//! - Moon transfer
//! - Escape recovery

pub mod presets;

use crate::config::SimulationConfig;

pub use presets::SCENARIOS;

/// A predefined scenario configuration.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Unique identifier, also accepted on the command line.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description of the scenario.
    pub description: &'static str,
    build: fn() -> SimulationConfig,
}

impl Scenario {
    pub fn config(&self) -> SimulationConfig {
        (self.build)()
    }
}

/// Id of the scenario loaded when none is requested.
pub const DEFAULT_SCENARIO: &str = "low_orbit";

/// Look up a scenario by id.
pub fn find(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}
