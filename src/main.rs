//! Orbital Sandbox - piloted craft simulator
//!
//! Usage: `orbital-sandbox [scenario]` where scenario is one of the preset
//! ids (`low_orbit` by default).

use std::process::ExitCode;
use std::sync::Arc;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orbital_sandbox::camera::CameraPlugin;
use orbital_sandbox::ephemeris::{EphemerisPlugin, KeplerEphemeris};
use orbital_sandbox::input::InputPlugin;
use orbital_sandbox::render::RenderPlugin;
use orbital_sandbox::scenarios::{self, DEFAULT_SCENARIO, SCENARIOS};
use orbital_sandbox::ui::UiPlugin;
use orbital_sandbox::{Simulation, SimulationPlugin};

fn main() -> ExitCode {
    let id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCENARIO.to_string());

    let Some(scenario) = scenarios::find(&id) else {
        eprintln!("unknown scenario '{id}'; available scenarios:");
        for s in SCENARIOS {
            eprintln!("  {:<14} {}", s.id, s.description);
        }
        return ExitCode::FAILURE;
    };

    let config = scenario.config();
    let simulation = match Simulation::new(config.clone()) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("invalid scenario '{id}': {err}");
            return ExitCode::FAILURE;
        }
    };
    let ephemeris = Arc::new(KeplerEphemeris::from_config(&config));

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: format!("Orbital Sandbox - {}", scenario.name),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .insert_resource(simulation)
        .add_plugins((
            SimulationPlugin,
            EphemerisPlugin { source: ephemeris },
            InputPlugin,
            CameraPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();

    ExitCode::SUCCESS
}
