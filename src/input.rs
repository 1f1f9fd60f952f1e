//! Keyboard input: craft controls and simulation shortcuts.
//!
//! Held keys map to [`Control`]s through press/release edges, so the craft
//! only ever sees start/stop commands.

use bevy::prelude::*;

use crate::coordinator::{Simulation, SimulationSet};
use crate::craft::Control;

/// Key bindings for craft controls. Several keys may map to one control.
pub const CONTROL_BINDINGS: &[(KeyCode, Control)] = &[
    (KeyCode::ArrowUp, Control::Thrust),
    (KeyCode::KeyW, Control::Thrust),
    (KeyCode::ArrowLeft, Control::RotateLeft),
    (KeyCode::KeyA, Control::RotateLeft),
    (KeyCode::ArrowRight, Control::RotateRight),
    (KeyCode::KeyD, Control::RotateRight),
];

/// Slowest and fastest time scale reachable from the keyboard.
pub const MIN_TIME_SCALE: f64 = 0.125;
pub const MAX_TIME_SCALE: f64 = 64.0;

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (craft_controls, keyboard_shortcuts)
                .in_set(SimulationSet::Input)
                .run_if(resource_exists::<ButtonInput<KeyCode>>),
        );
    }
}

/// Halve or double the time scale within the keyboard range.
pub fn next_time_scale(scale: f64, faster: bool) -> f64 {
    if faster {
        (scale * 2.0).min(MAX_TIME_SCALE)
    } else {
        (scale * 0.5).max(MIN_TIME_SCALE)
    }
}

/// Forward control key edges to the coordinator.
fn craft_controls(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Simulation>) {
    for &(key, control) in CONTROL_BINDINGS {
        let result = if keys.just_pressed(key) {
            sim.start_control(control)
        } else if keys.just_released(key) && !other_binding_held(&keys, key, control) {
            sim.stop_control(control)
        } else {
            continue;
        };
        if let Err(err) = result {
            debug!("Ignoring {:?}: {err}", control);
        }
    }
}

/// True if another key bound to `control` is still down.
fn other_binding_held(keys: &ButtonInput<KeyCode>, released: KeyCode, control: Control) -> bool {
    CONTROL_BINDINGS
        .iter()
        .any(|&(key, c)| c == control && key != released && keys.pressed(key))
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Simulation>) {
    // Space: start, then toggle pause
    if keys.just_pressed(KeyCode::Space) {
        sim.start();
    }

    // Time controls: [ and ] to adjust simulation speed
    if keys.just_pressed(KeyCode::BracketLeft) || keys.just_pressed(KeyCode::BracketRight) {
        let faster = keys.just_pressed(KeyCode::BracketRight);
        let scale = next_time_scale(sim.clock().time_scale, faster);
        if let Err(err) = sim.set_time_scale(scale) {
            warn!("{err}");
        }
    }

    // R: reset simulation
    if keys.just_pressed(KeyCode::KeyR) {
        sim.reset();
    }
}
