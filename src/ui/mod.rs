//! UI module providing the egui-based HUD.
//!
//! - Dock: play/pause, reset, time scale, elapsed time
//! - Info panel: fuel and flight telemetry
//! - Banners: boundary countdown and mission outcome

mod banners;
mod dock;
pub mod icons;
mod info_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::coordinator::Simulation;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            // Font initialization must run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    dock::dock_system,
                    info_panel::info_panel_system,
                    banners::banner_system,
                )
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0)
                    .run_if(resource_exists::<Simulation>),
            );
    }
}

/// Format simulated seconds as `mm:ss.s`.
pub fn format_elapsed(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor();
    format!("{:02}:{:04.1}", minutes as u64, seconds - minutes * 60.0)
}
