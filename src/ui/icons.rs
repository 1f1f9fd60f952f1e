//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

/// Icon text at a given size and color.
pub fn icon_colored(icon: &str, size: f32, color: egui::Color32) -> egui::RichText {
    egui::RichText::new(icon).size(size).color(color)
}

// Browse all icons at https://phosphoricons.com/

/// Play icon (triangle pointing right)
pub const PLAY: &str = egui_phosphor::regular::PLAY;
/// Pause icon (two vertical bars)
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
/// Reset/reload icon (circular arrow)
pub const RESET: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
/// Slower (rewind)
pub const SLOWER: &str = egui_phosphor::regular::REWIND;
/// Faster (fast forward)
pub const FASTER: &str = egui_phosphor::regular::FAST_FORWARD;
/// Clock/time icon
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;

/// Fuel/gas icon
pub const FUEL: &str = egui_phosphor::regular::GAS_PUMP;
/// Craft icon
pub const ROCKET: &str = egui_phosphor::regular::ROCKET;
/// Orbit/path icon
pub const ORBIT: &str = egui_phosphor::regular::PATH;
/// Planet/globe icon
pub const PLANET: &str = egui_phosphor::regular::GLOBE;

/// Warning/alert icon
pub const WARNING: &str = egui_phosphor::regular::WARNING;
/// Collision icon
pub const COLLISION: &str = egui_phosphor::regular::WARNING_CIRCLE;
