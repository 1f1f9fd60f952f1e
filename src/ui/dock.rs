//! Dock (bottom bar) for the primary simulation controls.
//!
//! - Play/Pause toggle (starts a stopped run)
//! - Elapsed simulated time
//! - Time scale with slower/faster buttons
//! - Reset button

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{format_elapsed, icons};
use crate::coordinator::Simulation;
use crate::input::next_time_scale;
use crate::time::ClockState;

/// Colors for the dock UI.
mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const DISABLED: Color32 = Color32::from_rgb(120, 120, 130);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// System that renders the dock at the bottom.
pub fn dock_system(mut contexts: EguiContexts, mut sim: ResMut<Simulation>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("dock")
        .exact_height(56.0)
        .frame(
            egui::Frame::NONE
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 16.0;

                render_play_pause(ui, &mut sim);
                ui.separator();

                ui.label(icons::icon_colored(icons::CLOCK, 16.0, colors::TEXT));
                ui.label(
                    egui::RichText::new(format_elapsed(sim.clock().elapsed()))
                        .monospace()
                        .size(14.0)
                        .color(colors::TEXT),
                );
                ui.separator();

                render_time_scale(ui, &mut sim);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let reset = egui::Button::new(icons::icon_colored(
                        icons::RESET,
                        20.0,
                        colors::TEXT,
                    ))
                    .min_size(egui::vec2(40.0, 36.0));
                    if ui.add(reset).on_hover_text("Reset (R)").clicked() {
                        sim.reset();
                    }
                });
            });
        });
}

/// Render the play/pause toggle button.
fn render_play_pause(ui: &mut egui::Ui, sim: &mut Simulation) {
    let finished = sim.clock().is_finished();
    let (icon, color, tooltip) = match sim.clock().state() {
        ClockState::Running => (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)"),
        ClockState::Paused => (icons::PLAY, colors::PLAY_ICON, "Resume (Space)"),
        ClockState::Stopped if finished => (icons::PLAY, colors::DISABLED, "Reset to fly again"),
        ClockState::Stopped => (icons::PLAY, colors::PLAY_ICON, "Start (Space)"),
    };

    let button = egui::Button::new(icons::icon_colored(icon, 22.0, color))
        .min_size(egui::vec2(40.0, 36.0));

    if ui
        .add_enabled(!finished, button)
        .on_hover_text(tooltip)
        .clicked()
    {
        sim.start();
    }
}

/// Slower/faster buttons around the current time scale.
fn render_time_scale(ui: &mut egui::Ui, sim: &mut Simulation) {
    let scale = sim.clock().time_scale;
    let mut requested = None;

    if ui
        .button(icons::icon_colored(icons::SLOWER, 16.0, colors::TEXT))
        .on_hover_text("Slower ([)")
        .clicked()
    {
        requested = Some(next_time_scale(scale, false));
    }
    ui.label(
        egui::RichText::new(format!("{scale}x"))
            .monospace()
            .size(14.0)
            .color(colors::TEXT),
    );
    if ui
        .button(icons::icon_colored(icons::FASTER, 16.0, colors::TEXT))
        .on_hover_text("Faster (])")
        .clicked()
    {
        requested = Some(next_time_scale(scale, true));
    }

    if let Some(scale) = requested {
        if let Err(err) = sim.set_time_scale(scale) {
            warn!("{err}");
        }
    }
}
