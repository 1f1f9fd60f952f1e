//! Banners for the boundary countdown and the mission outcome.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::coordinator::Simulation;
use crate::outcome::{FailureReason, MissionOutcome};

mod colors {
    use bevy_egui::egui::Color32;

    pub const COLLISION_BG: Color32 = Color32::from_rgba_premultiplied(80, 30, 30, 240);
    pub const COLLISION_BORDER: Color32 = Color32::from_rgb(224, 85, 85);
    pub const WARNING_BG: Color32 = Color32::from_rgba_premultiplied(80, 60, 20, 240);
    pub const WARNING_BORDER: Color32 = Color32::from_rgb(221, 170, 85);
}

/// Outcome banner takes precedence over the boundary countdown.
pub fn banner_system(mut contexts: EguiContexts, mut sim: ResMut<Simulation>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if let Some(outcome) = sim.outcome().cloned() {
        if render_outcome_banner(ctx, &outcome) {
            sim.reset();
        }
        return;
    }

    if let Some(remaining) = sim.boundary().time_remaining() {
        render_boundary_banner(ctx, remaining);
    }
}

/// Returns true if the reset button was clicked.
fn render_outcome_banner(ctx: &egui::Context, outcome: &MissionOutcome) -> bool {
    let icon = match outcome.reason {
        FailureReason::Collision => icons::COLLISION,
        FailureReason::OutOfBounds | FailureReason::Halted => icons::WARNING,
    };
    let mut reset = false;

    egui::TopBottomPanel::top("outcome_banner")
        .frame(
            egui::Frame::NONE
                .fill(colors::COLLISION_BG)
                .inner_margin(egui::Margin::symmetric(16, 12))
                .stroke(egui::Stroke::new(2.0, colors::COLLISION_BORDER)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(icons::icon_colored(icon, 18.0, colors::COLLISION_BORDER));
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(outcome.to_string().to_uppercase())
                        .strong()
                        .size(16.0)
                        .color(egui::Color32::WHITE),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = egui::Button::new(
                        egui::RichText::new("Reset")
                            .size(14.0)
                            .color(egui::Color32::WHITE),
                    )
                    .min_size(egui::vec2(60.0, 28.0));
                    reset = ui.add(button).clicked();
                });
            });
        });

    reset
}

fn render_boundary_banner(ctx: &egui::Context, remaining: f64) {
    egui::TopBottomPanel::top("boundary_banner")
        .frame(
            egui::Frame::NONE
                .fill(colors::WARNING_BG)
                .inner_margin(egui::Margin::symmetric(16, 12))
                .stroke(egui::Stroke::new(2.0, colors::WARNING_BORDER)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(icons::icon_colored(icons::WARNING, 18.0, colors::WARNING_BORDER));
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!(
                        "Outside the boundary: return within {remaining:.1}s"
                    ))
                    .strong()
                    .size(16.0)
                    .color(egui::Color32::WHITE),
                );
            });
        });
}
