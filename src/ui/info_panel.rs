//! Info panel showing fuel and flight telemetry.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::coordinator::Simulation;
use crate::telemetry::Telemetry;

mod colors {
    use bevy_egui::egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(20, 20, 30, 220);
    pub const FUEL_OK: Color32 = Color32::from_rgb(85, 221, 136);
    pub const FUEL_LOW: Color32 = Color32::from_rgb(224, 85, 85);
    pub const MUTED: Color32 = Color32::from_rgb(150, 150, 160);
}

/// Fuel fraction under which the gauge turns red.
const LOW_FUEL: f64 = 0.2;

/// System that renders the telemetry panel.
pub fn info_panel_system(mut contexts: EguiContexts, sim: Res<Simulation>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let telemetry = Telemetry::from_state(sim.craft(), sim.bodies(), sim.config().g);

    egui::Window::new("Flight")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .resizable(false)
        .collapsible(true)
        .frame(
            egui::Frame::NONE
                .fill(colors::PANEL_BG)
                .inner_margin(egui::Margin::same(12)),
        )
        .show(ctx, |ui| {
            render_fuel(ui, telemetry.fuel_fraction);
            ui.separator();

            egui::Grid::new("telemetry_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| render_telemetry(ui, &telemetry));
        });
}

fn render_fuel(ui: &mut egui::Ui, fuel: f64) {
    let color = if fuel < LOW_FUEL {
        colors::FUEL_LOW
    } else {
        colors::FUEL_OK
    };
    ui.horizontal(|ui| {
        ui.label(icons::icon_colored(icons::FUEL, 16.0, color));
        ui.add(
            egui::ProgressBar::new(fuel as f32)
                .desired_width(140.0)
                .fill(color)
                .text(format!("{:.0}%", fuel * 100.0)),
        );
    });
}

fn render_telemetry(ui: &mut egui::Ui, telemetry: &Telemetry) {
    row(ui, "Speed", format!("{:.1}", telemetry.speed));
    row(
        ui,
        "From origin",
        format!("{:.0}", telemetry.distance_from_origin),
    );

    let Some(body) = &telemetry.dominant_body else {
        return;
    };
    ui.label(icons::icon_colored(icons::PLANET, 14.0, colors::MUTED));
    ui.label(body.as_str());
    ui.end_row();

    if let Some(altitude) = telemetry.altitude {
        row(ui, "Altitude", format!("{altitude:.0}"));
    }

    let Some(orbit) = &telemetry.orbit else {
        return;
    };
    row(ui, "Eccentricity", format!("{:.3}", orbit.eccentricity));
    row(ui, "Periapsis", format!("{:.0}", orbit.periapsis()));
    match (orbit.apoapsis(), orbit.period) {
        (Some(apoapsis), Some(period)) => {
            row(ui, "Apoapsis", format!("{apoapsis:.0}"));
            row(ui, "Period", format!("{period:.1}s"));
        }
        _ => row(ui, "Orbit", "escape".to_string()),
    }
}

fn row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(egui::RichText::new(label).color(colors::MUTED));
    ui.label(egui::RichText::new(value).monospace());
    ui.end_row();
}
