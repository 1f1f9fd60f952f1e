//! Dashed trajectory preview shown while paused.

use bevy::math::DVec2;
use bevy::prelude::*;

use super::{palette, to_render};
use crate::coordinator::Simulation;

/// Sample points per dash (and per gap).
const DASH_LENGTH: usize = 4;

pub fn draw_predicted_path(mut gizmos: Gizmos, sim: Res<Simulation>) {
    let snapshot = sim.snapshot();
    let path = snapshot.predicted_path;
    if path.is_empty() {
        return;
    }

    let color = if path.ends_in_collision() {
        palette::PREDICTION_IMPACT
    } else {
        palette::PREDICTION
    };

    let start = std::iter::once(snapshot.craft.position);
    let points: Vec<DVec2> = start.chain(path.points.iter().copied()).collect();
    for dash in dashes(&points) {
        gizmos.linestrip_2d(dash.iter().map(|p| to_render(*p)), color);
    }

    if let Some(last) = points.last() {
        gizmos.circle_2d(to_render(*last), 2.0, color);
    }
}

/// Split a polyline into alternating dash segments, skipping the gaps.
fn dashes(points: &[DVec2]) -> impl Iterator<Item = &[DVec2]> {
    points
        .windows(DASH_LENGTH + 1)
        .step_by(DASH_LENGTH * 2)
}
