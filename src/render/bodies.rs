//! Gizmo drawing for bodies, the craft and the play-area boundary.

use bevy::prelude::*;

use super::{palette, to_render};
use crate::coordinator::Simulation;

/// Craft hull outline length relative to its collision radius.
const HULL_SCALE: f32 = 2.0;

pub fn draw_bodies(mut gizmos: Gizmos, sim: Res<Simulation>) {
    for body in sim.snapshot().bodies {
        let center = to_render(body.position);
        let radius = (body.radius as f32).max(1.0);
        gizmos.circle_2d(center, radius, palette::BODY).resolution(64);
    }
}

/// Boundary circle; turns red while the craft is outside it.
pub fn draw_boundary(mut gizmos: Gizmos, sim: Res<Simulation>) {
    let snapshot = sim.snapshot();
    let color = if snapshot.boundary_time_remaining.is_some() {
        palette::BOUNDARY_WARNING
    } else {
        palette::BOUNDARY
    };
    gizmos
        .circle_2d(Vec2::ZERO, snapshot.boundary_radius as f32, color)
        .resolution(128);
}

/// Triangle pointing along the heading, with a flame while thrust applies.
pub fn draw_craft(mut gizmos: Gizmos, sim: Res<Simulation>) {
    let craft = sim.snapshot().craft;
    let center = to_render(craft.position);
    let size = (craft.radius as f32).max(1.0) * HULL_SCALE;
    let heading = Vec2::from_angle(craft.orientation as f32);
    let side = heading.perp();

    let nose = center + heading * size;
    let left = center - heading * size * 0.6 + side * size * 0.5;
    let right = center - heading * size * 0.6 - side * size * 0.5;

    let color = if craft.destroyed {
        palette::CRAFT_DESTROYED
    } else {
        palette::CRAFT
    };
    gizmos.line_2d(nose, left, color);
    gizmos.line_2d(left, right, color);
    gizmos.line_2d(right, nose, color);

    if craft.effective_thrust() > 0.0 {
        let tail = center - heading * size * 0.6;
        gizmos.line_2d(tail, tail - heading * size, palette::FLAME);
    }
}
