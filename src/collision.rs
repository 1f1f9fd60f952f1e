//! Sphere-overlap collision detection between a moving point mass and the
//! registered bodies.
//!
//! The first body in registry order that overlaps wins, not the nearest one.
//! Bodies do not move within a tick, so the reported body is stable from
//! frame to frame when several overlap at once.

use bevy::math::DVec2;

use crate::bodies::Body;

/// Return the first body whose center lies strictly closer than the sum of
/// radii to `position`.
///
/// Touching (distance exactly equal to the radius sum) is not a collision.
pub fn check_collision(position: DVec2, radius: f64, bodies: &[Body]) -> Option<&Body> {
    bodies.iter().find(|body| {
        let reach = radius + body.radius;
        (body.position - position).length_squared() < reach * reach
    })
}
