//! Physics core: force accumulation and numerical integration.
//!
//! Both halves are pure functions. The coordinator and the trajectory
//! predictor share them so a preview follows exactly the same rules as the
//! live simulation.

mod gravity;
pub mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::math::DVec2;

pub use gravity::{net_gravity, thrust_force};
pub use integrator::{clamp_dt, IntegrationStep};

use crate::bodies::Body;
use crate::types::PointMass;

/// Gravity plus thrust on a point mass, in one call.
#[inline]
pub fn net_force<P: PointMass + ?Sized>(
    point: &P,
    bodies: &[Body],
    g: f64,
    thrust: f64,
    orientation: f64,
) -> DVec2 {
    let mut force = net_gravity(point, bodies, g);
    if thrust > 0.0 {
        force += thrust_force(thrust, orientation);
    }
    force
}
