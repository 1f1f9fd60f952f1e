//! Semi-implicit (symplectic) Euler integration.
//!
//! Velocity is advanced first and the *new* velocity moves the position.
//! Over thousands of steps this keeps orbital energy bounded where plain
//! explicit Euler spirals outward.

use bevy::math::DVec2;

/// Result of one integration step. The caller decides whether to commit it
/// to the live craft or to a prediction clone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationStep {
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
}

/// Advance one semi-implicit Euler step.
///
/// # Arguments
/// * `position`, `velocity` - State at the start of the step
/// * `force` - Net force accumulated for this step
/// * `mass` - Inertial mass (must be positive)
/// * `dt` - Step length after time scaling and clamping
#[inline]
pub fn step(position: DVec2, velocity: DVec2, force: DVec2, mass: f64, dt: f64) -> IntegrationStep {
    let acceleration = force / mass;
    let velocity = velocity + acceleration * dt;
    let position = position + velocity * dt;
    IntegrationStep {
        position,
        velocity,
        acceleration,
    }
}

/// Explicit Euler step, moving position with the pre-step velocity.
///
/// Not used by the simulation; kept as the baseline the semi-implicit
/// scheme is compared against.
#[inline]
pub fn explicit_euler_step(
    position: DVec2,
    velocity: DVec2,
    force: DVec2,
    mass: f64,
    dt: f64,
) -> IntegrationStep {
    let acceleration = force / mass;
    IntegrationStep {
        position: position + velocity * dt,
        velocity: velocity + acceleration * dt,
        acceleration,
    }
}

/// Physics step for a frame: real delta times the time scale, clamped to
/// `max_dt`. Negative or non-finite deltas produce a zero step.
#[inline]
pub fn clamp_dt(frame_dt: f64, time_scale: f64, max_dt: f64) -> f64 {
    let scaled = frame_dt * time_scale;
    if !scaled.is_finite() || scaled <= 0.0 {
        return 0.0;
    }
    scaled.min(max_dt)
}
