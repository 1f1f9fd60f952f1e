//! Core physics types and constants for the orbital sandbox.

use bevy::math::DVec2;

/// Two-component f64 vector used for positions, velocities and forces.
pub type Vector2 = DVec2;

/// Softening term for squared distances in the force model.
///
/// Expressed in body-centric units; only matters when two centers coincide.
pub const SOFTENING: f64 = 1e-6;

/// Largest physics step the integrator is allowed to take (seconds).
pub const DEFAULT_MAX_DT: f64 = 0.1;

/// Time outside the boundary tolerated before the mission fails (seconds).
pub const DEFAULT_BOUNDARY_GRACE: f64 = 30.0;

/// Fuel below this fraction is treated as empty.
pub const FUEL_EPSILON: f64 = 1e-9;

/// Anything with a position and an inertial mass that gravity can act on.
///
/// Both the massive bodies and the piloted craft implement this so the
/// force model treats them uniformly.
pub trait PointMass {
    fn position(&self) -> DVec2;
    fn mass(&self) -> f64;
}

/// Normalize an angle to `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can return TAU itself for tiny negative inputs
    if wrapped >= std::f64::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// True when both components are finite.
#[inline]
pub fn is_finite_vec(v: DVec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_range() {
        for angle in [-10.0 * PI, -PI, -1e-18, 0.0, PI, TAU, 7.5 * TAU] {
            let n = normalize_angle(angle);
            assert!((0.0..TAU).contains(&n), "{angle} normalized to {n}");
        }
    }

    #[test]
    fn test_normalize_angle_wraps_negative() {
        approx::assert_relative_eq!(normalize_angle(-PI / 2.0), 1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_is_finite_vec() {
        assert!(is_finite_vec(DVec2::new(1.0, -2.0)));
        assert!(!is_finite_vec(DVec2::new(f64::NAN, 0.0)));
        assert!(!is_finite_vec(DVec2::new(0.0, f64::INFINITY)));
    }
}
