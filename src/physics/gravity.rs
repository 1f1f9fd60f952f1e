//! Force model: gravity from every registered body plus engine thrust.

use bevy::math::DVec2;

use crate::bodies::Body;
use crate::types::{PointMass, SOFTENING};

/// Net gravitational force on `point` from `bodies`.
///
/// Each body contributes `G·M·m / max(d², SOFTENING)` directed from the
/// point toward the body. A body that *is* the queried point (same address)
/// is skipped; a distinct body that merely shares its position is not, and
/// contributes nothing only because its direction is undefined.
///
/// # Arguments
/// * `point` - The object being pulled
/// * `bodies` - Attracting bodies, in registry order
/// * `g` - Gravitational constant in scenario units
///
/// # Returns
/// Force vector in scenario units (mass · distance / time²)
pub fn net_gravity<P: PointMass + ?Sized>(point: &P, bodies: &[Body], g: f64) -> DVec2 {
    let pos = point.position();
    let mass = point.mass();
    let mut force = DVec2::ZERO;

    for body in bodies {
        if std::ptr::addr_eq(body as *const Body, point as *const P) {
            continue;
        }

        let delta = body.position - pos;
        let r_squared = delta.length_squared();
        if r_squared == 0.0 {
            continue;
        }

        let magnitude = g * body.mass * mass / r_squared.max(SOFTENING);
        force += delta / r_squared.sqrt() * magnitude;
    }

    force
}

/// Engine force for a given magnitude and heading.
#[inline]
pub fn thrust_force(magnitude: f64, orientation: f64) -> DVec2 {
    DVec2::new(orientation.cos(), orientation.sin()) * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::craft::CraftSnapshot;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn body(name: &str, pos: DVec2, mass: f64) -> Body {
        Body::new(name, pos, DVec2::ZERO, mass, 1.0).unwrap()
    }

    fn probe(pos: DVec2, mass: f64) -> CraftSnapshot {
        CraftSnapshot {
            position: pos,
            velocity: DVec2::ZERO,
            mass,
            radius: 0.0,
            orientation: 0.0,
            thrusting: false,
            thrust: 0.0,
            fuel_fraction: 1.0,
            fuel_consumption_rate: 0.0,
        }
    }

    #[test]
    fn test_inverse_square_magnitude() {
        let bodies = [body("Sun", DVec2::new(10.0, 0.0), 500.0)];
        let p = probe(DVec2::ZERO, 2.0);
        let f = net_gravity(&p, &bodies, 3.0);

        assert_relative_eq!(f.length(), 3.0 * 500.0 * 2.0 / 100.0, max_relative = 1e-12);
        assert_relative_eq!(f.normalize().x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_forces_superpose() {
        let bodies = [
            body("Left", DVec2::new(-5.0, 0.0), 100.0),
            body("Right", DVec2::new(5.0, 0.0), 100.0),
        ];
        let f = net_gravity(&probe(DVec2::ZERO, 1.0), &bodies, 1.0);
        assert_relative_eq!(f.length(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_distance_is_finite() {
        let bodies = [body("Core", DVec2::ZERO, 1e30)];
        let f = net_gravity(&probe(DVec2::ZERO, 1.0), &bodies, 1.0);
        assert!(f.x.is_finite() && f.y.is_finite());
    }

    #[test]
    fn test_softening_bounds_tiny_separation() {
        let g = 1.0;
        let m = 10.0;
        let bodies = [body("Core", DVec2::new(1e-5, 0.0), m)];
        let f = net_gravity(&probe(DVec2::ZERO, 1.0), &bodies, g);
        // d² = 1e-10 < SOFTENING, so the denominator is the softening term
        assert_relative_eq!(f.length(), g * m / SOFTENING, max_relative = 1e-9);
    }

    #[test]
    fn test_self_exclusion_by_identity() {
        let bodies = vec![
            body("A", DVec2::ZERO, 100.0),
            body("B", DVec2::new(4.0, 0.0), 100.0),
        ];
        let on_a = net_gravity(&bodies[0], &bodies, 1.0);
        assert_relative_eq!(on_a.x, 100.0 * 100.0 / 16.0, max_relative = 1e-12);
        assert_relative_eq!(on_a.y, 0.0);
    }

    #[test]
    fn test_twin_at_same_position_not_treated_as_self() {
        // A clone is a different object, so the original is not skipped;
        // with zero separation it simply contributes nothing.
        let bodies = vec![body("A", DVec2::ZERO, 100.0), body("B", DVec2::new(2.0, 0.0), 4.0)];
        let twin = bodies[0].clone();
        let f = net_gravity(&twin, &bodies, 1.0);
        assert_relative_eq!(f.x, 100.0 * 4.0 / 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_thrust_force_direction() {
        let f = thrust_force(5.0, FRAC_PI_2);
        assert_relative_eq!(f.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(f.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_thrust_is_zero_force() {
        assert_eq!(thrust_force(0.0, 1.234), DVec2::ZERO);
    }
}
