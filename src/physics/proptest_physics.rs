//! Property-based tests for the force model and integrator using proptest.

use bevy::math::DVec2;
use proptest::prelude::*;

use super::integrator::{explicit_euler_step, step};
use super::{net_gravity, thrust_force};
use crate::bodies::Body;
use crate::test_utils::{assertions, fixtures};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Gravity from a single body obeys the inverse-square law and points at it.
    #[test]
    fn prop_inverse_square_law(
        distance in 0.01f64..1.0e6,
        angle in 0.0f64..std::f64::consts::TAU,
        body_mass in 1.0f64..1.0e12,
        probe_mass in 0.1f64..1.0e3,
    ) {
        let dir = DVec2::new(angle.cos(), angle.sin());
        let bodies = [Body::new("M", dir * distance, DVec2::ZERO, body_mass, 0.0).unwrap()];
        let probe = fixtures::probe(DVec2::ZERO, DVec2::ZERO, probe_mass);

        let f = net_gravity(&probe, &bodies, 1.0);
        let expected = body_mass * probe_mass / (distance * distance);

        prop_assert!(((f.length() - expected) / expected).abs() < 1e-9);
        prop_assert!((f.normalize() - dir).length() < 1e-9);
    }

    /// No input position produces a non-finite force.
    #[test]
    fn prop_gravity_always_finite(
        x in -1.0e-3f64..1.0e-3,
        y in -1.0e-3f64..1.0e-3,
    ) {
        let bodies = [Body::new("M", DVec2::ZERO, DVec2::ZERO, 1.0e6, 1.0).unwrap()];
        let probe = fixtures::probe(DVec2::new(x, y), DVec2::ZERO, 1.0);
        let f = net_gravity(&probe, &bodies, 1.0);
        prop_assert!(f.x.is_finite() && f.y.is_finite());
    }

    /// Thrust magnitude is independent of heading.
    #[test]
    fn prop_thrust_magnitude(
        magnitude in 0.0f64..1.0e4,
        orientation in -10.0f64..10.0,
    ) {
        let f = thrust_force(magnitude, orientation);
        prop_assert!((f.length() - magnitude).abs() <= 1e-9 * magnitude.max(1.0));
    }

    /// With nonzero acceleration the two Euler orderings disagree by |a|·dt².
    #[test]
    fn prop_step_ordering_matters(
        fx in -100.0f64..100.0,
        fy in -100.0f64..100.0,
        dt in 0.001f64..0.1,
    ) {
        let force = DVec2::new(fx, fy);
        prop_assume!(force.length() > 1e-3);

        let semi = step(DVec2::ZERO, DVec2::ONE, force, 1.0, dt);
        let explicit = explicit_euler_step(DVec2::ZERO, DVec2::ONE, force, 1.0, dt);
        let gap = (semi.position - explicit.position).length();
        let expected = force.length() * dt * dt;

        prop_assert!((gap - expected).abs() <= 1e-6 * expected + 1e-15);
    }

    /// Semi-implicit Euler keeps a circular orbit's energy bounded.
    #[test]
    fn prop_energy_bounded_on_circular_orbit(
        radius in 50.0f64..500.0,
    ) {
        let gm = 1.0e6;
        let (mut pos, mut vel) = fixtures::circular_orbit(gm, radius);
        let initial = assertions::orbital_energy(pos, vel, gm);

        let period = assertions::orbital_period(gm, radius);
        let dt = period / 2000.0;
        let bodies = [Body::new("M", DVec2::ZERO, DVec2::ZERO, gm, 0.0).unwrap()];

        for _ in 0..2000 {
            let probe = fixtures::probe(pos, vel, 1.0);
            let s = step(pos, vel, net_gravity(&probe, &bodies, 1.0), 1.0, dt);
            pos = s.position;
            vel = s.velocity;
        }

        let drift = ((assertions::orbital_energy(pos, vel, gm) - initial) / initial).abs();
        prop_assert!(drift < 0.01, "energy drift {drift} at r = {radius}");
    }
}
