//! Orbital behavior of the live simulation loop.

mod common;

use bevy::math::DVec2;
use common::*;
use orbital_sandbox::outcome::TickOutcome;

#[test]
fn test_circular_orbit_stays_near_radius() {
    let r = 150.0;
    let (pos, vel) = circular_orbit(r);
    let mut sim = running(single_body_config(pos, vel));

    let dt = 0.02;
    let steps = (5.0 * orbital_period(r) / dt) as usize;
    for _ in 0..steps {
        assert!(matches!(sim.tick(dt), TickOutcome::Advanced { .. }));
        let distance = sim.craft().position.length();
        assert!(
            (distance - r).abs() < 0.05 * r,
            "radius drifted to {distance}"
        );
    }
}

#[test]
fn test_orbit_returns_near_start_after_one_period() {
    let r = 200.0;
    let (pos, vel) = circular_orbit(r);
    let mut sim = running(single_body_config(pos, vel));

    let dt = 0.01;
    let steps = (orbital_period(r) / dt).round() as usize;
    run_ticks(&mut sim, steps, dt);

    let error = sim.craft().position.distance(pos);
    assert!(error < 0.05 * r, "closure error {error}");
}

#[test]
fn test_energy_bounded_on_elliptical_orbit() {
    let r_peri = 120.0;
    let a = 240.0;
    let v_peri = (CENTRAL_MASS * (2.0 / r_peri - 1.0 / a)).sqrt();
    let pos = DVec2::new(r_peri, 0.0);
    let vel = DVec2::new(0.0, v_peri);
    let e0 = orbital_energy(pos, vel);

    let mut sim = running(single_body_config(pos, vel));
    let dt = 0.005;
    let steps = (2.0 * orbital_period(a) / dt) as usize;
    for _ in 0..steps {
        sim.tick(dt);
        let craft = sim.craft();
        let e = orbital_energy(craft.position, craft.velocity);
        assert!(
            ((e - e0) / e0).abs() < 0.05,
            "energy {e} strayed from {e0}"
        );
    }
}

#[test]
fn test_escape_distance_increases_monotonically() {
    let r = 150.0;
    let v_esc = (2.0 * CENTRAL_MASS / r).sqrt();
    let mut sim = running(single_body_config(
        DVec2::new(r, 0.0),
        DVec2::new(1.5 * v_esc, 0.0),
    ));

    let mut last = r;
    for _ in 0..200 {
        sim.tick(DT);
        let distance = sim.craft().position.length();
        assert!(distance > last, "distance fell from {last} to {distance}");
        last = distance;
    }
}

#[test]
fn test_clock_accumulates_clamped_dt() {
    let (pos, vel) = circular_orbit(150.0);
    let mut config = single_body_config(pos, vel);
    config.time_scale = 4.0;
    let mut sim = running(config);

    // 0.016 * 4 = 0.064 (unclamped), 0.05 * 4 = 0.2 -> 0.1 (clamped)
    sim.tick(0.016);
    sim.tick(0.05);
    approx::assert_relative_eq!(sim.clock().elapsed(), 0.164, epsilon = 1e-12);
}
