//! Test utilities for orbital mechanics tests.
//!
//! Provides fixtures for building orbits around a single central mass and
//! assertions for physical invariants.

use bevy::math::DVec2;

/// Fixtures for creating test states.
pub mod fixtures {
    use super::*;
    use crate::craft::CraftSnapshot;

    /// Position and velocity of a circular orbit of radius `r` around a
    /// central mass at the origin with gravitational parameter `gm`.
    ///
    /// Placed on the +x axis, moving in +y.
    pub fn circular_orbit(gm: f64, r: f64) -> (DVec2, DVec2) {
        (DVec2::new(r, 0.0), DVec2::new(0.0, (gm / r).sqrt()))
    }

    /// Radial escape at `factor` times escape velocity.
    pub fn radial_escape(gm: f64, r: f64, factor: f64) -> (DVec2, DVec2) {
        let v_esc = (2.0 * gm / r).sqrt();
        (DVec2::new(r, 0.0), DVec2::new(v_esc * factor, 0.0))
    }

    /// An unpowered point mass for force queries.
    pub fn probe(position: DVec2, velocity: DVec2, mass: f64) -> CraftSnapshot {
        CraftSnapshot {
            position,
            velocity,
            mass,
            radius: 0.0,
            orientation: 0.0,
            thrusting: false,
            thrust: 0.0,
            fuel_fraction: 1.0,
            fuel_consumption_rate: 0.0,
        }
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Specific orbital energy around a central mass at the origin.
    ///
    /// E = v²/2 - GM/r
    pub fn orbital_energy(pos: DVec2, vel: DVec2, gm: f64) -> f64 {
        0.5 * vel.length_squared() - gm / pos.length()
    }

    /// Circular orbit period T = 2π √(r³/GM).
    pub fn orbital_period(gm: f64, r: f64) -> f64 {
        std::f64::consts::TAU * (r.powi(3) / gm).sqrt()
    }
}
