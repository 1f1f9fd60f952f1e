//! Flight telemetry derived from the craft state.
//!
//! Orbital quantities are computed against the dominant body at the craft's
//! position (largest M/r²), treating that body as fixed.

use bevy::math::DVec2;

use crate::bodies::BodyRegistry;
use crate::craft::Craft;

/// Distances below this are treated as "at the body's center".
const MIN_RADIUS: f64 = 1e-9;

/// Orbital elements computed from state vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis. Negative for hyperbolic orbits.
    pub semi_major_axis: f64,
    /// Eccentricity (0 = circular, <1 = elliptical, >1 = hyperbolic).
    pub eccentricity: f64,
    /// Specific orbital energy. E > 0 = unbound.
    pub energy: f64,
    /// Specific angular momentum magnitude.
    pub angular_momentum: f64,
    /// Orbital period. Only for bound orbits.
    pub period: Option<f64>,
}

impl OrbitalElements {
    pub fn is_bound(&self) -> bool {
        self.energy < 0.0
    }

    /// Closest approach distance from the body's center.
    pub fn periapsis(&self) -> f64 {
        // a < 0 and e > 1 for hyperbolae, so the product stays positive
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance. `None` when the orbit is not closed.
    pub fn apoapsis(&self) -> Option<f64> {
        self.is_bound()
            .then(|| self.semi_major_axis * (1.0 + self.eccentricity))
    }
}

/// Specific orbital energy `v²/2 - GM/r`.
///
/// `None` at the attractor's center.
pub fn orbital_energy(pos: DVec2, vel: DVec2, gm: f64) -> Option<f64> {
    let r = pos.length();
    if r < MIN_RADIUS {
        return None;
    }
    Some(0.5 * vel.length_squared() - gm / r)
}

/// Specific angular momentum magnitude `|r × v|`.
pub fn angular_momentum(pos: DVec2, vel: DVec2) -> f64 {
    pos.perp_dot(vel).abs()
}

/// Orbital elements from relative position and velocity via vis-viva.
pub fn compute_orbital_elements(pos: DVec2, vel: DVec2, gm: f64) -> Option<OrbitalElements> {
    let energy = orbital_energy(pos, vel, gm)?;
    let h = angular_momentum(pos, vel);

    let semi_major_axis = if energy.abs() > 1e-12 {
        -gm / (2.0 * energy)
    } else {
        f64::INFINITY
    };

    let e_squared = 1.0 + (2.0 * energy * h * h) / (gm * gm);
    let eccentricity = e_squared.max(0.0).sqrt();

    let period = (energy < 0.0 && semi_major_axis > 0.0)
        .then(|| std::f64::consts::TAU * (semi_major_axis.powi(3) / gm).sqrt());

    Some(OrbitalElements {
        semi_major_axis,
        eccentricity,
        energy,
        angular_momentum: h,
        period,
    })
}

/// Read-only flight data for the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub speed: f64,
    /// Distance from the world origin.
    pub distance_from_origin: f64,
    pub fuel_fraction: f64,
    /// Name of the body whose gravity dominates at the craft.
    pub dominant_body: Option<String>,
    /// Height above the dominant body's surface.
    pub altitude: Option<f64>,
    /// Elements relative to the dominant body.
    pub orbit: Option<OrbitalElements>,
}

impl Telemetry {
    pub fn from_state(craft: &Craft, bodies: &BodyRegistry, g: f64) -> Self {
        let dominant = bodies.dominant_body(craft.position);
        let altitude = dominant.map(|b| craft.position.distance(b.position) - b.radius);
        let orbit = dominant.and_then(|b| {
            compute_orbital_elements(
                craft.position - b.position,
                craft.velocity - b.velocity,
                g * b.mass,
            )
        });

        Self {
            speed: craft.velocity.length(),
            distance_from_origin: craft.position.length(),
            fuel_fraction: craft.fuel_fraction,
            dominant_body: dominant.map(|b| b.name.clone()),
            altitude,
            orbit,
        }
    }
}
