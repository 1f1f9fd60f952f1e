//! Offline ephemeris source: bodies on fixed Keplerian orbits.
//!
//! Stands in for a remote ephemeris service. Every body configured with an
//! [`OrbitConfig`] is placed analytically on its orbit around its parent;
//! bodies without one are not reported and keep whatever state they have.

use std::collections::HashMap;

use bevy::math::DVec2;

use super::{EphemerisEntry, EphemerisError, EphemerisSource, EphemerisUpdate};
use crate::config::{BodyConfig, OrbitConfig, SimulationConfig};

const MAX_ITERATIONS: usize = 50;
const TOLERANCE: f64 = 1e-12;

/// Keplerian elements resolved against the parent's gravitational parameter.
#[derive(Clone, Debug)]
pub struct KeplerOrbit {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub argument_of_periapsis: f64,
    pub mean_anomaly_at_epoch: f64,
    /// Radians per simulated second.
    pub mean_motion: f64,
}

impl KeplerOrbit {
    pub fn from_config(orbit: &OrbitConfig, mu: f64) -> Self {
        let a = orbit.semi_major_axis;
        Self {
            semi_major_axis: a,
            eccentricity: orbit.eccentricity,
            argument_of_periapsis: orbit.argument_of_periapsis,
            mean_anomaly_at_epoch: orbit.mean_anomaly_at_epoch,
            mean_motion: (mu / (a * a * a)).sqrt(),
        }
    }

    /// Solve Kepler's equation M = E - e·sin(E) for E by Newton's method.
    ///
    /// Returns `None` if the iteration does not settle.
    pub fn solve_eccentric_anomaly(&self, mean_anomaly: f64) -> Option<f64> {
        let e = self.eccentricity;
        let m = mean_anomaly.rem_euclid(std::f64::consts::TAU);
        let mut anomaly = if e < 0.8 { m } else { std::f64::consts::PI };

        for _ in 0..MAX_ITERATIONS {
            let f = anomaly - e * anomaly.sin() - m;
            let f_prime = 1.0 - e * anomaly.cos();
            let delta = f / f_prime;
            anomaly -= delta;
            if delta.abs() < TOLERANCE {
                return Some(anomaly);
            }
        }
        None
    }

    /// Position and velocity relative to the parent at time `t`.
    pub fn state_at(&self, t: f64) -> Option<(DVec2, DVec2)> {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let mean_anomaly = self.mean_anomaly_at_epoch + self.mean_motion * t;
        let ecc_anomaly = self.solve_eccentric_anomaly(mean_anomaly)?;

        let (sin_e, cos_e) = ecc_anomaly.sin_cos();
        let b = a * (1.0 - e * e).sqrt();
        let e_dot = self.mean_motion / (1.0 - e * cos_e);

        let pos = DVec2::new(a * (cos_e - e), b * sin_e);
        let vel = DVec2::new(-a * sin_e * e_dot, b * cos_e * e_dot);

        let rotation = DVec2::from_angle(self.argument_of_periapsis);
        Some((rotation.rotate(pos), rotation.rotate(vel)))
    }
}

#[derive(Clone, Debug)]
struct OrbitingBody {
    name: String,
    parent: String,
    orbit: KeplerOrbit,
}

/// [`EphemerisSource`] that moves configured bodies along analytic orbits.
#[derive(Clone, Debug)]
pub struct KeplerEphemeris {
    /// Bodies without an orbit, used as anchors for their children.
    anchors: HashMap<String, (DVec2, DVec2)>,
    /// Orbiting bodies, parents before children.
    orbiting: Vec<OrbitingBody>,
}

impl KeplerEphemeris {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let masses: HashMap<&str, f64> = config
            .bodies
            .iter()
            .map(|b| (b.name.as_str(), b.mass))
            .collect();

        let anchors = config
            .bodies
            .iter()
            .filter(|b| b.orbit.is_none())
            .map(|b| (b.name.clone(), (b.position, b.velocity)))
            .collect();

        let orbiting: Vec<OrbitingBody> = config
            .bodies
            .iter()
            .filter_map(|b: &BodyConfig| {
                let orbit = b.orbit.as_ref()?;
                let parent_mass = masses.get(orbit.parent.as_str()).copied()?;
                Some(OrbitingBody {
                    name: b.name.clone(),
                    parent: orbit.parent.clone(),
                    orbit: KeplerOrbit::from_config(orbit, config.g * parent_mass),
                })
            })
            .collect();

        Self {
            anchors,
            orbiting: sort_parents_first(orbiting),
        }
    }
}

/// Order so every body comes after its parent. Bodies caught in a parent
/// cycle keep configuration order and fall back to the origin as parent.
fn sort_parents_first(bodies: Vec<OrbitingBody>) -> Vec<OrbitingBody> {
    let mut ordered = Vec::with_capacity(bodies.len());
    let mut pending = bodies;
    while !pending.is_empty() {
        let waiting: Vec<String> = pending.iter().map(|b| b.name.clone()).collect();
        let (ready, rest): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|b| !waiting.contains(&b.parent));
        if ready.is_empty() {
            ordered.extend(rest);
            break;
        }
        ordered.extend(ready);
        pending = rest;
    }
    ordered
}

impl EphemerisSource for KeplerEphemeris {
    fn fetch(&self, epoch: f64) -> Result<EphemerisUpdate, EphemerisError> {
        if !epoch.is_finite() {
            return Err(EphemerisError::InvalidEpoch(epoch));
        }

        let mut update = EphemerisUpdate::new(epoch);
        let mut resolved: HashMap<&str, (DVec2, DVec2)> = HashMap::new();

        for body in &self.orbiting {
            let (parent_pos, parent_vel) = resolved
                .get(body.parent.as_str())
                .or_else(|| self.anchors.get(&body.parent))
                .copied()
                .unwrap_or((DVec2::ZERO, DVec2::ZERO));

            let (rel_pos, rel_vel) =
                body.orbit
                    .state_at(epoch)
                    .ok_or_else(|| EphemerisError::NoConvergence {
                        body: body.name.clone(),
                        mean_anomaly: body.orbit.mean_anomaly_at_epoch
                            + body.orbit.mean_motion * epoch,
                    })?;

            let pos = parent_pos + rel_pos;
            let vel = parent_vel + rel_vel;
            resolved.insert(body.name.as_str(), (pos, vel));
            update.insert(body.name.clone(), EphemerisEntry::new(pos, vel));
        }

        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_orbit_matches_initial_config() {
        let config = SimulationConfig::default();
        let source = KeplerEphemeris::from_config(&config);
        let update = source.fetch(0.0).unwrap();

        let luna_cfg = config.bodies.iter().find(|b| b.name == "Luna").unwrap();
        let luna = &update.entries["Luna"];
        assert_relative_eq!(luna.position.x, luna_cfg.position.x, epsilon = 1e-9);
        assert_relative_eq!(luna.position.y, luna_cfg.position.y, epsilon = 1e-9);
        assert_relative_eq!(luna.velocity.x, luna_cfg.velocity.x, epsilon = 1e-9);
        assert_relative_eq!(luna.velocity.y, luna_cfg.velocity.y, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_bodies_not_reported() {
        let source = KeplerEphemeris::from_config(&SimulationConfig::default());
        let update = source.fetch(12.0).unwrap();
        assert!(!update.entries.contains_key("Terra"));
        assert_eq!(update.epoch, 12.0);
    }

    #[test]
    fn test_circular_orbit_keeps_radius() {
        let orbit = KeplerOrbit::from_config(
            &OrbitConfig {
                parent: "P".into(),
                semi_major_axis: 100.0,
                eccentricity: 0.0,
                argument_of_periapsis: 0.0,
                mean_anomaly_at_epoch: 0.0,
            },
            1.0e4,
        );
        for t in [0.0, 1.0, 7.5, 31.4] {
            let (pos, vel) = orbit.state_at(t).unwrap();
            assert_relative_eq!(pos.length(), 100.0, epsilon = 1e-9);
            assert_relative_eq!(vel.length(), 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_elliptical_orbit_periapsis_and_apoapsis() {
        let orbit = KeplerOrbit::from_config(
            &OrbitConfig {
                parent: "P".into(),
                semi_major_axis: 100.0,
                eccentricity: 0.5,
                argument_of_periapsis: 0.0,
                mean_anomaly_at_epoch: 0.0,
            },
            1.0e4,
        );
        let (peri, _) = orbit.state_at(0.0).unwrap();
        assert_relative_eq!(peri.length(), 50.0, epsilon = 1e-9);

        let half_period = std::f64::consts::PI / orbit.mean_motion;
        let (apo, _) = orbit.state_at(half_period).unwrap();
        assert_relative_eq!(apo.length(), 150.0, epsilon = 1e-6);
    }

    #[test]
    fn test_children_follow_moving_parent() {
        let g = 1.0;
        let star = BodyConfig::fixed("Star", DVec2::ZERO, 1.0e6, 10.0);
        let planet = BodyConfig::circular("Planet", &star, g, 500.0, 0.0, 1.0e3, 5.0);
        let moon = BodyConfig::circular("Moon", &planet, g, 20.0, 0.0, 1.0, 1.0);
        let config = SimulationConfig {
            // Moon listed before its parent on purpose
            bodies: vec![star, moon, planet],
            ..Default::default()
        };

        let update = KeplerEphemeris::from_config(&config).fetch(3.0).unwrap();
        let planet_pos = update.entries["Planet"].position;
        let moon_pos = update.entries["Moon"].position;
        assert_relative_eq!((moon_pos - planet_pos).length(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_non_finite_epoch() {
        let source = KeplerEphemeris::from_config(&SimulationConfig::default());
        assert!(matches!(source.fetch(f64::NAN), Err(EphemerisError::InvalidEpoch(_))));
    }
}
