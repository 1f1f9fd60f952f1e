//! Trajectory preview shown while the simulation is paused.
//!
//! Prediction runs the same force model and integrator as the live tick,
//! but on an owned [`CraftSnapshot`], so the live craft and the body
//! registry are never touched. Bodies are held where they are for the whole
//! horizon; they are not advanced along their orbits.

use bevy::math::DVec2;

use crate::bodies::Body;
use crate::collision::check_collision;
use crate::config::SimulationConfig;
use crate::craft::CraftSnapshot;
use crate::physics::{integrator, net_force};

/// Parameters for a prediction run.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionSettings {
    /// Maximum number of integration steps.
    pub steps: usize,
    /// Fixed step length (simulated seconds).
    pub step_dt: f64,
    pub g: f64,
    pub boundary_radius: f64,
}

impl PredictionSettings {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            steps: config.prediction_steps,
            step_dt: config.prediction_dt,
            g: config.g,
            boundary_radius: config.boundary_radius,
        }
    }
}

/// Why a preview ended before using all of its steps.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionStop {
    Collision { body: String },
    OutOfBounds,
}

/// A finished preview: positions after each step, and the early stop
/// reason if one occurred.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictedPath {
    pub points: Vec<DVec2>,
    pub stop: Option<PredictionStop>,
}

impl PredictedPath {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn ends_in_collision(&self) -> bool {
        matches!(self.stop, Some(PredictionStop::Collision { .. }))
    }
}

/// Step-by-step preview iterator.
///
/// Yields one position per integration step and fuses after the last step
/// or after the first collision / boundary exit, whichever comes first.
/// The position that triggered the stop is still yielded.
pub struct Prediction<'a> {
    craft: CraftSnapshot,
    bodies: &'a [Body],
    settings: &'a PredictionSettings,
    remaining: usize,
    stop: Option<PredictionStop>,
}

impl<'a> Prediction<'a> {
    pub fn new(craft: CraftSnapshot, bodies: &'a [Body], settings: &'a PredictionSettings) -> Self {
        Self {
            craft,
            bodies,
            settings,
            remaining: settings.steps,
            stop: None,
        }
    }

    /// Early stop reason, once one has been hit.
    pub fn stop(&self) -> Option<&PredictionStop> {
        self.stop.as_ref()
    }
}

impl Iterator for Prediction<'_> {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        if self.remaining == 0 || self.stop.is_some() {
            return None;
        }
        self.remaining -= 1;

        let dt = self.settings.step_dt;
        let craft = &mut self.craft;
        let force = net_force(
            &*craft,
            self.bodies,
            self.settings.g,
            craft.effective_thrust(),
            craft.orientation,
        );
        let next = integrator::step(craft.position, craft.velocity, force, craft.mass, dt);
        craft.consume_fuel(dt);
        craft.position = next.position;
        craft.velocity = next.velocity;

        if let Some(body) = check_collision(craft.position, craft.radius, self.bodies) {
            self.stop = Some(PredictionStop::Collision {
                body: body.name.clone(),
            });
        } else if craft.position.length() > self.settings.boundary_radius {
            self.stop = Some(PredictionStop::OutOfBounds);
        }

        Some(craft.position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.stop.is_some() {
            (0, Some(0))
        } else {
            (0, Some(self.remaining))
        }
    }
}

impl std::iter::FusedIterator for Prediction<'_> {}

/// Run a full preview and collect it.
pub fn predict(craft: CraftSnapshot, bodies: &[Body], settings: &PredictionSettings) -> PredictedPath {
    let mut prediction = Prediction::new(craft, bodies, settings);
    let points: Vec<DVec2> = prediction.by_ref().collect();
    PredictedPath {
        points,
        stop: prediction.stop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use approx::assert_relative_eq;

    fn settings(steps: usize) -> PredictionSettings {
        PredictionSettings {
            steps,
            step_dt: 0.01,
            g: 1.0,
            boundary_radius: 1000.0,
        }
    }

    fn planet() -> Vec<Body> {
        vec![Body::new("Planet", DVec2::ZERO, DVec2::ZERO, 1.0e6, 50.0).unwrap()]
    }

    #[test]
    fn test_full_horizon_without_events() {
        let (pos, vel) = fixtures::circular_orbit(1.0e6, 150.0);
        let path = predict(fixtures::probe(pos, vel, 1.0), &planet(), &settings(300));
        assert_eq!(path.points.len(), 300);
        assert!(path.stop.is_none());
        for p in &path.points {
            assert_relative_eq!(p.length(), 150.0, max_relative = 0.02);
        }
    }

    #[test]
    fn test_stops_on_collision_and_keeps_impact_point() {
        let probe = fixtures::probe(DVec2::new(100.0, 0.0), DVec2::new(-200.0, 0.0), 1.0);
        let path = predict(probe, &planet(), &settings(1000));

        assert!(path.ends_in_collision());
        assert_eq!(
            path.stop,
            Some(PredictionStop::Collision { body: "Planet".into() })
        );
        let last = *path.points.last().unwrap();
        assert!(last.length() < 50.0);
        assert!(path.points.len() < 1000);
    }

    #[test]
    fn test_stops_on_boundary_exit() {
        let probe = fixtures::probe(DVec2::new(990.0, 0.0), DVec2::new(500.0, 0.0), 1.0);
        let path = predict(probe, &planet(), &settings(1000));

        assert_eq!(path.stop, Some(PredictionStop::OutOfBounds));
        assert!(path.points.last().unwrap().length() > 1000.0);
    }

    #[test]
    fn test_thrust_changes_path() {
        let (pos, vel) = fixtures::circular_orbit(1.0e6, 150.0);
        let coast = fixtures::probe(pos, vel, 1.0);
        let mut burn = coast.clone();
        burn.thrusting = true;
        burn.thrust = 20.0;
        burn.orientation = std::f64::consts::FRAC_PI_2;

        let a = predict(coast, &planet(), &settings(100));
        let b = predict(burn, &planet(), &settings(100));
        assert!((a.points[99] - b.points[99]).length() > 1.0);
    }

    #[test]
    fn test_iterator_fuses_after_stop() {
        let probe = fixtures::probe(DVec2::new(60.0, 0.0), DVec2::new(-5000.0, 0.0), 1.0);
        let bodies = planet();
        let s = settings(10);
        let mut it = Prediction::new(probe, &bodies, &s);
        assert!(it.next().is_some());
        assert!(it.stop().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let path = predict(fixtures::probe(DVec2::new(100.0, 0.0), DVec2::ZERO, 1.0), &planet(), &settings(0));
        assert!(path.is_empty());
        assert!(path.stop.is_none());
    }
}
