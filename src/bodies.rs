//! Registry of the massive bodies in a simulation.
//!
//! Bodies are externally driven: the tick loop reads them but never moves
//! them. Only the ephemeris collaborator rewrites their state.

use bevy::math::DVec2;

use crate::config::{BodyConfig, ConfigError};
use crate::types::{is_finite_vec, PointMass};

/// One massive, non-player celestial object.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub name: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
}

impl Body {
    /// Create a body, rejecting non-finite state, non-positive mass and
    /// negative radius.
    pub fn new(
        name: impl Into<String>,
        position: DVec2,
        velocity: DVec2,
        mass: f64,
        radius: f64,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if !is_finite_vec(position) {
            return Err(ConfigError::NonFinite { name, field: "position" });
        }
        if !is_finite_vec(velocity) {
            return Err(ConfigError::NonFinite { name, field: "velocity" });
        }
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(ConfigError::NonPositiveMass { name, mass });
        }
        if !(radius >= 0.0) || !radius.is_finite() {
            return Err(ConfigError::NegativeRadius { name, radius });
        }
        Ok(Self {
            name,
            position,
            velocity,
            mass,
            radius,
        })
    }
}

impl TryFrom<&BodyConfig> for Body {
    type Error = ConfigError;

    fn try_from(config: &BodyConfig) -> Result<Self, Self::Error> {
        Body::new(
            config.name.clone(),
            config.position,
            config.velocity,
            config.mass,
            config.radius,
        )
    }
}

impl PointMass for Body {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}

/// Ordered collection of bodies with unique names.
///
/// Iteration order is insertion order; collision detection depends on it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration, in configuration order.
    pub fn from_configs(configs: &[BodyConfig]) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for config in configs {
            registry.insert(Body::try_from(config)?)?;
        }
        Ok(registry)
    }

    /// Append a body. Names must be unique.
    ///
    /// `Body::new` already enforces mass and radius, but a `Body` can also be
    /// built by struct literal, so the invariants are checked again here.
    pub fn insert(&mut self, body: Body) -> Result<(), ConfigError> {
        if !(body.mass > 0.0) {
            return Err(ConfigError::NonPositiveMass {
                name: body.name,
                mass: body.mass,
            });
        }
        if !(body.radius >= 0.0) || !body.radius.is_finite() {
            return Err(ConfigError::NegativeRadius {
                name: body.name,
                radius: body.radius,
            });
        }
        if self.get(&body.name).is_some() {
            return Err(ConfigError::DuplicateBody(body.name));
        }
        self.bodies.push(body);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.name == name)
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Body whose gravitational acceleration (GM/r²) is strongest at `pos`.
    ///
    /// A point inside a body's center returns that body immediately.
    pub fn dominant_body(&self, pos: DVec2) -> Option<&Body> {
        let mut best: Option<(&Body, f64)> = None;
        for body in &self.bodies {
            let r_sq = (body.position - pos).length_squared();
            if r_sq == 0.0 {
                return Some(body);
            }
            let strength = body.mass / r_sq;
            if best.is_none_or(|(_, s)| strength > s) {
                best = Some((body, strength));
            }
        }
        best.map(|(body, _)| body)
    }
}
