//! Construction-time configuration for a simulation instance.
//!
//! Everything the core needs is supplied once, up front, through
//! [`SimulationConfig`]. The coordinator keeps its own copy and never
//! mutates it afterwards; only the time scale may be changed at runtime.

use bevy::math::DVec2;

use crate::types::{is_finite_vec, DEFAULT_BOUNDARY_GRACE, DEFAULT_MAX_DT};

/// Errors raised while validating configuration or creating bodies.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("body '{name}' has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("'{name}' has a negative or non-finite radius {radius}")]
    NegativeRadius { name: String, radius: f64 },

    #[error("'{name}' has a non-finite {field}")]
    NonFinite { name: String, field: &'static str },

    #[error("duplicate body name '{0}'")]
    DuplicateBody(String),

    #[error("body '{body}' orbits unknown parent '{parent}'")]
    UnknownParent { body: String, parent: String },

    #[error("invalid {field}: {value}")]
    InvalidParameter { field: &'static str, value: f64 },
}

/// Keplerian orbit a body follows around a parent, used by the offline
/// ephemeris source to move bodies between updates.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitConfig {
    /// Name of the body being orbited.
    pub parent: String,
    /// Semi-major axis.
    pub semi_major_axis: f64,
    /// Eccentricity, `0 <= e < 1`.
    pub eccentricity: f64,
    /// Argument of periapsis (radians).
    pub argument_of_periapsis: f64,
    /// Mean anomaly at simulated time zero (radians).
    pub mean_anomaly_at_epoch: f64,
}

/// Initial state of one massive body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
    /// Optional orbit for the ephemeris collaborator; `None` = fixed body.
    pub orbit: Option<OrbitConfig>,
}

impl BodyConfig {
    /// A body that never moves.
    pub fn fixed(name: impl Into<String>, position: DVec2, mass: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            position,
            velocity: DVec2::ZERO,
            mass,
            radius,
            orbit: None,
        }
    }

    /// A body on a circular orbit around `parent`, starting at `phase` radians.
    ///
    /// Initial position and velocity are derived from the orbit so the
    /// registry and the ephemeris source agree at time zero.
    pub fn circular(
        name: impl Into<String>,
        parent: &BodyConfig,
        g: f64,
        distance: f64,
        phase: f64,
        mass: f64,
        radius: f64,
    ) -> Self {
        let speed = (g * parent.mass / distance).sqrt();
        let dir = DVec2::new(phase.cos(), phase.sin());
        Self {
            name: name.into(),
            position: parent.position + dir * distance,
            velocity: parent.velocity + dir.perp() * speed,
            mass,
            radius,
            orbit: Some(OrbitConfig {
                parent: parent.name.clone(),
                semi_major_axis: distance,
                eccentricity: 0.0,
                argument_of_periapsis: 0.0,
                mean_anomaly_at_epoch: phase,
            }),
        }
    }
}

/// Initial state and handling characteristics of the piloted craft.
#[derive(Clone, Debug, PartialEq)]
pub struct CraftConfig {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Initial heading (radians).
    pub orientation: f64,
    pub mass: f64,
    pub radius: f64,
    /// Engine force when thrusting.
    pub thrust: f64,
    /// Turn rate while a rotate control is held (radians per second).
    pub rotation_rate: f64,
    /// Fraction of a full tank burned per second of thrust.
    pub fuel_consumption_rate: f64,
}

impl CraftConfig {
    /// Craft on a circular orbit of radius `distance` around `parent`,
    /// placed on the +x side and moving counter-clockwise.
    pub fn circular_orbit(parent: &BodyConfig, g: f64, distance: f64) -> Self {
        let speed = (g * parent.mass / distance).sqrt();
        Self {
            position: parent.position + DVec2::new(distance, 0.0),
            velocity: parent.velocity + DVec2::new(0.0, speed),
            orientation: std::f64::consts::FRAC_PI_2,
            ..Self::default()
        }
    }
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            orientation: 0.0,
            mass: 1.0,
            radius: 3.0,
            thrust: 10.0,
            rotation_rate: 3.0,
            fuel_consumption_rate: 0.05,
        }
    }
}

/// Full configuration surface consumed by the coordinator at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Gravitational constant in scenario units.
    pub g: f64,
    /// Distance from the origin beyond which the craft is out of bounds.
    pub boundary_radius: f64,
    /// Simulated seconds tolerated outside the boundary.
    pub boundary_grace: f64,
    /// Number of integration steps in a trajectory preview.
    pub prediction_steps: usize,
    /// Fixed step used by the trajectory preview.
    pub prediction_dt: f64,
    /// Upper bound for one physics step after time scaling.
    pub max_dt: f64,
    /// Initial multiplier from real to simulated time.
    pub time_scale: f64,
    /// Simulated seconds between ephemeris refresh requests.
    pub ephemeris_interval: f64,
    pub craft: CraftConfig,
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let g = 1.0;
        let terra = BodyConfig::fixed("Terra", DVec2::ZERO, 1.0e6, 50.0);
        let luna = BodyConfig::circular("Luna", &terra, g, 800.0, 0.0, 2.0e4, 12.0);
        let craft = CraftConfig::circular_orbit(&terra, g, 150.0);

        Self {
            g,
            boundary_radius: 2500.0,
            boundary_grace: DEFAULT_BOUNDARY_GRACE,
            prediction_steps: 600,
            prediction_dt: 0.05,
            max_dt: DEFAULT_MAX_DT,
            time_scale: 1.0,
            ephemeris_interval: 5.0,
            craft,
            bodies: vec![terra, luna],
        }
    }
}

impl SimulationConfig {
    /// Check every scalar parameter and every initial state.
    ///
    /// Body-level checks (mass, radius, duplicates) are repeated by the
    /// registry on insertion; this catches problems before anything is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("g", self.g)?;
        positive("boundary_radius", self.boundary_radius)?;
        non_negative("boundary_grace", self.boundary_grace)?;
        positive("prediction_dt", self.prediction_dt)?;
        positive("max_dt", self.max_dt)?;
        positive("time_scale", self.time_scale)?;
        positive("ephemeris_interval", self.ephemeris_interval)?;

        let craft = &self.craft;
        if !is_finite_vec(craft.position) {
            return Err(non_finite("craft", "position"));
        }
        if !is_finite_vec(craft.velocity) {
            return Err(non_finite("craft", "velocity"));
        }
        if !craft.orientation.is_finite() {
            return Err(non_finite("craft", "orientation"));
        }
        if !(craft.mass > 0.0) || !craft.mass.is_finite() {
            return Err(ConfigError::NonPositiveMass {
                name: "craft".into(),
                mass: craft.mass,
            });
        }
        if !(craft.radius >= 0.0) || !craft.radius.is_finite() {
            return Err(ConfigError::NegativeRadius {
                name: "craft".into(),
                radius: craft.radius,
            });
        }
        non_negative("craft.thrust", craft.thrust)?;
        non_negative("craft.rotation_rate", craft.rotation_rate)?;
        non_negative("craft.fuel_consumption_rate", craft.fuel_consumption_rate)?;

        for body in &self.bodies {
            if let Some(orbit) = &body.orbit {
                if !self.bodies.iter().any(|b| b.name == orbit.parent) {
                    return Err(ConfigError::UnknownParent {
                        body: body.name.clone(),
                        parent: orbit.parent.clone(),
                    });
                }
                positive("orbit.semi_major_axis", orbit.semi_major_axis)?;
                if !(0.0..1.0).contains(&orbit.eccentricity) {
                    return Err(ConfigError::InvalidParameter {
                        field: "orbit.eccentricity",
                        value: orbit.eccentricity,
                    });
                }
            }
        }

        Ok(())
    }
}

fn non_finite(name: &str, field: &'static str) -> ConfigError {
    ConfigError::NonFinite {
        name: name.to_string(),
        field,
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { field, value })
    }
}
