//! The piloted craft and its control surface.

use std::str::FromStr;

use bevy::math::DVec2;

use crate::config::{ConfigError, CraftConfig};
use crate::types::{normalize_angle, PointMass, FUEL_EPSILON};

/// Controls the input collaborator may hold down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Thrust,
    RotateLeft,
    RotateRight,
}

impl FromStr for Control {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thrust" => Ok(Control::Thrust),
            "rotateLeft" => Ok(Control::RotateLeft),
            "rotateRight" => Ok(Control::RotateRight),
            other => Err(ControlError::Unknown(other.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("craft is destroyed and no longer accepts commands")]
    Destroyed,

    #[error("unknown control '{0}'")]
    Unknown(String),
}

/// Physical and control state of the piloted craft.
#[derive(Clone, Debug, PartialEq)]
pub struct Craft {
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    /// Heading in radians, always in `[0, 2π)`.
    pub orientation: f64,
    pub mass: f64,
    pub radius: f64,
    /// Remaining fuel in `[0, 1]`.
    pub fuel_fraction: f64,
    pub thrust_commanded: bool,
    pub rotating_left: bool,
    pub rotating_right: bool,
    pub destroyed: bool,
    /// Engine force at full throttle.
    pub max_thrust: f64,
    pub rotation_rate: f64,
    pub fuel_consumption_rate: f64,
}

impl Craft {
    pub fn new(config: &CraftConfig) -> Result<Self, ConfigError> {
        if !(config.mass > 0.0) || !config.mass.is_finite() {
            return Err(ConfigError::NonPositiveMass {
                name: "craft".into(),
                mass: config.mass,
            });
        }
        if !(config.radius >= 0.0) || !config.radius.is_finite() {
            return Err(ConfigError::NegativeRadius {
                name: "craft".into(),
                radius: config.radius,
            });
        }
        Ok(Self::from_config_unchecked(config))
    }

    fn from_config_unchecked(config: &CraftConfig) -> Self {
        Self {
            position: config.position,
            velocity: config.velocity,
            acceleration: DVec2::ZERO,
            orientation: normalize_angle(config.orientation),
            mass: config.mass,
            radius: config.radius,
            fuel_fraction: 1.0,
            thrust_commanded: false,
            rotating_left: false,
            rotating_right: false,
            destroyed: false,
            max_thrust: config.thrust,
            rotation_rate: config.rotation_rate,
            fuel_consumption_rate: config.fuel_consumption_rate,
        }
    }

    /// Restore the initial state: full tank, controls released, not destroyed.
    pub fn reset(&mut self, config: &CraftConfig) {
        *self = Self::from_config_unchecked(config);
    }

    pub fn start_control(&mut self, control: Control) -> Result<(), ControlError> {
        self.set_control(control, true)
    }

    pub fn stop_control(&mut self, control: Control) -> Result<(), ControlError> {
        self.set_control(control, false)
    }

    fn set_control(&mut self, control: Control, active: bool) -> Result<(), ControlError> {
        if self.destroyed {
            return Err(ControlError::Destroyed);
        }
        match control {
            Control::Thrust => self.thrust_commanded = active,
            Control::RotateLeft => self.rotating_left = active,
            Control::RotateRight => self.rotating_right = active,
        }
        Ok(())
    }

    pub fn has_fuel(&self) -> bool {
        self.fuel_fraction > 0.0
    }

    /// Engine force magnitude this tick: zero unless commanded, alive and fuelled.
    pub fn effective_thrust(&self) -> f64 {
        if self.thrust_commanded && !self.destroyed && self.has_fuel() {
            self.max_thrust
        } else {
            0.0
        }
    }

    /// Burn fuel for `dt` seconds of thrust, if thrust is being produced.
    pub fn consume_fuel(&mut self, dt: f64) {
        if self.effective_thrust() <= 0.0 {
            return;
        }
        let remaining = self.fuel_fraction - self.fuel_consumption_rate * dt;
        self.fuel_fraction = if remaining <= FUEL_EPSILON {
            0.0
        } else {
            remaining
        };
    }

    /// Apply held rotation commands over `dt` seconds.
    ///
    /// Returns true if the heading changed.
    pub fn rotate(&mut self, dt: f64) -> bool {
        if self.destroyed {
            return false;
        }
        let direction = match (self.rotating_left, self.rotating_right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => return false,
        };
        let delta = direction * self.rotation_rate * dt;
        if delta == 0.0 {
            return false;
        }
        self.orientation = normalize_angle(self.orientation + delta);
        true
    }

    /// Deep copy of the state the trajectory predictor needs.
    pub fn snapshot(&self) -> CraftSnapshot {
        CraftSnapshot {
            position: self.position,
            velocity: self.velocity,
            mass: self.mass,
            radius: self.radius,
            orientation: self.orientation,
            thrusting: self.thrust_commanded && !self.destroyed,
            thrust: self.max_thrust,
            fuel_fraction: self.fuel_fraction,
            fuel_consumption_rate: self.fuel_consumption_rate,
        }
    }
}

impl PointMass for Craft {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}

/// Detached copy of the craft's kinematic state.
///
/// Owned by value, so nothing done to it can reach the live craft.
#[derive(Clone, Debug, PartialEq)]
pub struct CraftSnapshot {
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
    pub orientation: f64,
    pub thrusting: bool,
    pub thrust: f64,
    pub fuel_fraction: f64,
    pub fuel_consumption_rate: f64,
}

impl CraftSnapshot {
    pub fn effective_thrust(&self) -> f64 {
        if self.thrusting && self.fuel_fraction > 0.0 {
            self.thrust
        } else {
            0.0
        }
    }

    pub fn consume_fuel(&mut self, dt: f64) {
        if self.effective_thrust() <= 0.0 {
            return;
        }
        let remaining = self.fuel_fraction - self.fuel_consumption_rate * dt;
        self.fuel_fraction = if remaining <= FUEL_EPSILON { 0.0 } else { remaining };
    }
}

impl PointMass for CraftSnapshot {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}
