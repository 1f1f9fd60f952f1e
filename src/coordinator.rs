//! Simulation coordinator: the fixed-order tick loop and its lifecycle.
//!
//! [`Simulation`] owns every piece of mutable simulation state. Each
//! unpaused tick runs, in order:
//!
//! 1. time-scaled, clamped `dt`
//! 2. force model → integrator → commit to the live craft
//! 3. collision check (terminal on hit)
//! 4. boundary monitor (terminal on violation)
//! 5. clock advance
//!
//! While paused, ticks are skipped but the host still calls
//! [`Simulation::frame`] every frame so rotation input and thrust arming
//! refresh the trajectory preview.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::bodies::{Body, BodyRegistry};
use crate::boundary::{BoundaryMonitor, BoundarySignal};
use crate::collision::check_collision;
use crate::config::{ConfigError, SimulationConfig};
use crate::craft::{Control, ControlError, Craft};
use crate::ephemeris::{
    apply_update, EphemerisApplied, EphemerisError, EphemerisRequests, EphemerisTicket,
    EphemerisUpdate,
};
use crate::outcome::{MissionOutcome, TickOutcome};
use crate::physics::{clamp_dt, integrator, net_force};
use crate::prediction::{predict, PredictedPath, PredictionSettings};
use crate::time::{ClockState, SimulationClock};
use crate::types::is_finite_vec;

/// Failures inside a tick. Never escape [`Simulation::tick`]; they are
/// converted into a halted outcome there.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("non-finite {quantity} after integration")]
    NonFiniteState { quantity: &'static str },

    #[error("non-finite force on craft")]
    NonFiniteForce,
}

/// Read-only view handed to the renderer once per frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderSnapshot<'a> {
    pub craft: &'a Craft,
    pub bodies: &'a [Body],
    pub paused: bool,
    pub predicted_path: &'a PredictedPath,
    pub boundary_radius: f64,
    /// Grace time left while outside the boundary.
    pub boundary_time_remaining: Option<f64>,
    pub outcome: Option<&'a MissionOutcome>,
}

/// One running simulation instance.
#[derive(Resource, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    initial_bodies: BodyRegistry,
    bodies: BodyRegistry,
    craft: Craft,
    clock: SimulationClock,
    boundary: BoundaryMonitor,
    prediction: PredictionSettings,
    predicted_path: PredictedPath,
    prediction_dirty: bool,
    outcome: Option<MissionOutcome>,
    ephemeris: EphemerisRequests,
}

impl Simulation {
    /// Validate the configuration and build all state from it.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bodies = BodyRegistry::from_configs(&config.bodies)?;
        let craft = Craft::new(&config.craft)?;

        Ok(Self {
            initial_bodies: bodies.clone(),
            bodies,
            craft,
            clock: SimulationClock::new(config.time_scale),
            boundary: BoundaryMonitor::new(config.boundary_radius, config.boundary_grace),
            prediction: PredictionSettings::from_config(&config),
            predicted_path: PredictedPath::default(),
            prediction_dirty: false,
            outcome: None,
            ephemeris: EphemerisRequests::default(),
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    pub fn craft(&self) -> &Craft {
        &self.craft
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn boundary(&self) -> &BoundaryMonitor {
        &self.boundary
    }

    pub fn outcome(&self) -> Option<&MissionOutcome> {
        self.outcome.as_ref()
    }

    pub fn predicted_path(&self) -> &PredictedPath {
        &self.predicted_path
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            craft: &self.craft,
            bodies: self.bodies.as_slice(),
            paused: self.clock.is_paused(),
            predicted_path: &self.predicted_path,
            boundary_radius: self.boundary.radius,
            boundary_time_remaining: self.boundary.time_remaining(),
            outcome: self.outcome.as_ref(),
        }
    }

    /// Start the run, or toggle pause once running.
    ///
    /// Pausing computes a fresh trajectory preview; resuming discards it.
    pub fn start(&mut self) -> ClockState {
        let before = self.clock.state();
        let state = self.clock.start();
        match (before, state) {
            (ClockState::Stopped, ClockState::Running) => info!("Simulation started"),
            (_, ClockState::Paused) => {
                info!("Simulation paused at t = {:.2}s", self.clock.elapsed());
                self.prediction_dirty = true;
                self.refresh_prediction();
            }
            (ClockState::Paused, ClockState::Running) => {
                info!("Simulation resumed");
                self.predicted_path = PredictedPath::default();
            }
            _ => debug!("Start ignored in state {:?}", state),
        }
        state
    }

    /// Pause or resume a run in progress. Does not start a stopped run.
    pub fn toggle_pause(&mut self) -> ClockState {
        if !self.clock.is_running() {
            return self.clock.state();
        }
        self.start()
    }

    /// Return to the initial state: craft, bodies, boundary and clock.
    ///
    /// Any ephemeris request in flight is invalidated.
    pub fn reset(&mut self) {
        info!("Resetting simulation...");
        self.clock.reset();
        self.craft.reset(&self.config.craft);
        self.boundary.reset();
        self.bodies = self.initial_bodies.clone();
        self.predicted_path = PredictedPath::default();
        self.prediction_dirty = false;
        self.outcome = None;
        self.ephemeris.invalidate();
        info!("Simulation reset complete");
    }

    pub fn set_time_scale(&mut self, scale: f64) -> Result<(), ConfigError> {
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(ConfigError::InvalidParameter {
                field: "time_scale",
                value: scale,
            });
        }
        self.clock.time_scale = scale;
        info!("Time scale: {}x", scale);
        Ok(())
    }

    pub fn start_control(&mut self, control: Control) -> Result<(), ControlError> {
        self.craft.start_control(control)?;
        self.invalidate_prediction();
        Ok(())
    }

    pub fn stop_control(&mut self, control: Control) -> Result<(), ControlError> {
        self.craft.stop_control(control)?;
        self.invalidate_prediction();
        Ok(())
    }

    /// Ask for the preview to be recomputed on the next paused frame.
    pub fn invalidate_prediction(&mut self) {
        if self.clock.is_paused() {
            self.prediction_dirty = true;
        }
    }

    /// Per-frame host callback.
    ///
    /// Ticks when running and unpaused. When paused, applies held rotation
    /// over real time and recomputes the preview if anything changed.
    pub fn frame(&mut self, real_dt: f64) -> TickOutcome {
        if self.clock.is_paused() {
            if real_dt.is_finite() && real_dt > 0.0 && self.craft.rotate(real_dt) {
                self.prediction_dirty = true;
            }
            self.refresh_prediction();
            return TickOutcome::Skipped;
        }
        self.tick(real_dt)
    }

    /// Recompute the preview if paused and marked dirty. Returns true if it ran.
    pub fn refresh_prediction(&mut self) -> bool {
        if !self.clock.is_paused() || !self.prediction_dirty {
            return false;
        }
        self.predicted_path = predict(
            self.craft.snapshot(),
            self.bodies.as_slice(),
            &self.prediction,
        );
        self.prediction_dirty = false;
        true
    }

    /// One scheduled physics tick.
    ///
    /// No-ops unless running and unpaused. Internal failures stop the clock
    /// and come back as a halted outcome instead of propagating.
    pub fn tick(&mut self, real_dt: f64) -> TickOutcome {
        if !self.clock.is_ticking() || self.craft.destroyed {
            return TickOutcome::Skipped;
        }

        match self.try_tick(real_dt) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Simulation halted: {err}");
                self.terminate(MissionOutcome::halted(err.to_string()))
            }
        }
    }

    fn try_tick(&mut self, real_dt: f64) -> Result<TickOutcome, SimulationError> {
        let dt = clamp_dt(real_dt, self.clock.time_scale, self.config.max_dt);
        if dt == 0.0 {
            return Ok(TickOutcome::Skipped);
        }

        let craft = &mut self.craft;
        craft.rotate(dt);
        let force = net_force(
            &*craft,
            self.bodies.as_slice(),
            self.config.g,
            craft.effective_thrust(),
            craft.orientation,
        );
        if !is_finite_vec(force) {
            return Err(SimulationError::NonFiniteForce);
        }

        let next = integrator::step(craft.position, craft.velocity, force, craft.mass, dt);
        check_finite(next.position, "position")?;
        check_finite(next.velocity, "velocity")?;
        craft.position = next.position;
        craft.velocity = next.velocity;
        craft.acceleration = next.acceleration;
        craft.consume_fuel(dt);

        if let Some(body) = check_collision(craft.position, craft.radius, self.bodies.as_slice()) {
            let name = body.name.clone();
            craft.destroyed = true;
            info!(
                "IMPACT! Craft hit {} at {:.2} m/s",
                name,
                craft.velocity.length()
            );
            return Ok(self.terminate(MissionOutcome::collision(name)));
        }

        let signal = self.boundary.update(self.craft.position.length(), dt);
        match signal {
            BoundarySignal::Entered => warn!(
                "Craft left the boundary; {:.0}s to return",
                self.boundary.grace
            ),
            BoundarySignal::Cleared => info!("Craft back inside the boundary"),
            BoundarySignal::Violation => {
                let outcome = MissionOutcome::out_of_bounds(self.boundary.time_out_of_bounds());
                warn!("{outcome}");
                return Ok(self.terminate(outcome));
            }
            BoundarySignal::None => {}
        }

        self.clock.advance(dt);
        Ok(TickOutcome::Advanced {
            dt,
            boundary: signal,
        })
    }

    fn terminate(&mut self, outcome: MissionOutcome) -> TickOutcome {
        self.clock.stop();
        self.outcome = Some(outcome.clone());
        TickOutcome::Terminated(outcome)
    }

    /// Register a new ephemeris request, superseding any outstanding one.
    pub fn begin_ephemeris_request(&mut self) -> EphemerisTicket {
        self.ephemeris.begin()
    }

    /// Hand a finished request back. Stale tickets are discarded; failures
    /// leave the bodies untouched and the simulation running.
    pub fn complete_ephemeris(
        &mut self,
        ticket: EphemerisTicket,
        result: Result<EphemerisUpdate, EphemerisError>,
    ) -> EphemerisApplied {
        if !self.ephemeris.accept(ticket) {
            debug!("Discarding stale ephemeris result {:?}", ticket);
            return EphemerisApplied::Stale;
        }

        match result {
            Ok(update) => {
                let report = apply_update(&mut self.bodies, &update);
                if !report.rejected.is_empty() {
                    warn!(
                        "Ephemeris kept previous state for invalid entries: {:?}",
                        report.rejected
                    );
                }
                self.invalidate_prediction();
                EphemerisApplied::Applied(report)
            }
            Err(err) => {
                warn!("Ephemeris update failed, keeping previous body states: {err}");
                EphemerisApplied::Failed(err)
            }
        }
    }
}

fn check_finite(v: DVec2, quantity: &'static str) -> Result<(), SimulationError> {
    if is_finite_vec(v) {
        Ok(())
    } else {
        Err(SimulationError::NonFiniteState { quantity })
    }
}

/// Ordering for systems that touch the simulation each frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Input collaborators forward commands.
    Input,
    /// The coordinator's per-frame callback.
    Step,
}

/// Plugin driving [`Simulation::frame`] from Bevy's frame loop.
///
/// The [`Simulation`] resource must be inserted before this plugin runs.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, SimulationSet::Step.after(SimulationSet::Input))
            .add_systems(Update, advance_simulation.in_set(SimulationSet::Step));
    }
}

fn advance_simulation(mut sim: ResMut<Simulation>, time: Res<Time>) {
    sim.frame(time.delta_secs_f64());
}
