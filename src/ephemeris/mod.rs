//! Ephemeris collaborator: externally supplied body states.
//!
//! An [`EphemerisSource`] produces a name → state map for some epoch. The
//! coordinator applies it to the body registry, one body at a time, keeping
//! the previous state for any entry that is missing or not finite.
//!
//! Requests are tracked with generation tickets. Only the most recent
//! request may apply its result, and a reset invalidates whatever is in
//! flight.

pub mod kepler;

use std::collections::HashMap;
use std::sync::Arc;

use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};

use crate::bodies::BodyRegistry;
use crate::coordinator::{Simulation, SimulationSet};
use crate::types::is_finite_vec;

pub use kepler::KeplerEphemeris;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("ephemeris source unavailable: {0}")]
    Unavailable(String),

    #[error("Kepler solver did not converge for '{body}' (mean anomaly {mean_anomaly})")]
    NoConvergence { body: String, mean_anomaly: f64 },

    #[error("ephemeris requested for non-finite epoch {0}")]
    InvalidEpoch(f64),
}

/// State of one body as reported by the source. Mass and radius are
/// optional; position and velocity are required.
#[derive(Clone, Debug, PartialEq)]
pub struct EphemerisEntry {
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: Option<f64>,
    pub radius: Option<f64>,
}

impl EphemerisEntry {
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self {
            position,
            velocity,
            mass: None,
            radius: None,
        }
    }

    fn is_usable(&self) -> bool {
        is_finite_vec(self.position) && is_finite_vec(self.velocity)
    }
}

/// Body states for one epoch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EphemerisUpdate {
    /// Simulated seconds the states refer to.
    pub epoch: f64,
    pub entries: HashMap<String, EphemerisEntry>,
}

impl EphemerisUpdate {
    pub fn new(epoch: f64) -> Self {
        Self {
            epoch,
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: EphemerisEntry) {
        self.entries.insert(name.into(), entry);
    }
}

/// Anything that can produce body states. Implementations run on a
/// background task pool, so they must be shareable across threads.
pub trait EphemerisSource: Send + Sync + 'static {
    fn fetch(&self, epoch: f64) -> Result<EphemerisUpdate, EphemerisError>;
}

/// What happened to each entry of an applied update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApplyReport {
    /// Bodies whose state was replaced.
    pub applied: Vec<String>,
    /// Entries for registered bodies that were rejected (non-finite).
    pub rejected: Vec<String>,
    /// Entries naming bodies that are not registered.
    pub unknown: Vec<String>,
}

/// Apply an update to the registry.
///
/// Position and velocity must both be finite or the body is left as it was.
/// Mass is applied only if positive and radius only if non-negative, so a
/// partial entry can move a body without corrupting its physical constants.
pub fn apply_update(registry: &mut BodyRegistry, update: &EphemerisUpdate) -> ApplyReport {
    let mut report = ApplyReport::default();

    let mut names: Vec<&String> = update.entries.keys().collect();
    names.sort();

    for name in names {
        let entry = &update.entries[name];
        let Some(body) = registry.get_mut(name) else {
            report.unknown.push(name.clone());
            continue;
        };
        if !entry.is_usable() {
            report.rejected.push(name.clone());
            continue;
        }

        body.position = entry.position;
        body.velocity = entry.velocity;
        if let Some(mass) = entry.mass.filter(|m| m.is_finite() && *m > 0.0) {
            body.mass = mass;
        }
        if let Some(radius) = entry.radius.filter(|r| r.is_finite() && *r >= 0.0) {
            body.radius = radius;
        }
        report.applied.push(name.clone());
    }

    report
}

/// Identifies one ephemeris request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EphemerisTicket(u64);

/// Generation counter for ephemeris requests.
///
/// At most one request is outstanding; starting a new one supersedes the
/// previous, and invalidation (on reset) orphans it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EphemerisRequests {
    generation: u64,
    outstanding: Option<EphemerisTicket>,
}

impl EphemerisRequests {
    pub fn begin(&mut self) -> EphemerisTicket {
        self.generation += 1;
        let ticket = EphemerisTicket(self.generation);
        self.outstanding = Some(ticket);
        ticket
    }

    /// Consume the outstanding slot if `ticket` is the current request.
    pub fn accept(&mut self, ticket: EphemerisTicket) -> bool {
        if self.outstanding == Some(ticket) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.outstanding = None;
    }

    pub fn outstanding(&self) -> Option<EphemerisTicket> {
        self.outstanding
    }
}

/// Outcome of handing a finished request to the coordinator.
#[derive(Clone, Debug, PartialEq)]
pub enum EphemerisApplied {
    Applied(ApplyReport),
    /// The request was superseded or invalidated; result discarded.
    Stale,
    /// The source failed; bodies keep their previous state.
    Failed(EphemerisError),
}

/// Plugin that periodically refreshes body states from an ephemeris source
/// without blocking the frame loop.
pub struct EphemerisPlugin {
    pub source: Arc<dyn EphemerisSource>,
}

impl Plugin for EphemerisPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EphemerisFeed {
            source: self.source.clone(),
            in_flight: None,
            last_request_at: None,
        })
        .add_systems(
            Update,
            (request_ephemeris, poll_ephemeris)
                .chain()
                .after(SimulationSet::Step),
        );
    }
}

/// Background request state for [`EphemerisPlugin`].
#[derive(Resource)]
pub struct EphemerisFeed {
    source: Arc<dyn EphemerisSource>,
    in_flight: Option<(EphemerisTicket, Task<Result<EphemerisUpdate, EphemerisError>>)>,
    /// Simulated time of the last request.
    last_request_at: Option<f64>,
}

impl EphemerisFeed {
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

/// Fire a request on start and then every `ephemeris_interval` simulated
/// seconds while running.
fn request_ephemeris(mut sim: ResMut<Simulation>, mut feed: ResMut<EphemerisFeed>) {
    if !sim.clock().is_running() || feed.in_flight.is_some() {
        return;
    }

    let now = sim.clock().elapsed();
    let interval = sim.config().ephemeris_interval;
    let due = match feed.last_request_at {
        None => true,
        // Elapsed time going backwards means the simulation was reset
        Some(last) => now < last || now - last >= interval,
    };
    if !due {
        return;
    }

    let ticket = sim.begin_ephemeris_request();
    let source = feed.source.clone();
    let task = AsyncComputeTaskPool::get().spawn(async move { source.fetch(now) });
    feed.in_flight = Some((ticket, task));
    feed.last_request_at = Some(now);
    debug!("Ephemeris request {:?} for t = {:.2}s", ticket, now);
}

/// Check the in-flight request without blocking and hand any result to the
/// coordinator.
fn poll_ephemeris(mut sim: ResMut<Simulation>, mut feed: ResMut<EphemerisFeed>) {
    let Some((ticket, task)) = feed.in_flight.as_mut() else {
        return;
    };
    let Some(result) = block_on(future::poll_once(task)) else {
        return;
    };
    let ticket = *ticket;
    feed.in_flight = None;

    match sim.complete_ephemeris(ticket, result) {
        EphemerisApplied::Applied(report) => {
            debug!("Ephemeris applied to {} bodies", report.applied.len());
        }
        EphemerisApplied::Stale => {
            // Reset happened while the request was running
            feed.last_request_at = None;
        }
        EphemerisApplied::Failed(_) => {}
    }
}
