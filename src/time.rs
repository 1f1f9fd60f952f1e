//! Simulation clock: run state, pause state and accumulated simulated time.

/// Lifecycle phase of the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Timing state for one simulation instance.
///
/// `running` goes false → true once per run via [`SimulationClock::start`];
/// after that, `start` toggles pause. Terminal outcomes call
/// [`SimulationClock::stop`]; only [`SimulationClock::reset`] makes the clock
/// startable again.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    running: bool,
    paused: bool,
    /// Multiplier from real to simulated seconds. Survives reset.
    pub time_scale: f64,
    elapsed: f64,
    finished: bool,
}

impl SimulationClock {
    pub fn new(time_scale: f64) -> Self {
        Self {
            running: false,
            paused: false,
            time_scale,
            elapsed: 0.0,
            finished: false,
        }
    }

    pub fn state(&self) -> ClockState {
        match (self.running, self.paused) {
            (false, _) => ClockState::Stopped,
            (true, false) => ClockState::Running,
            (true, true) => ClockState::Paused,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True once a terminal outcome has stopped this run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Running and not paused: physics should advance.
    pub fn is_ticking(&self) -> bool {
        self.running && !self.paused
    }

    /// Simulated seconds accumulated while running and unpaused.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Stopped → Running the first time; toggles pause afterwards.
    ///
    /// A finished run ignores this until reset. Returns the resulting state.
    pub fn start(&mut self) -> ClockState {
        if self.finished {
            return self.state();
        }
        if self.running {
            self.paused = !self.paused;
        } else {
            self.running = true;
            self.paused = false;
        }
        self.state()
    }

    /// Terminal stop. Already-scheduled ticks see `running == false` and no-op.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.finished = true;
    }

    pub fn advance(&mut self, dt: f64) {
        if self.is_ticking() {
            self.elapsed += dt;
        }
    }

    /// Back to a stopped, zeroed clock; the time scale is configuration and
    /// is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.time_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_stopped() {
        let clock = SimulationClock::new(1.0);
        assert_eq!(clock.state(), ClockState::Stopped);
        assert!(!clock.is_ticking());
    }

    #[test]
    fn test_start_then_toggle_pause() {
        let mut clock = SimulationClock::new(1.0);
        assert_eq!(clock.start(), ClockState::Running);
        assert_eq!(clock.start(), ClockState::Paused);
        assert_eq!(clock.start(), ClockState::Running);
    }

    #[test]
    fn test_advance_only_while_ticking() {
        let mut clock = SimulationClock::new(1.0);
        clock.advance(1.0);
        assert_eq!(clock.elapsed(), 0.0);

        clock.start();
        clock.advance(0.5);
        clock.start();
        clock.advance(10.0);
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn test_stopped_run_cannot_restart_until_reset() {
        let mut clock = SimulationClock::new(2.0);
        clock.start();
        clock.advance(1.0);
        clock.stop();
        assert_eq!(clock.start(), ClockState::Stopped);
        assert!(clock.is_finished());

        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.time_scale, 2.0);
        assert!(!clock.is_finished());
        assert_eq!(clock.start(), ClockState::Running);
    }
}
