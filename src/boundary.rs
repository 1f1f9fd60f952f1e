//! Out-of-bounds tracking with a grace period.
//!
//! Two states, inside and outside. Leaving starts a timer in simulated
//! seconds; coming back clears it. Staying out for the full grace period is
//! a terminal violation.

/// What changed during one boundary update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundarySignal {
    /// Nothing to report.
    None,
    /// The craft just crossed outward. Drives the warning display.
    Entered,
    /// The craft came back inside.
    Cleared,
    /// Grace period exhausted; the run must stop.
    Violation,
}

/// Boundary monitor state (`outOfBounds`, `timeOutOfBounds`).
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryMonitor {
    pub radius: f64,
    pub grace: f64,
    out_of_bounds: bool,
    time_out_of_bounds: f64,
}

impl BoundaryMonitor {
    pub fn new(radius: f64, grace: f64) -> Self {
        Self {
            radius,
            grace,
            out_of_bounds: false,
            time_out_of_bounds: 0.0,
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.out_of_bounds
    }

    pub fn time_out_of_bounds(&self) -> f64 {
        self.time_out_of_bounds
    }

    /// Seconds left before a violation, if currently outside.
    pub fn time_remaining(&self) -> Option<f64> {
        self.out_of_bounds
            .then(|| (self.grace - self.time_out_of_bounds).max(0.0))
    }

    /// True if `distance` from the origin lies beyond the boundary.
    pub fn exceeds(&self, distance: f64) -> bool {
        distance > self.radius
    }

    /// Advance the state machine by one tick.
    ///
    /// The tick that crosses outward starts the timer at zero; `dt` is only
    /// accumulated on subsequent ticks spent outside.
    pub fn update(&mut self, distance: f64, dt: f64) -> BoundarySignal {
        match (self.out_of_bounds, self.exceeds(distance)) {
            (false, false) => BoundarySignal::None,
            (false, true) => {
                self.out_of_bounds = true;
                self.time_out_of_bounds = 0.0;
                BoundarySignal::Entered
            }
            (true, false) => {
                self.reset();
                BoundarySignal::Cleared
            }
            (true, true) => {
                self.time_out_of_bounds += dt;
                if self.time_out_of_bounds >= self.grace {
                    BoundarySignal::Violation
                } else {
                    BoundarySignal::None
                }
            }
        }
    }

    /// Back to `(false, 0)`.
    pub fn reset(&mut self) {
        self.out_of_bounds = false;
        self.time_out_of_bounds = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_stays_quiet() {
        let mut m = BoundaryMonitor::new(100.0, 30.0);
        assert_eq!(m.update(100.0, 1.0), BoundarySignal::None);
        assert!(!m.is_out_of_bounds());
    }

    #[test]
    fn test_crossing_out_starts_timer_at_zero() {
        let mut m = BoundaryMonitor::new(100.0, 30.0);
        assert_eq!(m.update(100.1, 5.0), BoundarySignal::Entered);
        assert!(m.is_out_of_bounds());
        assert_eq!(m.time_out_of_bounds(), 0.0);
        assert_eq!(m.time_remaining(), Some(30.0));
    }

    #[test]
    fn test_violation_fires_exactly_at_grace() {
        let mut m = BoundaryMonitor::new(100.0, 3.0);
        assert_eq!(m.update(200.0, 1.0), BoundarySignal::Entered);
        assert_eq!(m.update(200.0, 1.0), BoundarySignal::None);
        assert_eq!(m.update(200.0, 1.0), BoundarySignal::None);
        assert_eq!(m.time_out_of_bounds(), 2.0);
        assert_eq!(m.update(200.0, 1.0), BoundarySignal::Violation);
        assert_eq!(m.time_out_of_bounds(), 3.0);
    }

    #[test]
    fn test_reentry_resets_timer() {
        let mut m = BoundaryMonitor::new(100.0, 30.0);
        m.update(150.0, 1.0);
        m.update(150.0, 10.0);
        assert_eq!(m.time_out_of_bounds(), 10.0);

        assert_eq!(m.update(50.0, 1.0), BoundarySignal::Cleared);
        assert!(!m.is_out_of_bounds());
        assert_eq!(m.time_out_of_bounds(), 0.0);
        assert_eq!(m.time_remaining(), None);

        // A second excursion starts from zero again
        assert_eq!(m.update(150.0, 1.0), BoundarySignal::Entered);
        assert_eq!(m.update(150.0, 29.0), BoundarySignal::None);
    }
}
