//! Optimizer configuration.

use std::time::Duration;

/// Number of congressional districts Ohio elects.
pub const OHIO_DISTRICTS: u32 = 16;

/// Configuration for a single optimizer run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use countymander::SolverConfig;
///
/// let config = SolverConfig::new(16)
///     .with_tolerance(0.10)
///     .with_time_limit(Duration::from_secs(300));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Number of districts to fill.
    pub num_districts: u32,

    /// Optional hard cap on each district's deviation, as a fraction of the ideal population.
    /// `Some(0.1)` keeps every district within 10% of ideal; `None` leaves balance to the objective alone.
    pub tolerance: Option<f64>,

    /// Optional wall-clock limit for the solver. Expiry is reported as a timeout, never as infeasibility.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    pub fn new(num_districts: u32) -> Self {
        Self { num_districts, tolerance: None, time_limit: None }
    }

    /// Sets the balance tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Sets the solver time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self { Self::new(OHIO_DISTRICTS) }
}
