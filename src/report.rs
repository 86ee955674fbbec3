use std::{cell::Cell, fmt::Display};

/// Run-scoped reporter handed to each pipeline stage.
///
/// Messages go through the `log` facade tagged as `[scope] message`, under a target naming the run,
/// so several runs in one process can be told apart. Warnings are counted for the end-of-run summary.
#[derive(Debug)]
pub struct Reporter {
    run: String,
    warnings: Cell<usize>,
}

impl Reporter {
    pub fn new(run: impl Into<String>) -> Self {
        Self { run: run.into(), warnings: Cell::new(0) }
    }

    /// Name of the run this reporter is scoped to.
    #[inline] pub fn run(&self) -> &str { &self.run }

    /// Number of warnings reported so far.
    #[inline] pub fn warnings(&self) -> usize { self.warnings.get() }

    pub fn debug(&self, scope: &str, message: impl Display) {
        log::debug!(target: self.run.as_str(), "[{scope}] {message}");
    }

    pub fn info(&self, scope: &str, message: impl Display) {
        log::info!(target: self.run.as_str(), "[{scope}] {message}");
    }

    pub fn warn(&self, scope: &str, message: impl Display) {
        self.warnings.set(self.warnings.get() + 1);
        log::warn!(target: self.run.as_str(), "[{scope}] {message}");
    }

    pub fn error(&self, scope: &str, message: impl Display) {
        log::error!(target: self.run.as_str(), "[{scope}] {message}");
    }
}

impl Default for Reporter {
    fn default() -> Self { Self::new("countymander") }
}
