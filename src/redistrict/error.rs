//! Failure taxonomy for an optimizer run.

use std::{fmt, time::Duration};

use crate::types::CountyName;

/// Status of the solver after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Proven optimal solution found.
    Optimal,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective can decrease without bound.
    Unbounded,
    /// The time limit expired before the solver finished.
    TimedOut,
    /// The model was never solved (invalid input, solver failure, or an unusable solution).
    NotSolved,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::TimedOut => "Timed out",
            SolveStatus::NotSolved => "Not Solved",
        })
    }
}

/// Input rejected before a model was built.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NoCounties,
    NoDistricts,
    TooManyDistricts { num_districts: u32, num_counties: usize },
    DuplicateCounty { county: CountyName },
    MissingAdjacency { county: CountyName },
    UnknownNeighbor { county: CountyName, neighbor: CountyName },
    InvalidTolerance { tolerance: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoCounties => write!(f, "no counties to assign"),
            ValidationError::NoDistricts => write!(f, "number of districts must be positive"),
            ValidationError::TooManyDistricts { num_districts, num_counties } =>
                write!(f, "{num_districts} districts requested but only {num_counties} counties are available"),
            ValidationError::DuplicateCounty { county } => write!(f, "county '{county}' appears more than once"),
            ValidationError::MissingAdjacency { county } => write!(f, "county '{county}' has no adjacency entry"),
            ValidationError::UnknownNeighbor { county, neighbor } =>
                write!(f, "county '{county}' lists neighbor '{neighbor}' which is not in the county table"),
            ValidationError::InvalidTolerance { tolerance } =>
                write!(f, "tolerance must be a finite, non-negative fraction (got {tolerance})"),
        }
    }
}

/// A solved model whose binary variables do not pick exactly one district for a county.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionFault {
    pub county: CountyName,
    /// Districts whose variable evaluated to 1.
    pub selected: Vec<u32>,
    /// Districts whose variable was neither 0 nor 1 within tolerance.
    pub fractional: Vec<(u32, f64)>,
}

impl fmt::Display for ExtractionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "county '{}' selected {} district(s) {:?}", self.county, self.selected.len(), self.selected)?;
        if !self.fractional.is_empty() {
            write!(f, " with fractional values {:?}", self.fractional)?;
        }
        Ok(())
    }
}

/// Why an optimizer run produced no assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    Validation(ValidationError),
    Infeasible,
    Unbounded,
    TimedOut { limit: Duration },
    /// The solver failed for another reason, or its worker died.
    NotSolved(String),
    Extraction(ExtractionFault),
}

impl SolveError {
    /// Solver status corresponding to this failure.
    pub fn status(&self) -> SolveStatus {
        match self {
            SolveError::Infeasible => SolveStatus::Infeasible,
            SolveError::Unbounded => SolveStatus::Unbounded,
            SolveError::TimedOut { .. } => SolveStatus::TimedOut,
            SolveError::Validation(_) | SolveError::NotSolved(_) | SolveError::Extraction(_) => SolveStatus::NotSolved,
        }
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Validation(e) => write!(f, "invalid input: {e}"),
            SolveError::Infeasible => write!(f, "model is infeasible"),
            SolveError::Unbounded => write!(f, "model is unbounded"),
            SolveError::TimedOut { limit } => write!(f, "no solution found within {:.1}s", limit.as_secs_f64()),
            SolveError::NotSolved(reason) => write!(f, "model not solved: {reason}"),
            SolveError::Extraction(fault) => write!(f, "unusable solution: {fault}"),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<ValidationError> for SolveError {
    fn from(e: ValidationError) -> Self { SolveError::Validation(e) }
}

impl From<ExtractionFault> for SolveError {
    fn from(fault: ExtractionFault) -> Self { SolveError::Extraction(fault) }
}
