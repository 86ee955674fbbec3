//! The county-to-district integer program: configuration, validation, model, and result.

mod config;
mod districting;
mod error;
mod extract;
mod model;
mod solve;
mod validate;

pub use config::{OHIO_DISTRICTS, SolverConfig};
pub use districting::Districting;
pub use error::{ExtractionFault, SolveError, SolveStatus, ValidationError};
pub use solve::solve;
