//! Loaders for the input tables of a run, and the assignment table it produces.

mod adjacency;
mod assignments;
mod population;

pub use adjacency::{load_adjacency, load_adjacency_str, symmetry_mismatches};
pub use assignments::{load_assignments, save_assignments};
pub use population::{load_population, load_population_str};
