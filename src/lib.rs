#![doc = "Countymander public API"]
mod common;
mod config;
mod graph;
mod io;
mod load;
mod merge;
mod pipeline;
mod redistrict;
mod render;
mod report;
mod types;

#[doc(inline)]
pub use types::{AdjacencyRecord, CountyName, CountyRecord, DistrictAssignment, MergedCounty};

#[doc(inline)]
pub use load::{load_adjacency, load_adjacency_str, load_assignments, load_population, load_population_str, save_assignments, symmetry_mismatches};

#[doc(inline)]
pub use merge::{IntegrityIssue, IntegrityReport, MergedTable, merge};

#[doc(inline)]
pub use graph::CountyGraph;

#[doc(inline)]
pub use redistrict::{Districting, ExtractionFault, OHIO_DISTRICTS, SolveError, SolveStatus, SolverConfig, ValidationError, solve};

#[doc(inline)]
pub use render::{BoundarySource, CountyBoundary, MapOptions, OHIO_FIPS, RenderSummary, ShapefileBoundaries, render_district_map, write_district_map};

#[cfg(feature = "download")]
#[doc(inline)]
pub use render::TigerBoundaries;

#[doc(inline)]
pub use config::RunConfig;

#[doc(inline)]
pub use pipeline::{RunOutcome, render_assignments, run};

#[doc(inline)]
pub use report::Reporter;
