//! County boundary sources and the district map renderer.

mod boundary;
mod map;

pub use boundary::{BoundarySource, CountyBoundary, OHIO_FIPS, ShapefileBoundaries};
#[cfg(feature = "download")]
pub use boundary::TigerBoundaries;
pub use map::{MapOptions, RenderSummary, render_district_map, write_district_map};
