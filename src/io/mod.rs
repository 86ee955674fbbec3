//! IO module for format-specific reading and writing operations.
//!
//! Each format module handles reading and writing for a specific file format.
//!
//! # Format Modules
//!
//! - `csv` - CSV format for population tables and district assignments
//! - `json` - JSON format for the county adjacency relation
//! - `shp` - Shapefile format for county boundaries
//! - `svg` - SVG format for district map export

pub(crate) mod csv;
pub(crate) mod json;
pub(crate) mod shp;
pub(crate) mod svg;
