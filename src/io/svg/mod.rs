//! SVG format writing operations for visualization export.

mod color;
mod geometry;
mod writer;

pub(crate) use color::*;
pub(crate) use geometry::*;
pub(crate) use writer::*;
