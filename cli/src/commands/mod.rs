pub mod redistrict;
pub mod render;
#[cfg(feature = "download")]
pub mod download;
