use anyhow::Result;
use countymander::{OHIO_FIPS, Reporter, RunConfig, ShapefileBoundaries};

use crate::cli::{Cli, RenderArgs};

pub fn run(_cli: &Cli, args: &RenderArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or_else(|| RunConfig::default().map);
    let state_fips = args.state_fips.as_deref().unwrap_or(OHIO_FIPS);
    let reporter = Reporter::new("render");

    let source = ShapefileBoundaries::new(&args.boundaries);
    let summary = countymander::render_assignments(&args.assignments, &source, state_fips, &out_path, &reporter)?;

    println!("[render] {} counties drawn to {}", summary.drawn, out_path.display());
    if !summary.unassigned.is_empty() || !summary.missing_geometry.is_empty() {
        println!("[render] {} without assignment, {} without boundary", summary.unassigned.len(), summary.missing_geometry.len());
    }

    Ok(())
}
