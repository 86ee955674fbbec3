use anyhow::Result;
use countymander::{BoundarySource, Reporter, RunConfig, ShapefileBoundaries};

use crate::cli::{Cli, RedistrictArgs};

/// Start from the config file (or the Ohio defaults) and apply command-line overrides.
fn run_config(args: &RedistrictArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };

    if let Some(path) = &args.population { config.population = path.clone() }
    if let Some(path) = &args.adjacency { config.adjacency = path.clone() }
    if let Some(districts) = args.districts { config.num_districts = districts }
    if let Some(tolerance) = args.tolerance { config.tolerance = Some(tolerance) }
    if let Some(secs) = args.time_limit { config.time_limit_secs = Some(secs) }
    if let Some(path) = &args.output { config.output = path.clone() }
    if let Some(path) = &args.map { config.map = path.clone() }
    if args.drop_unknown_neighbors { config.drop_unknown_neighbors = true }

    Ok(config)
}

fn boundary_source(args: &RedistrictArgs) -> Option<Box<dyn BoundarySource>> {
    if let Some(path) = &args.boundaries {
        return Some(Box::new(ShapefileBoundaries::new(path)));
    }
    #[cfg(feature = "download")]
    if let Some(dir) = &args.download {
        return Some(Box::new(countymander::TigerBoundaries::new(dir)));
    }
    None
}

pub fn run(_cli: &Cli, args: &RedistrictArgs) -> Result<()> {
    let config = run_config(args)?;
    let reporter = Reporter::new("redistrict");
    let boundaries = boundary_source(args);

    let outcome = countymander::run(&config, &reporter, boundaries.as_deref())?;

    println!("[redistrict] {}", outcome.districting.status);
    println!("{}", outcome.districting.summary());
    println!("[redistrict] assignments written to {}", config.output.display());
    if let Some(summary) = &outcome.render {
        println!("[redistrict] map with {} counties written to {}", summary.drawn, config.map.display());
    }
    if reporter.warnings() > 0 {
        println!("[redistrict] finished with {} warning(s)", reporter.warnings());
    }

    Ok(())
}
