//! The end-to-end run: load, merge, check, solve, write, render.

use std::path::Path;

use anyhow::Result;

use crate::{
    config::RunConfig,
    graph::CountyGraph,
    load::{load_adjacency, load_assignments, load_population, save_assignments, symmetry_mismatches},
    merge::merge,
    redistrict::{Districting, solve},
    render::{BoundarySource, MapOptions, RenderSummary, render_district_map},
    report::Reporter,
    types::DistrictAssignment,
};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub districting: Districting,
    /// Districts whose counties do not form one connected piece.
    pub disconnected: Vec<u32>,
    /// Present when a boundary source was given and the map was written.
    pub render: Option<RenderSummary>,
}

/// Log `error` under `scope` and hand it back, so stages can halt with `?`.
fn halt(reporter: &Reporter, scope: &str, error: anyhow::Error) -> anyhow::Error {
    reporter.error(scope, format!("{error:#}"));
    error
}

/// Run the whole redistricting pipeline for `config`.
///
/// Any load, integrity, or solver failure is logged and returned; nothing is written in that case.
/// The map is only rendered when `boundaries` is given.
pub fn run(config: &RunConfig, reporter: &Reporter, boundaries: Option<&dyn BoundarySource>) -> Result<RunOutcome> {
    let population = load_population(&config.population).map_err(|e| halt(reporter, "load", e))?;
    reporter.info("load", format!("{} counties from {}", population.len(), config.population.display()));

    let adjacency = load_adjacency(&config.adjacency).map_err(|e| halt(reporter, "load", e))?;
    reporter.info("load", format!("{} adjacency entries from {}", adjacency.len(), config.adjacency.display()));

    for (a, b) in symmetry_mismatches(&adjacency) {
        reporter.warn("adjacency", format!("'{a}' lists '{b}' but '{b}' does not list '{a}'"));
    }

    let mut table = merge(&population, &adjacency);
    if config.drop_unknown_neighbors {
        for (county, neighbor) in table.prune_unknown_neighbors() {
            reporter.warn("merge", format!("dropped unknown neighbor '{neighbor}' of '{county}'"));
        }
        for county in std::mem::take(&mut table.orphans) {
            reporter.warn("merge", format!("ignored adjacency entry for unpopulated county '{county}'"));
        }
    }

    let integrity = table.integrity();
    if !integrity.is_clean() {
        for issue in &integrity.issues {
            reporter.error("merge", issue);
        }
        return Err(anyhow::Error::new(integrity).context("[merge] Integrity checks failed"));
    }
    reporter.info("merge", format!("{} counties, total population {}", table.counties.len(), table.total_population()));

    let solver_config = config.solver_config().map_err(|e| halt(reporter, "redistrict", e))?;
    reporter.info("redistrict", format!("solving for {} districts", solver_config.num_districts));

    // neighbor agreement keeps each adjacency component inside one district
    let graph = CountyGraph::from_counties(&table.counties);
    let components = graph.components().len();
    reporter.info("merge", format!("{components} adjacency component(s)"));
    if components < solver_config.num_districts as usize {
        reporter.warn("redistrict", format!(
            "only {components} adjacency component(s) for {} districts; some districts will be empty",
            solver_config.num_districts,
        ));
    }

    let districting = match solve(&table.counties, &solver_config) {
        Ok(districting) => districting,
        Err(e) => {
            reporter.error("redistrict", format!("status {}: {e}", e.status()));
            return Err(e.into());
        }
    };
    reporter.info("redistrict", format!("status {}, objective {:.1}", districting.status, districting.objective));
    for line in districting.summary().lines() {
        reporter.debug("redistrict", line);
    }

    let disconnected = districting.disconnected_districts(&graph);
    if !disconnected.is_empty() {
        reporter.warn("redistrict", format!("districts not connected on the adjacency graph: {disconnected:?}"));
    }

    save_assignments(&districting.assignments, &config.output).map_err(|e| halt(reporter, "write", e))?;
    reporter.info("write", format!("{} assignments to {}", districting.assignments.len(), config.output.display()));

    let render = match boundaries {
        Some(source) => Some(render_map(&districting.assignments, source, &config.state_fips, &config.map, reporter)?),
        None => None,
    };

    Ok(RunOutcome { districting, disconnected, render })
}

/// Render an assignment CSV from an earlier run.
pub fn render_assignments(assignments: &Path, source: &dyn BoundarySource, state_fips: &str, output: &Path, reporter: &Reporter) -> Result<RenderSummary> {
    let assignments = load_assignments(assignments).map_err(|e| halt(reporter, "load", e))?;
    render_map(&assignments, source, state_fips, output, reporter)
}

fn render_map(assignments: &[DistrictAssignment], source: &dyn BoundarySource, state_fips: &str, output: &Path, reporter: &Reporter) -> Result<RenderSummary> {
    let boundaries = source.fetch(state_fips).map_err(|e| halt(reporter, "render", e))?;
    reporter.info("render", format!("{} county boundaries for state {state_fips}", boundaries.len()));

    let summary = render_district_map(assignments, &boundaries, output, &MapOptions::default())
        .map_err(|e| halt(reporter, "render", e))?;

    for county in &summary.unassigned {
        reporter.warn("render", format!("'{county}' has no assignment; drawn unassigned"));
    }
    for county in &summary.missing_geometry {
        reporter.warn("render", format!("'{county}' has no boundary; not drawn"));
    }
    reporter.info("render", format!("{} counties drawn to {}", summary.drawn, output.display()));

    Ok(summary)
}
