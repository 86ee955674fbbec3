use std::path::PathBuf;

/// County redistricting CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "countymander", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Assign counties to districts and write the assignment table (and optionally a map)
    Redistrict(RedistrictArgs),

    /// Render a district map from an existing assignment table
    Render(RenderArgs),

    /// Download the TIGER/Line county boundary layer
    #[cfg(feature = "download")]
    Download(DownloadArgs),
}

#[derive(clap::Args, Debug)]
pub struct RedistrictArgs {
    /// JSON run configuration; flags below override its fields
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Population CSV (county_name,population), defaults to "ohio_counties.csv"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub population: Option<PathBuf>,

    /// Adjacency JSON, defaults to "adjacent_counties.json"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub adjacency: Option<PathBuf>,

    /// Number of districts, defaults to 16
    #[arg(short, long)]
    pub districts: Option<u32>,

    /// Cap each district's deviation at this fraction of the ideal population (e.g. 0.1)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Give up after this many seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Drop neighbors and adjacency entries with no population row instead of failing
    #[arg(long)]
    pub drop_unknown_neighbors: bool,

    /// Output assignment CSV, defaults to "district_assignments.csv"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output SVG map, defaults to "ohio_district_map.svg"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub map: Option<PathBuf>,

    /// County boundary shapefile; the map is only drawn when boundaries are available
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub boundaries: Option<PathBuf>,

    /// Download TIGER county boundaries into this cache directory for the map
    #[cfg(feature = "download")]
    #[arg(long, value_hint = clap::ValueHint::DirPath, conflicts_with = "boundaries")]
    pub download: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Assignment CSV (county_name,assigned_district)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub assignments: PathBuf,

    /// County boundary shapefile
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub boundaries: PathBuf,

    /// State FIPS code, defaults to Ohio ("39")
    #[arg(long)]
    pub state_fips: Option<String>,

    /// Output SVG map, defaults to "ohio_district_map.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[cfg(feature = "download")]
#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// Cache directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}
