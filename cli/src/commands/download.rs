use anyhow::Result;
use countymander::TigerBoundaries;

use crate::cli::{Cli, DownloadArgs};

pub fn run(_cli: &Cli, args: &DownloadArgs) -> Result<()> {
    let out_dir = args.output.clone().unwrap_or(".".into());

    let shp_path = TigerBoundaries::new(out_dir).ensure_downloaded()?;
    println!("[download] county boundaries at {}", shp_path.display());

    Ok(())
}
