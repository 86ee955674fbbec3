mod cli;
mod commands;
mod logger;

use cli::{Cli, Commands};
use commands::{redistrict, render};
#[cfg(feature = "download")]
use commands::download;

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logger::init(cli.verbose)?;

    match &cli.command {
        Commands::Redistrict(args) => redistrict::run(&cli, args),
        Commands::Render(args) => render::run(&cli, args),
        #[cfg(feature = "download")]
        Commands::Download(args) => download::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
