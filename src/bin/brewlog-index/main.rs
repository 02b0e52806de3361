use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::{error, info, warn};

use brewlog::config::open_config;
use brewlog::logger::configure_logger;
use brewlog::post_index::build;

/// Rebuilds the post index from the markdown files of the blog
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. If empty, brewlog.toml is searched or defaults are used
    #[arg(short, long)]
    config_path: Option<String>,
}

fn run(args: Args) -> Result<()> {
    let config_path = args.config_path.map(PathBuf::from);
    let config = open_config(config_path).context("Could not load configuration")?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Building post index from {}", config.paths.content_dir.display());
    let posts = build(&config)?;

    println!("{} created with {} posts.", config.paths.index_file.display(), posts.len());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Post index build failed: {:#}", err);
            spdlog::default_logger().flush();
            ExitCode::FAILURE
        }
    }
}
