use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use brewlog::config::open_config;
use brewlog::logger::configure_logger;
use brewlog::PostStore;

/// Reads posts the way the blog pages do
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. If empty, brewlog.toml is searched or defaults are used
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints every post of the index, newest first
    List,
    /// Prints one post with its markdown content
    Show {
        /// File name of the post without the .md extension
        slug: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = open_config(args.config_path.map(PathBuf::from))?;
    if let Err(err) = configure_logger(&config) {
        eprintln!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let store = PostStore::from_config(&config);
    let json = match args.command {
        Command::List => serde_json::to_string_pretty(&store.list_all()?)?,
        Command::Show { slug } => serde_json::to_string_pretty(&store.get_detail(&slug)?)?,
    };
    println!("{}", json);

    Ok(())
}
