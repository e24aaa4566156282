pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "seedposter")]
#[command(about = "Render featured and recent posts into a static page", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/seedposter/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the loader against the default page and write the final HTML
    Render {
        /// posts.json URL or file path (default: from config)
        #[arg(short, long)]
        source: Option<String>,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fetch posts once and list them by index
    Fetch {
        /// posts.json URL or file path (default: from config)
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Show the effective configuration
    Config,
}
