//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FarmTech: register culture plots, their area, and the inputs they need
#[derive(Parser)]
#[command(name = "farmtech")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the data files (default: next to the executable)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (default)
    Interactive,

    /// List every registered culture
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one culture in detail
    Show {
        /// Culture id
        #[arg(value_name = "ID")]
        id: u64,
    },

    /// Rewrite the data file and regenerate the CSV export
    Export,
}
