use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use crate::usage::Backend;

/// DU Improved -- see a disk usage report with bar charts
#[derive(Parser, Debug)]
#[command(name = "duim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The directory to scan
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Length of the bar graphs [default: 20]
    #[arg(short, long, value_name = "N")]
    pub length: Option<usize>,

    /// Print sizes in human-readable format (e.g. 1.00 KiB, 23.00 MiB, 2.00 GiB)
    #[arg(short = 'H', long)]
    pub human_readable: bool,

    /// Where sizes come from [default: du]
    #[arg(long, value_enum, value_name = "BACKEND")]
    pub backend: Option<Backend>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
