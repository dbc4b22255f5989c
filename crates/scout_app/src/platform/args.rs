use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use scout_core::CategoryCode;

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "asset-scout",
    version,
    about = "Find which CDN asset images exist for an event name",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path (defaults to ./asset_scout.ron when present).
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File, global = true)]
    pub log: LogTarget,

    /// Log at debug level, including every failed probe.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the category codes that can be scanned.
    Categories,

    /// Print the candidate URLs for a name without probing them.
    Generate {
        #[arg(short, long)]
        name: String,

        #[arg(short = 't', long, value_parser = parse_category)]
        category: CategoryCode,
    },

    /// Probe every candidate and print the working links.
    Scan {
        #[arg(short, long)]
        name: String,

        #[arg(short = 't', long, value_parser = parse_category)]
        category: CategoryCode,

        /// Only show results from this region (e.g. SG, Store).
        #[arg(short, long)]
        region: Option<String>,

        /// Print only the links of one category label (e.g. Tab, Title).
        #[arg(long, value_name = "LABEL")]
        copy_category: Option<String>,

        /// Print results as JSON instead of grouped text.
        #[arg(long)]
        json: bool,

        /// Write the visible links to this file.
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// Save every visible asset into this directory.
        #[arg(long, value_name = "DIR")]
        download: Option<PathBuf>,
    },

    /// Line-oriented session; type `help` once started.
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

fn parse_category(raw: &str) -> Result<CategoryCode, String> {
    raw.parse().map_err(|err: scout_core::ParseCategoryError| err.to_string())
}
