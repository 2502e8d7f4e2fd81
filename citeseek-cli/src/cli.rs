//! CLI definitions for the citeseek command-line interface.
//!
//! Four subcommands: `search` runs one query, `details` shows a single
//! record with its statute lookup, `stats` summarizes the loaded dataset, and
//! `repl` searches each line read from stdin.

use std::path::PathBuf;

use citeseek_types::SearchConfig;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "citeseek",
    about = "Look up traffic offenses by keyword, alias or citation",
    version
)]
pub struct Cli {
    /// Dataset directory containing offenses.json and primary_aliases.json
    #[arg(short, long, global = true, env = "CITESEEK_DATA", default_value = ".")]
    pub data: PathBuf,

    /// Maximum number of related matches
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog once and print the outcome
    Search {
        /// Search query
        query: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one offense with citation, level, keywords and statute link
    Details {
        /// Offense id
        id: u32,
    },

    /// Print dataset statistics
    Stats,

    /// Read queries from stdin, one per line
    ///
    /// `:reload` reloads the dataset from disk, `:q` quits.
    Repl,
}

impl Cli {
    /// Search configuration after applying command-line overrides.
    pub fn search_config(&self) -> SearchConfig {
        let config = SearchConfig::default();
        match self.limit {
            Some(limit) => config.with_related_limit(limit),
            None => config,
        }
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "citeseek_core=warn,citeseek=warn",
            1 => "citeseek_core=info,citeseek=info",
            _ => "citeseek_core=debug,citeseek=debug",
        }
    }
}
