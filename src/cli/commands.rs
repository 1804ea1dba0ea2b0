//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - quote: fetch a random quote, fetch one by number, or record a new one
//! - list: print numbered quotes or export the raw file
//! - import: load a legacy JSON dump
//! - info: show where quotes live

use clap::{Parser, Subcommand};
use ewit::command::ListFormat;
use ewit::storage::RecordRange;
use std::path::PathBuf;

/// EWit - Ye Almighty Quotebot, Eternal Witness of Your Sinful Sayings
#[derive(Parser, Debug)]
#[command(name = "ewit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Render quotes as rich title/footer blocks
    #[arg(long, global = true)]
    pub embed: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch or record a quote
    ///
    /// No arguments gives a random quote, a number gives that quote, and
    /// anything else records a new one:
    ///
    ///   ewit quote "<quote body>" - <source>, <optional comment...>
    Quote {
        /// Quote number, or the words of a new quote
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// List stored quotes
    List {
        /// Output format (text, file, csv)
        #[arg(short, long, default_value = "text")]
        format: ListFormat,

        /// Inclusive range of quote numbers, e.g. 5,20 or (5,20)
        #[arg(short, long)]
        range: Option<RecordRange>,

        /// Directory for file exports (defaults to the configured one)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Import a legacy JSON array of quote strings
    Import {
        /// JSON file to read
        file: PathBuf,

        /// First array index to import
        #[arg(long)]
        start: Option<usize>,

        /// Last array index to import
        #[arg(long)]
        end: Option<usize>,
    },

    /// Show the quote file location and size
    Info,
}
