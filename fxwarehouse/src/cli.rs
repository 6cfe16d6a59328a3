//! Command-line interface definition and parsing.

use crate::IOArgs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the deal warehouse.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// The available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve,

    /// Ingest a line-delimited deal file into the database
    Import(IOArgs),
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
