//! CLI definitions for RipApi.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// RipApi CLI.
#[derive(Parser)]
#[command(name = "ripapi")]
#[command(about = "Modular API client with pluggable auth and protocols")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.ripapi/config.toml)
    #[arg(short, long, global = true, env = "RIPAPI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start the kernel and list registered modules
    Modules {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate and send a request through a protocol executor
    Send {
        /// Protocol (rest, graphql, soap)
        #[arg(short, long, default_value = "rest")]
        protocol: String,

        /// Target URL
        #[arg(short, long)]
        url: String,

        /// HTTP method (REST only)
        #[arg(short, long)]
        method: Option<String>,

        /// Header in `Name: value` form, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Request body; parsed as JSON when possible
        #[arg(short, long)]
        body: Option<String>,

        /// Bearer token for the Authorization header
        #[arg(long)]
        bearer: Option<String>,
    },

    /// Authenticate through the active auth provider
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Load and validate the configuration
    CheckConfig,
}
