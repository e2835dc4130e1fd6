use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Yield calculator for a staked Uniswap-V2 LP position on a MasterChef farm.
#[derive(Parser)]
#[command(name = "fast-apr", version, about)]
pub struct Cli {
    /// Path to the JSON config file (defaults are used when omitted)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the landing page and the /fast_apr endpoint
    Serve {
        /// Bind address (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compute the yield once and print it
    Compute {
        /// Print the raw JSON result instead of the report
        #[arg(long)]
        json: bool,
    },

    /// Output the JSON schema of the /fast_apr response
    Schema,
}
