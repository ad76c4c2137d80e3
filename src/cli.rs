//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// urlshrink - base-62 URL shortener
#[derive(Parser, Debug)]
#[command(name = "urlshrink")]
#[command(version)]
#[command(about = "Shorten URLs to base-62 codes and resolve them back", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Store a URL and print its short code
    Shorten {
        /// URL to shorten
        url: String,
    },

    /// Print the URL behind a short code (counts as a visit)
    Resolve {
        /// Short code
        code: String,
    },

    /// Show the stored record for a short code (does not count a visit)
    Info {
        /// Short code
        code: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode a positive storage key as a short code
    Encode {
        /// Storage key
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Decode a short code into its storage key
    Decode {
        /// Short code
        code: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Whether the command needs a storage backend.
    pub fn needs_storage(&self) -> bool {
        matches!(
            self,
            Commands::Shorten { .. } | Commands::Resolve { .. } | Commands::Info { .. }
        )
    }
}
