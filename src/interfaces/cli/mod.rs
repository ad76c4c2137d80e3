//! CLI interface module
//!
//! Dispatches parsed [`Commands`](crate::cli::Commands) to their handlers.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::services::ShortenerService;
use crate::storage::StorageFactory;
use crate::utils::UrlPolicy;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    NotFound(String),
    InvalidInput(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::NotFound(msg) => format!("Not found: {}", msg),
            CliError::InvalidInput(msg) => format!("Invalid input: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::NotFound(msg) => format!("{} {}", "Not found:".yellow().bold(), msg.white()),
            CliError::InvalidInput(msg) => {
                format!("{} {}", "Invalid input:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound(_) => 2,
            CliError::InvalidInput(_) => 3,
            CliError::StorageError(_) | CliError::CommandError(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::UrlShrinkError> for CliError {
    fn from(err: crate::errors::UrlShrinkError) -> Self {
        use crate::errors::UrlShrinkError as E;
        match err {
            E::NotFound(msg) => CliError::NotFound(msg),
            E::InvalidArgument(msg) => CliError::InvalidInput(msg),
            E::FileOperation(msg) | E::Serialization(msg) => CliError::CommandError(msg),
            other => CliError::StorageError(other.message().to_string()),
        }
    }
}

/// Run a CLI command against the configured storage backend
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    if !cmd.needs_storage() {
        return run_offline_command(cmd);
    }

    let store = StorageFactory::create(&config.database).await?;
    let service = ShortenerService::new(store).with_policy(UrlPolicy::from_strict_flag(
        config.shortener.strict_url_validation,
    ));

    run_with_service(cmd, &service, &config.shortener.base_url).await
}

/// Run a command with an already constructed service
pub async fn run_with_service(
    cmd: Commands,
    service: &ShortenerService,
    base_url: &str,
) -> Result<(), CliError> {
    match cmd {
        Commands::Shorten { url } => commands::shorten_url(service, &url, base_url).await,
        Commands::Resolve { code } => commands::resolve_code(service, &code).await,
        Commands::Info { code, json } => {
            commands::show_info(service, &code, base_url, json).await
        }
        other => run_offline_command(other),
    }
}

/// Commands that never touch storage
fn run_offline_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Encode { id } => commands::encode_id(id),
        Commands::Decode { code } => commands::decode_code(&code),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => commands::config_generate(output_path, force),
        other => Err(CliError::CommandError(format!(
            "command {:?} requires storage",
            other
        ))),
    }
}
