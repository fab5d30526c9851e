//! Shared CLI plumbing: error type, exit codes and keyboard source arguments.

use std::fmt;
use std::path::PathBuf;

use clap::Args;

use crate::catalog::CatalogDb;
use crate::config::{Config, KeyList, KeyboardConfig};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or configuration
    Validation = 1,
    /// File, parse or usage failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Invalid input or configuration
    Validation,
    /// I/O or data loading failure
    Io,
}

/// A failed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category
    pub kind: CliErrorKind,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input or configuration.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// I/O or data loading failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code for this failure.
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::Validation,
            CliErrorKind::Io => ExitCode::Io,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Where a command takes its keyboard configuration from.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Character-class pattern (e.g., "[A-F][0-9]")
    #[arg(short, long, value_name = "PATTERN", conflicts_with = "keys")]
    pub pattern: Option<String>,

    /// Explicit keys, one per character
    #[arg(short, long, value_name = "KEYS")]
    pub keys: Option<String>,

    /// Key catalog identifier
    #[arg(short, long, value_name = "ID")]
    pub catalog: Option<String>,

    /// Configuration file (defaults to the platform config file)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SourceArgs {
    /// Builds the keyboard configuration: config file first, flags on top.
    pub fn keyboard_config(&self) -> CliResult<KeyboardConfig> {
        let config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        let mut keyboard = config.keyboard;
        if let Some(pattern) = &self.pattern {
            keyboard.pattern = Some(pattern.clone());
            keyboard.keys = None;
        }
        if let Some(keys) = &self.keys {
            keyboard.keys = Some(KeyList::Text(keys.clone()));
        }
        if let Some(catalog) = &self.catalog {
            keyboard.catalog.clone_from(catalog);
        }
        Ok(keyboard)
    }
}

/// Loads the embedded catalog database.
pub fn load_catalogs() -> CliResult<CatalogDb> {
    CatalogDb::load().map_err(|e| CliError::io(format!("Failed to load key catalogs: {e:#}")))
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
