//! Configuration errors surfaced when a keyboard is built or reconfigured.
//!
//! Per-keystroke edge cases (refused inserts, backspace at the start of the
//! buffer, vetoed notifications) are ordinary outcomes and never appear here.

/// A keyboard configuration that cannot be turned into a key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A bracket group of the pattern is not a valid character class
    InvalidPattern {
        /// The offending bracket group
        pattern: String,
        /// Regex compiler message
        message: String,
    },
    /// A catalog lists the same character twice
    DuplicateCatalogKey(char),
    /// No catalog with this identifier exists
    UnknownCatalog(String),
    /// An explicit key entry is not exactly one character
    InvalidKey(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, message } => {
                write!(f, "Invalid key pattern '{pattern}': {message}")
            }
            Self::DuplicateCatalogKey(c) => {
                write!(f, "Key catalog contains {:?} more than once", c)
            }
            Self::UnknownCatalog(id) => write!(f, "Unknown key catalog '{id}'"),
            Self::InvalidKey(key) => {
                write!(f, "Explicit key {:?} must be a single character", key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
