//! CLI command handlers for MinKeyboard.
//!
//! This module provides headless, scriptable access to the keyboard engine
//! for automation, testing, and inspection of keyboard configurations.

pub mod common;
pub mod edit;
pub mod keys;
pub mod layout;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use edit::EditArgs;
pub use keys::KeysArgs;
pub use layout::LayoutArgs;
