//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the structural control characters.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "MinKeyboard";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "minkeyboard";

/// Control character carried by the backspace key.
pub const BACKSPACE: char = '\u{8}';

/// Control character carried by the validate (enter) key.
pub const ENTER: char = '\n';

/// Keypad used when no catalog is configured.
pub const DEFAULT_KEYPAD: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890 -";

/// Identifier of the catalog selected when the configuration names none.
pub const DEFAULT_CATALOG_ID: &str = "latin";
