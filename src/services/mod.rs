//! Service layer.
//!
//! This module binds the pure engine pieces (resolver, projector, editor,
//! focus chain, visibility) to keyboards attached to host fields.

pub mod document;
pub mod keyboard;

// Re-export commonly used types and functions
pub use document::{Document, PressOutcome};
pub use keyboard::{materialize, KeyboardInstance};
