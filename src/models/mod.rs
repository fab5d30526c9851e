//! Data models for keys, layout tables and editable fields.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are independent of rendering and of the editing engine.

pub mod field;
pub mod key;
pub mod layout_table;

// Re-export all model types
pub use field::{EditableFieldState, FieldGroup, FieldId, FieldRef, InstanceId, MaxLength};
pub use key::{combining_mark_name, parse_key_token, KeyAction, KeySpec, COMBINING_MARKS};
pub use layout_table::{LayoutTable, Pad, COMBININGPAD, CONTROLPAD, MAINPAD, NUMPAD};
