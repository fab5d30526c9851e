//! MinKeyboard Library
//!
//! This library provides the engine of a virtual on-screen keyboard: key-set
//! resolution from patterns or explicit key lists, layout projection, cursor
//! aware text editing with Unicode composition, field-to-field navigation and
//! single-open visibility coordination across keyboards sharing a document.
//!
//! Rendering, animation and positioning are left to the host through the
//! traits in [`host`].

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod events;
pub mod focus;
pub mod host;
pub mod keyset;
pub mod models;
pub mod projector;
pub mod services;
pub mod visibility;

pub use error::ConfigError;
