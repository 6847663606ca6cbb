//! Core editor types and state management.
//!
//! This module contains the central `MapDocument` and supporting types
//! that form the foundation of the editor.

pub mod document;
mod history;
mod preferences;

pub use document::{EditorError, MapDocument};
pub use history::{Transaction, UndoHistory};
pub use preferences::{EditorPreferences, GRID_SIZE_ENV};
