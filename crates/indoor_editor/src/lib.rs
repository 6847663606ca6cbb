//! Indoor Map Editor Core
//!
//! Everything an interactive floor-plan editor needs short of drawing pixels.
//!
//! ## Features
//!
//! - **Commands**: every structural or geometric edit is a reversible command
//! - **Undo/Redo**: linear history with transactions and a bounded size
//! - **Document**: building, current floor, history and preferences in one place
//! - **Tools**: click-driven wall, zone and point-of-interest placement
//! - **JSON Output**: stable identifiers that survive save and load
//!
//! ## Architecture
//!
//! ```text
//! Pointer input → Tool → Command → Floor / Building → change notifications
//! ```
//!
//! User interface code never mutates the model directly; it builds a command
//! and hands it to [`MapDocument::execute`].

pub mod core;
pub mod commands;
pub mod tools;
pub mod io;

pub use core::{EditorError, EditorPreferences, MapDocument, Transaction, UndoHistory};

pub use commands::Command;

pub use tools::{Tool, ToolId, ToolResult};

pub use io::{BuildingSerializer, SerializeError};

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name
pub const NAME: &str = "Indoor Map Editor";
