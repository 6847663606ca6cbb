//! Command pattern implementation for undo/redo support.
//!
//! All document modifications that should be undoable go through the
//! command system.

mod command;
mod element_commands;
mod transform_commands;
mod attribute_commands;
mod floor_commands;
mod connection_commands;

pub use command::{Command, NoopCommand};
pub use element_commands::{
    AddNodeCommand,
    AddPointOfInterestCommand,
    AddWallCommand,
    AddZoneCommand,
    DeleteElementsCommand,
};
pub use transform_commands::MoveElementsCommand;
pub use attribute_commands::{
    PointOfInterestAttributesCommand,
    RenameFloorCommand,
    ZoneAttributesCommand,
};
pub use floor_commands::{AddFloorCommand, RemoveFloorCommand};
pub use connection_commands::{AddZoneConnectionCommand, RemoveZoneConnectionCommand};
