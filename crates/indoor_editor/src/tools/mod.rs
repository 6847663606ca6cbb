//! Drawing tools.
//!
//! Tools turn pointer input into commands. They hold only preview state,
//! which `reset` discards; a cancelled interaction never reaches the history.

mod tool;
mod wall_tool;
mod zone_tool;
mod poi_tool;

pub use tool::{Tool, ToolId, ToolRegistry, ToolResult};
pub use wall_tool::{WallTool, WALL_TOOL_ID};
pub use zone_tool::{ZoneTool, ZONE_TOOL_ID};
pub use poi_tool::{PointOfInterestTool, POI_TOOL_ID};
