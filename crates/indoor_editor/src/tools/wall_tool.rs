//! Two-click wall placement.

use indoor_math::Vec2;

use super::{Tool, ToolId, ToolResult};
use crate::core::MapDocument;

pub const WALL_TOOL_ID: ToolId = ToolId("wall");

/// First click fixes the start, second click adds the wall.
#[derive(Default)]
pub struct WallTool {
    start: Option<Vec2>,
    cursor: Option<Vec2>,
}

impl WallTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment to draw as preview, once a start point is placed
    pub fn preview(&self) -> Option<(Vec2, Vec2)> {
        let start = self.start?;
        Some((start, self.cursor.unwrap_or(start)))
    }
}

impl Tool for WallTool {
    fn id(&self) -> ToolId {
        WALL_TOOL_ID
    }

    fn name(&self) -> &str {
        "Add Wall"
    }

    fn on_click(&mut self, position: Vec2, document: &mut MapDocument) -> ToolResult {
        let position = document.snap(position);
        self.cursor = Some(position);

        let Some(start) = self.start else {
            self.start = Some(position);
            return ToolResult::Handled;
        };
        if start == position {
            log::warn!("Ignoring zero-length wall at {}", position);
            return ToolResult::Rejected;
        }

        document.add_wall(start, position);
        self.reset();
        ToolResult::Completed
    }

    fn on_move(&mut self, position: Vec2, document: &MapDocument) -> ToolResult {
        self.cursor = Some(document.snap(position));
        if self.start.is_some() {
            ToolResult::Handled
        } else {
            ToolResult::None
        }
    }

    fn reset(&mut self) {
        self.start = None;
        self.cursor = None;
    }
}
