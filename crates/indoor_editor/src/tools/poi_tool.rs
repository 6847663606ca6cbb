//! One-click point of interest placement.

use indoor_math::Vec2;
use indoor_model::PointOfInterestType;

use super::{Tool, ToolId, ToolResult};
use crate::core::MapDocument;

pub const POI_TOOL_ID: ToolId = ToolId("point_of_interest");

pub struct PointOfInterestTool {
    cursor: Option<Vec2>,
    /// Name given to the next point
    pub poi_name: String,
    /// Type given to the next point
    pub poi_type: PointOfInterestType,
}

impl Default for PointOfInterestTool {
    fn default() -> Self {
        Self::new()
    }
}

impl PointOfInterestTool {
    pub fn new() -> Self {
        Self {
            cursor: None,
            poi_name: "New Place".to_string(),
            poi_type: PointOfInterestType::Generic,
        }
    }

    pub fn preview(&self) -> Option<Vec2> {
        self.cursor
    }
}

impl Tool for PointOfInterestTool {
    fn id(&self) -> ToolId {
        POI_TOOL_ID
    }

    fn name(&self) -> &str {
        "Add Place"
    }

    fn on_click(&mut self, position: Vec2, document: &mut MapDocument) -> ToolResult {
        let position = document.snap(position);
        document.add_point_of_interest(position, self.poi_name.clone(), self.poi_type);
        self.reset();
        ToolResult::Completed
    }

    fn on_move(&mut self, position: Vec2, document: &MapDocument) -> ToolResult {
        self.cursor = Some(document.snap(position));
        ToolResult::Handled
    }

    fn reset(&mut self) {
        self.cursor = None;
    }
}
