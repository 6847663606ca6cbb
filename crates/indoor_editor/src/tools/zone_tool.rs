//! Corner-by-corner zone placement.

use indoor_math::{check_corner, CornerCheck, Vec2};
use indoor_model::ZoneType;

use super::{Tool, ToolId, ToolResult};
use crate::core::MapDocument;

pub const ZONE_TOOL_ID: ToolId = ToolId("zone");

/// Collects corners until the outline is closed on its first corner.
///
/// Every candidate corner is validated with the document's polygon check;
/// a corner that would make the outline cross itself is refused and the
/// crossing point is kept for the preview.
pub struct ZoneTool {
    corners: Vec<Vec2>,
    cursor: Option<Vec2>,
    check: CornerCheck,
    /// Name given to the next zone
    pub zone_name: String,
    /// Type given to the next zone
    pub zone_type: ZoneType,
}

impl Default for ZoneTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneTool {
    pub fn new() -> Self {
        Self {
            corners: Vec::new(),
            cursor: None,
            check: CornerCheck::Accept,
            zone_name: "New Zone".to_string(),
            zone_type: ZoneType::Generic,
        }
    }

    /// Corners placed so far
    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Whether the corner under the cursor would be accepted
    pub fn is_preview_valid(&self) -> bool {
        self.check.is_valid()
    }

    /// Where the outline through the cursor would cross itself
    pub fn intersection(&self) -> Option<Vec2> {
        match self.check {
            CornerCheck::Reject(point) => Some(point),
            _ => None,
        }
    }

    fn validate(&mut self, candidate: Vec2, document: &MapDocument) -> CornerCheck {
        self.cursor = Some(candidate);
        self.check = check_corner(&self.corners, candidate, document.preferences().polygon_check);
        self.check
    }
}

impl Tool for ZoneTool {
    fn id(&self) -> ToolId {
        ZONE_TOOL_ID
    }

    fn name(&self) -> &str {
        "Add Zone"
    }

    fn on_click(&mut self, position: Vec2, document: &mut MapDocument) -> ToolResult {
        let position = document.snap(position);
        match self.validate(position, document) {
            CornerCheck::Accept => {
                self.corners.push(position);
                ToolResult::Handled
            }
            CornerCheck::Close => {
                match document.add_zone(&self.corners, self.zone_name.clone(), self.zone_type) {
                    Ok(_) => {
                        self.reset();
                        ToolResult::Completed
                    }
                    Err(e) => {
                        log::warn!("Cannot close zone: {}", e);
                        ToolResult::Rejected
                    }
                }
            }
            CornerCheck::Reject(point) => {
                log::debug!("Corner {} rejected, outline crosses at {}", position, point);
                ToolResult::Rejected
            }
        }
    }

    fn on_move(&mut self, position: Vec2, document: &MapDocument) -> ToolResult {
        let position = document.snap(position);
        self.validate(position, document);
        if self.corners.is_empty() {
            ToolResult::None
        } else {
            ToolResult::Handled
        }
    }

    fn reset(&mut self) {
        self.corners.clear();
        self.cursor = None;
        self.check = CornerCheck::Accept;
    }
}
