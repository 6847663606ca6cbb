//! Tool trait and registry.

use std::collections::HashMap;

use indoor_math::Vec2;

use crate::core::MapDocument;

/// Unique identifier for a tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ToolId(pub &'static str);

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of tool operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToolResult {
    /// No action taken
    None,
    /// Tool took the input and is waiting for more
    Handled,
    /// Tool executed a command
    Completed,
    /// The input was refused; preview state shows why
    Rejected,
}

/// A pointer-driven drawing tool.
///
/// Positions arrive in document coordinates. Tools snap them with the
/// document's grid and only touch the document through its command API.
pub trait Tool {
    /// Unique identifier for this tool.
    fn id(&self) -> ToolId;

    /// Display name.
    fn name(&self) -> &str;

    /// Handle a click.
    fn on_click(&mut self, position: Vec2, document: &mut MapDocument) -> ToolResult;

    /// Handle pointer movement (preview only).
    fn on_move(&mut self, _position: Vec2, _document: &MapDocument) -> ToolResult {
        ToolResult::None
    }

    /// Discard any in-progress interaction without touching the document.
    fn reset(&mut self);
}

/// Registry for managing tools.
pub struct ToolRegistry {
    tools: HashMap<ToolId, Box<dyn Tool>>,
    active_tool: Option<ToolId>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            active_tool: None,
        }
    }

    /// Registry holding the wall, zone and point-of-interest tools.
    pub fn with_default_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(super::WallTool::new()));
        registry.register(Box::new(super::ZoneTool::new()));
        registry.register(Box::new(super::PointOfInterestTool::new()));
        registry
    }

    /// Register a tool. The first registered tool becomes active.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let id = tool.id();
        if self.active_tool.is_none() {
            self.active_tool = Some(id);
        }
        self.tools.insert(id, tool);
    }

    /// Get the active tool ID.
    pub fn active_id(&self) -> Option<ToolId> {
        self.active_tool
    }

    /// Get the active tool mutably.
    pub fn active_mut(&mut self) -> Option<&mut Box<dyn Tool>> {
        let id = self.active_tool?;
        self.tools.get_mut(&id)
    }

    /// Switch to a tool by ID, resetting the one being left.
    pub fn switch_to(&mut self, id: ToolId) -> bool {
        if !self.tools.contains_key(&id) {
            return false;
        }
        if let Some(current) = self.active_mut() {
            current.reset();
        }
        self.active_tool = Some(id);
        true
    }

    /// Get a tool by ID.
    pub fn get(&self, id: ToolId) -> Option<&dyn Tool> {
        self.tools.get(&id).map(|t| t.as_ref())
    }

    /// Forward a click to the active tool.
    pub fn click(&mut self, position: Vec2, document: &mut MapDocument) -> ToolResult {
        match self.active_mut() {
            Some(tool) => tool.on_click(position, document),
            None => ToolResult::None,
        }
    }

    /// Forward pointer movement to the active tool.
    pub fn pointer_moved(&mut self, position: Vec2, document: &MapDocument) -> ToolResult {
        match self.active_mut() {
            Some(tool) => tool.on_move(position, document),
            None => ToolResult::None,
        }
    }
}
