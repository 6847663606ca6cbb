//! The open document: single source of truth for an editing session.
//!
//! All edits flow through `MapDocument`, which wraps them in commands so
//! they can be undone. Structural requests the model would accept but the
//! editor must not (deleting the last floor, a two-corner zone) are refused
//! here before any command is built.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{info, warn};
use thiserror::Error;

use indoor_event::Signal;
use indoor_math::{snap_to_grid, Vec2};
use indoor_model::{
    Building, Floor, MapElement, Node, PointOfInterest, PointOfInterestType, Wall, Zone, ZoneType,
};

use super::{EditorPreferences, UndoHistory};
use crate::commands::{
    AddFloorCommand, AddNodeCommand, AddPointOfInterestCommand, AddWallCommand,
    AddZoneCommand, AddZoneConnectionCommand, Command, DeleteElementsCommand,
    MoveElementsCommand, PointOfInterestAttributesCommand, RemoveFloorCommand,
    RemoveZoneConnectionCommand, RenameFloorCommand, ZoneAttributesCommand,
};
use crate::io::{BuildingSerializer, SerializeError};

/// Requests the editor refuses, and failures of document I/O.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("A building must keep at least one floor")]
    LastFloor,

    #[error("A zone needs at least 3 corners, got {0}")]
    TooFewCorners(usize),

    #[error("The floor is not part of this building")]
    NoSuchFloor,

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("Preferences error: {0}")]
    Preferences(String),
}

/// An open building plus everything needed to edit it.
pub struct MapDocument {
    building: Rc<Building>,
    current_floor: Rc<Floor>,
    history: UndoHistory,
    preferences: EditorPreferences,
    path: Option<PathBuf>,
    current_floor_changed: Signal<Rc<Floor>>,
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::new(EditorPreferences::default())
    }
}

impl MapDocument {
    /// A new document with a single empty floor.
    pub fn new(preferences: EditorPreferences) -> Self {
        Self::from_building(Building::new(), preferences)
    }

    /// Wrap an existing building. A building without floors gets one.
    pub fn from_building(building: Rc<Building>, preferences: EditorPreferences) -> Self {
        let current_floor = Self::first_floor(&building, &preferences);
        Self {
            building,
            current_floor,
            history: UndoHistory::with_capacity(preferences.history_limit),
            preferences,
            path: None,
            current_floor_changed: Signal::new(),
        }
    }

    fn first_floor(building: &Rc<Building>, preferences: &EditorPreferences) -> Rc<Floor> {
        match building.floor(0) {
            Some(floor) => floor,
            None => {
                let floor = Floor::new(preferences.default_floor_name.clone());
                building.add_floor(&floor);
                floor
            }
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn building(&self) -> &Rc<Building> {
        &self.building
    }

    pub fn current_floor(&self) -> Rc<Floor> {
        Rc::clone(&self.current_floor)
    }

    /// Raised when the floor being edited changes
    pub fn current_floor_changed(&self) -> &Signal<Rc<Floor>> {
        &self.current_floor_changed
    }

    pub fn set_current_floor(&mut self, floor: &Rc<Floor>) -> Result<(), EditorError> {
        if !self.building.contains_floor(floor) {
            return Err(EditorError::NoSuchFloor);
        }
        self.switch_floor(Rc::clone(floor));
        Ok(())
    }

    pub fn select_floor(&mut self, index: usize) -> Result<(), EditorError> {
        let floor = self.building.floor(index).ok_or(EditorError::NoSuchFloor)?;
        self.switch_floor(floor);
        Ok(())
    }

    fn switch_floor(&mut self, floor: Rc<Floor>) {
        if Rc::ptr_eq(&floor, &self.current_floor) {
            return;
        }
        self.current_floor = floor;
        self.current_floor_changed.emit(&self.current_floor);
    }

    /// Keep the current floor pointing at a floor of the building.
    fn sync_current_floor(&mut self, preferred_index: usize) {
        if self.building.contains_floor(&self.current_floor) {
            return;
        }
        let count = self.building.floor_count();
        if count == 0 {
            return;
        }
        if let Some(floor) = self.building.floor(preferred_index.min(count - 1)) {
            self.switch_floor(floor);
        }
    }

    pub fn preferences(&self) -> &EditorPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: EditorPreferences) {
        self.history.set_max_size(preferences.history_limit);
        self.preferences = preferences;
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut UndoHistory {
        &mut self.history
    }

    /// File the document was last opened from or saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether there are edits since the last save
    pub fn is_modified(&self) -> bool {
        self.history.is_dirty()
    }

    /// Snap a position with the configured grid
    pub fn snap(&self, point: Vec2) -> Vec2 {
        snap_to_grid(point, self.preferences.grid_size)
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    /// Execute a command and add it to history.
    pub fn execute(&mut self, cmd: Box<dyn Command>) {
        self.history.execute(cmd);
        self.sync_current_floor(0);
    }

    pub fn undo(&mut self) {
        self.history.undo();
        self.sync_current_floor(0);
    }

    pub fn redo(&mut self) {
        self.history.redo();
        self.sync_current_floor(0);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn add_node(&mut self, position: Vec2) -> Rc<Node> {
        let cmd = AddNodeCommand::new(self.current_floor(), position);
        let node = Rc::clone(cmd.node());
        self.execute(Box::new(cmd));
        node
    }

    pub fn add_wall(&mut self, start: Vec2, end: Vec2) -> Rc<Wall> {
        let cmd = AddWallCommand::new(self.current_floor(), start, end);
        let wall = Rc::clone(cmd.wall());
        self.execute(Box::new(cmd));
        wall
    }

    pub fn add_zone(
        &mut self,
        corners: &[Vec2],
        name: impl Into<String>,
        zone_type: ZoneType,
    ) -> Result<Rc<Zone>, EditorError> {
        if corners.len() < 3 {
            warn!("Refusing zone with {} corners", corners.len());
            return Err(EditorError::TooFewCorners(corners.len()));
        }
        let cmd = AddZoneCommand::new(self.current_floor(), corners, name, zone_type);
        let zone = Rc::clone(cmd.zone());
        self.execute(Box::new(cmd));
        Ok(zone)
    }

    pub fn add_point_of_interest(
        &mut self,
        position: Vec2,
        name: impl Into<String>,
        poi_type: PointOfInterestType,
    ) -> Rc<PointOfInterest> {
        let cmd = AddPointOfInterestCommand::new(self.current_floor(), position, name, poi_type);
        let point = Rc::clone(cmd.point_of_interest());
        self.execute(Box::new(cmd));
        point
    }

    /// Delete elements from the current floor
    pub fn delete_elements(&mut self, elements: Vec<MapElement>) {
        if elements.is_empty() {
            return;
        }
        self.execute(Box::new(DeleteElementsCommand::new(self.current_floor(), elements)));
    }

    pub fn move_elements(&mut self, elements: Vec<MapElement>, delta: Vec2) {
        if elements.is_empty() || delta == Vec2::ZERO {
            return;
        }
        self.execute(Box::new(MoveElementsCommand::new(elements, delta)));
    }

    pub fn set_zone_attributes(&mut self, zone: &Rc<Zone>, name: impl Into<String>, zone_type: ZoneType) {
        self.execute(Box::new(ZoneAttributesCommand::new(Rc::clone(zone), name, zone_type)));
    }

    pub fn set_point_of_interest_attributes(
        &mut self,
        point: &Rc<PointOfInterest>,
        name: impl Into<String>,
        poi_type: PointOfInterestType,
        description: impl Into<String>,
    ) {
        self.execute(Box::new(PointOfInterestAttributesCommand::new(
            Rc::clone(point),
            name,
            poi_type,
            description,
        )));
    }

    /// Append a floor; without a name it gets the default floor name.
    pub fn add_floor(&mut self, name: Option<String>) -> Rc<Floor> {
        let cmd = AddFloorCommand::new(Rc::clone(&self.building), name.map(Floor::new));
        let floor = Rc::clone(cmd.floor());
        self.execute(Box::new(cmd));
        floor
    }

    pub fn rename_floor(&mut self, floor: &Rc<Floor>, name: impl Into<String>) -> Result<(), EditorError> {
        if !self.building.contains_floor(floor) {
            return Err(EditorError::NoSuchFloor);
        }
        self.execute(Box::new(RenameFloorCommand::new(Rc::clone(floor), name)));
        Ok(())
    }

    /// Remove a floor. The last remaining floor cannot be removed.
    pub fn remove_floor(&mut self, floor: &Rc<Floor>) -> Result<(), EditorError> {
        let index = self.building.index_of(floor).ok_or(EditorError::NoSuchFloor)?;
        if self.building.floor_count() <= 1 {
            warn!("Refusing to remove the last floor '{}'", floor.name());
            return Err(EditorError::LastFloor);
        }
        self.history
            .execute(Box::new(RemoveFloorCommand::new(Rc::clone(&self.building), Rc::clone(floor))));
        self.sync_current_floor(index);
        Ok(())
    }

    /// Connect two distinct zones. Returns `false` if nothing changed.
    pub fn connect_zones(&mut self, zone_a: &Rc<Zone>, zone_b: &Rc<Zone>) -> bool {
        if Rc::ptr_eq(zone_a, zone_b) {
            warn!("Refusing to connect zone '{}' to itself", zone_a.name());
            return false;
        }
        if self.building.is_connected(zone_a, zone_b) {
            return false;
        }
        self.execute(Box::new(AddZoneConnectionCommand::new(
            Rc::clone(&self.building),
            Rc::clone(zone_a),
            Rc::clone(zone_b),
        )));
        true
    }

    /// Disconnect two zones. Returns `false` if they were not connected.
    pub fn disconnect_zones(&mut self, zone_a: &Rc<Zone>, zone_b: &Rc<Zone>) -> bool {
        if !self.building.is_connected(zone_a, zone_b) {
            return false;
        }
        self.execute(Box::new(RemoveZoneConnectionCommand::new(
            Rc::clone(&self.building),
            Rc::clone(zone_a),
            Rc::clone(zone_b),
        )));
        true
    }

    // ---------------------------------------------------------------------
    // Files
    // ---------------------------------------------------------------------

    /// Replace the document with the building stored at `path`.
    ///
    /// On failure the open document is left untouched.
    pub fn open(&mut self, path: &Path) -> Result<(), EditorError> {
        let building = BuildingSerializer::load(path).map_err(|e| {
            log::error!("Failed to open {:?}: {}", path, e);
            e
        })?;
        let floor = Self::first_floor(&building, &self.preferences);
        self.building = building;
        self.history.clear();
        self.path = Some(path.to_path_buf());
        self.current_floor = floor;
        self.current_floor_changed.emit(&self.current_floor);
        info!("Opened {:?}", path);
        Ok(())
    }

    /// Write the document to `path`. Only a successful write clears the
    /// modified flag and remembers the path.
    pub fn save(&mut self, path: &Path) -> Result<(), EditorError> {
        BuildingSerializer::save(&self.building, path).map_err(|e| {
            log::error!("Failed to save {:?}: {}", path, e);
            e
        })?;
        self.history.mark_saved();
        self.path = Some(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> MapDocument {
        MapDocument::new(EditorPreferences::default())
    }

    #[test]
    fn test_new_document_has_one_floor() {
        let doc = document();
        assert_eq!(doc.building().floor_count(), 1);
        assert_eq!(doc.current_floor().name(), "Unnamed Floor");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_last_floor_is_protected() {
        let mut doc = document();
        let only = doc.current_floor();
        assert!(matches!(doc.remove_floor(&only), Err(EditorError::LastFloor)));
        assert!(!doc.can_undo());

        let stray = Floor::new("Elsewhere");
        assert!(matches!(doc.remove_floor(&stray), Err(EditorError::NoSuchFloor)));
    }

    #[test]
    fn test_removing_current_floor_selects_neighbor() {
        let mut doc = document();
        let ground = doc.current_floor();
        let upper = doc.add_floor(Some("Upper".to_string()));
        doc.set_current_floor(&upper).unwrap();

        doc.remove_floor(&upper).unwrap();
        assert!(Rc::ptr_eq(&doc.current_floor(), &ground));

        doc.undo();
        assert_eq!(doc.building().floor_count(), 2);
        doc.select_floor(1).unwrap();
        assert!(Rc::ptr_eq(&doc.current_floor(), &upper));

        doc.undo();
        assert_eq!(doc.building().floor_count(), 1);
        assert!(Rc::ptr_eq(&doc.current_floor(), &ground));
    }

    #[test]
    fn test_zone_needs_three_corners() {
        let mut doc = document();
        let result = doc.add_zone(&[Vec2::ZERO, Vec2::new(10.0, 0.0)], "Sliver", ZoneType::Generic);
        assert!(matches!(result, Err(EditorError::TooFewCorners(2))));
        assert!(doc.current_floor().is_empty());
    }

    #[test]
    fn test_snap_uses_preferences() {
        let mut doc = document();
        assert_eq!(doc.snap(Vec2::new(70.0, 20.0)), Vec2::new(50.0, 0.0));
        doc.set_preferences(EditorPreferences {
            grid_size: 0.0,
            ..Default::default()
        });
        assert_eq!(doc.snap(Vec2::new(70.0, 20.0)), Vec2::new(70.0, 20.0));
    }

    #[test]
    fn test_connect_zones_guards() {
        let mut doc = document();
        let square = [Vec2::ZERO, Vec2::new(50.0, 0.0), Vec2::new(50.0, 50.0)];
        let a = doc.add_zone(&square, "A", ZoneType::Generic).unwrap();
        let b = doc.add_zone(&square, "B", ZoneType::Generic).unwrap();

        assert!(!doc.connect_zones(&a, &a));
        assert!(doc.connect_zones(&a, &b));
        assert!(!doc.connect_zones(&b, &a));
        assert!(doc.disconnect_zones(&b, &a));
        assert!(!doc.disconnect_zones(&a, &b));
        doc.undo();
        assert!(doc.building().is_connected(&a, &b));
    }

    #[test]
    fn test_failed_open_keeps_document() {
        let mut doc = document();
        doc.add_wall(Vec2::ZERO, Vec2::new(50.0, 0.0));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = doc.open(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
        assert_eq!(doc.current_floor().walls().len(), 1);
        assert!(doc.can_undo());
    }
}
