//! Element creation and deletion commands.

use std::rc::Rc;

use log::debug;

use indoor_math::Vec2;
use indoor_model::{
    Floor, MapElement, Node, PointOfInterest, PointOfInterestType, Wall, Zone, ZoneType,
};

use super::Command;

/// Command to add a wall between two positions.
///
/// The wall and its two nodes are created once, so redoing re-adds the same
/// instances.
pub struct AddWallCommand {
    floor: Rc<Floor>,
    wall: Rc<Wall>,
}

impl AddWallCommand {
    pub fn new(floor: Rc<Floor>, start: Vec2, end: Vec2) -> Self {
        Self {
            floor,
            wall: Wall::new(start, end),
        }
    }

    pub fn wall(&self) -> &Rc<Wall> {
        &self.wall
    }
}

impl Command for AddWallCommand {
    fn description(&self) -> &str {
        "Add Wall"
    }

    fn redo(&mut self) {
        self.floor.add(&MapElement::Wall(Rc::clone(&self.wall)));
    }

    fn undo(&mut self) {
        self.floor.remove(&MapElement::Wall(Rc::clone(&self.wall)));
    }
}

/// Command to add a zone with fresh corner nodes.
pub struct AddZoneCommand {
    floor: Rc<Floor>,
    zone: Rc<Zone>,
}

impl AddZoneCommand {
    pub fn new(floor: Rc<Floor>, corners: &[Vec2], name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            floor,
            zone: Zone::new(corners, name, zone_type),
        }
    }

    pub fn zone(&self) -> &Rc<Zone> {
        &self.zone
    }
}

impl Command for AddZoneCommand {
    fn description(&self) -> &str {
        "Add Zone"
    }

    fn redo(&mut self) {
        self.floor.add(&MapElement::Zone(Rc::clone(&self.zone)));
    }

    fn undo(&mut self) {
        self.floor.remove(&MapElement::Zone(Rc::clone(&self.zone)));
    }
}

/// Command to add a point of interest.
pub struct AddPointOfInterestCommand {
    floor: Rc<Floor>,
    point: Rc<PointOfInterest>,
}

impl AddPointOfInterestCommand {
    pub fn new(
        floor: Rc<Floor>,
        position: Vec2,
        name: impl Into<String>,
        poi_type: PointOfInterestType,
    ) -> Self {
        Self {
            floor,
            point: PointOfInterest::new(position, name, poi_type),
        }
    }

    pub fn point_of_interest(&self) -> &Rc<PointOfInterest> {
        &self.point
    }
}

impl Command for AddPointOfInterestCommand {
    fn description(&self) -> &str {
        "Add Point of Interest"
    }

    fn redo(&mut self) {
        self.floor.add(&MapElement::PointOfInterest(Rc::clone(&self.point)));
    }

    fn undo(&mut self) {
        self.floor.remove(&MapElement::PointOfInterest(Rc::clone(&self.point)));
    }
}

/// Command to add a free-standing node.
pub struct AddNodeCommand {
    floor: Rc<Floor>,
    node: Rc<Node>,
}

impl AddNodeCommand {
    pub fn new(floor: Rc<Floor>, position: Vec2) -> Self {
        Self {
            floor,
            node: Node::new(position),
        }
    }

    pub fn node(&self) -> &Rc<Node> {
        &self.node
    }
}

impl Command for AddNodeCommand {
    fn description(&self) -> &str {
        "Add Node"
    }

    fn redo(&mut self) {
        self.floor.add(&MapElement::Node(Rc::clone(&self.node)));
    }

    fn undo(&mut self) {
        self.floor.remove(&MapElement::Node(Rc::clone(&self.node)));
    }
}

/// Command to delete a selection of elements.
///
/// Removal cascades, so deleting one corner takes its whole zone with it.
/// Everything the cascade will take off the floor is recorded when the
/// command is built, and undo puts all of it back.
pub struct DeleteElementsCommand {
    floor: Rc<Floor>,
    elements: Vec<MapElement>,
    affected: Vec<MapElement>,
}

impl DeleteElementsCommand {
    pub fn new(floor: Rc<Floor>, elements: Vec<MapElement>) -> Self {
        let mut affected = Vec::new();
        for element in &elements {
            collect_cascade(&floor, element, &mut affected);
        }
        Self {
            floor,
            elements,
            affected,
        }
    }

    /// Elements explicitly selected for deletion
    pub fn elements(&self) -> &[MapElement] {
        &self.elements
    }

    /// Every element the deletion removes, selection included
    pub fn affected(&self) -> &[MapElement] {
        &self.affected
    }
}

/// Walk the same edges the floor cascade follows, keeping elements that are
/// currently on `floor`.
fn collect_cascade(floor: &Floor, element: &MapElement, out: &mut Vec<MapElement>) {
    if out.contains(element) || !floor.contains(element) {
        return;
    }
    out.push(element.clone());
    for dependency in element.dependencies() {
        collect_cascade(floor, &dependency, out);
    }
    if let Some(owner) = element.owner() {
        collect_cascade(floor, &owner, out);
    }
}

impl Command for DeleteElementsCommand {
    fn description(&self) -> &str {
        "Delete Elements"
    }

    fn redo(&mut self) {
        for element in &self.elements {
            self.floor.remove(element);
        }
        debug!("deleted {} elements from '{}'", self.affected.len(), self.floor.name());
    }

    fn undo(&mut self) {
        for element in &self.affected {
            self.floor.add(element);
        }
    }
}
