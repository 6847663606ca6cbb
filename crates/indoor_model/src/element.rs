//! The closed set of placeable map elements.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indoor_core::ElementId;
use indoor_event::Signal;
use indoor_math::Vec2;

use crate::{Floor, Node, PointOfInterest, Wall, Zone};

/// State shared by every element kind: identity, floor back reference and
/// the change notification.
pub struct ElementBase {
    id: ElementId,
    floor: RefCell<Weak<Floor>>,
    changed: Signal<()>,
}

impl ElementBase {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            floor: RefCell::new(Weak::new()),
            changed: Signal::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Floor currently holding the element, if any
    pub fn floor(&self) -> Option<Rc<Floor>> {
        self.floor.borrow().upgrade()
    }

    pub(crate) fn set_floor(&self, floor: Option<&Rc<Floor>>) {
        *self.floor.borrow_mut() = floor.map(Rc::downgrade).unwrap_or_default();
    }

    /// Raised whenever geometry or attributes of the element change
    #[inline]
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    #[inline]
    pub(crate) fn notify(&self) {
        self.changed.emit(&());
    }
}

impl fmt::Debug for ElementBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementBase")
            .field("id", &self.id)
            .field("on_floor", &self.floor().is_some())
            .finish()
    }
}

/// Element kind, also the floor partition an element lives in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Wall,
    Zone,
    PointOfInterest,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Wall => "wall",
            ElementKind::Zone => "zone",
            ElementKind::PointOfInterest => "point of interest",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-owning link from a node to the wall or zone it is a corner of
#[derive(Clone, Debug)]
pub enum NodeOwner {
    Wall(Weak<Wall>),
    Zone(Weak<Zone>),
}

impl NodeOwner {
    pub fn upgrade(&self) -> Option<MapElement> {
        match self {
            NodeOwner::Wall(wall) => wall.upgrade().map(MapElement::Wall),
            NodeOwner::Zone(zone) => zone.upgrade().map(MapElement::Zone),
        }
    }
}

/// Shared handle to any placeable element.
///
/// Equality is identity: two handles are equal when they point at the same
/// element instance.
#[derive(Clone)]
pub enum MapElement {
    Node(Rc<Node>),
    Wall(Rc<Wall>),
    Zone(Rc<Zone>),
    PointOfInterest(Rc<PointOfInterest>),
}

impl MapElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            MapElement::Node(_) => ElementKind::Node,
            MapElement::Wall(_) => ElementKind::Wall,
            MapElement::Zone(_) => ElementKind::Zone,
            MapElement::PointOfInterest(_) => ElementKind::PointOfInterest,
        }
    }

    pub fn base(&self) -> &ElementBase {
        match self {
            MapElement::Node(node) => node.base(),
            MapElement::Wall(wall) => wall.base(),
            MapElement::Zone(zone) => zone.base(),
            MapElement::PointOfInterest(poi) => poi.base(),
        }
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        self.base().id()
    }

    #[inline]
    pub fn floor(&self) -> Option<Rc<Floor>> {
        self.base().floor()
    }

    #[inline]
    pub fn changed(&self) -> &Signal<()> {
        self.base().changed()
    }

    /// Elements that must be present whenever this element is
    pub fn dependencies(&self) -> Vec<MapElement> {
        match self {
            MapElement::Wall(wall) => wall.nodes().into_iter().map(MapElement::Node).collect(),
            MapElement::Zone(zone) => zone.corner_nodes().iter().cloned().map(MapElement::Node).collect(),
            MapElement::Node(_) | MapElement::PointOfInterest(_) => Vec::new(),
        }
    }

    /// The wall or zone this element is a corner of
    pub fn owner(&self) -> Option<MapElement> {
        match self {
            MapElement::Node(node) => node.owner(),
            _ => None,
        }
    }

    /// Independently positioned parts a drag-move acts on
    pub fn movables(&self) -> Vec<MapElement> {
        match self {
            MapElement::Node(_) | MapElement::PointOfInterest(_) => vec![self.clone()],
            _ => self.dependencies(),
        }
    }

    /// Representative position (node/POI position, wall midpoint, zone centroid)
    pub fn position(&self) -> Vec2 {
        match self {
            MapElement::Node(node) => node.position(),
            MapElement::Wall(wall) => wall.midpoint(),
            MapElement::Zone(zone) => zone.position(),
            MapElement::PointOfInterest(poi) => poi.position(),
        }
    }

    pub fn move_by(&self, delta: Vec2) {
        match self {
            MapElement::Node(node) => node.move_by(delta),
            MapElement::Wall(wall) => wall.move_by(delta),
            MapElement::Zone(zone) => zone.move_by(delta),
            MapElement::PointOfInterest(poi) => poi.move_by(delta),
        }
    }

    pub(crate) fn set_floor(&self, floor: Option<&Rc<Floor>>) {
        self.base().set_floor(floor);
    }

    pub fn as_node(&self) -> Option<&Rc<Node>> {
        match self {
            MapElement::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_wall(&self) -> Option<&Rc<Wall>> {
        match self {
            MapElement::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    pub fn as_zone(&self) -> Option<&Rc<Zone>> {
        match self {
            MapElement::Zone(zone) => Some(zone),
            _ => None,
        }
    }

    pub fn as_point_of_interest(&self) -> Option<&Rc<PointOfInterest>> {
        match self {
            MapElement::PointOfInterest(poi) => Some(poi),
            _ => None,
        }
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &MapElement) -> bool {
        match (self, other) {
            (MapElement::Node(a), MapElement::Node(b)) => Rc::ptr_eq(a, b),
            (MapElement::Wall(a), MapElement::Wall(b)) => Rc::ptr_eq(a, b),
            (MapElement::Zone(a), MapElement::Zone(b)) => Rc::ptr_eq(a, b),
            (MapElement::PointOfInterest(a), MapElement::PointOfInterest(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for MapElement {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for MapElement {}

impl fmt::Debug for MapElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapElement::{:?}({})", self.kind(), self.id())
    }
}

impl From<Rc<Node>> for MapElement {
    fn from(node: Rc<Node>) -> Self {
        MapElement::Node(node)
    }
}

impl From<Rc<Wall>> for MapElement {
    fn from(wall: Rc<Wall>) -> Self {
        MapElement::Wall(wall)
    }
}

impl From<Rc<Zone>> for MapElement {
    fn from(zone: Rc<Zone>) -> Self {
        MapElement::Zone(zone)
    }
}

impl From<Rc<PointOfInterest>> for MapElement {
    fn from(poi: Rc<PointOfInterest>) -> Self {
        MapElement::PointOfInterest(poi)
    }
}
