//! Floors: type-partitioned element containers with add/remove cascades.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::trace;

use indoor_core::ElementId;
use indoor_event::Signal;

use crate::{Building, MapElement, Node, PointOfInterest, Wall, Zone};

/// Name given to floors created without one
pub const DEFAULT_FLOOR_NAME: &str = "Unnamed Floor";

/// A named level of a building.
///
/// Elements live in one of four partitions matching their kind. Adding an
/// element also adds everything it depends on and the wall or zone that owns
/// it; removing cascades the same way. Both operations are no-ops for
/// elements already present (or absent), so overlapping cascades are safe.
pub struct Floor {
    id: ElementId,
    name: RefCell<String>,
    building: RefCell<Weak<Building>>,
    nodes: RefCell<Vec<Rc<Node>>>,
    walls: RefCell<Vec<Rc<Wall>>>,
    zones: RefCell<Vec<Rc<Zone>>>,
    points_of_interest: RefCell<Vec<Rc<PointOfInterest>>>,
    item_added: Signal<MapElement>,
    item_removed: Signal<MapElement>,
    name_changed: Signal<String>,
}

impl Floor {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Self::with_id(ElementId::new(), name)
    }

    pub fn with_id(id: ElementId, name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            id,
            name: RefCell::new(name.into()),
            building: RefCell::new(Weak::new()),
            nodes: RefCell::default(),
            walls: RefCell::default(),
            zones: RefCell::default(),
            points_of_interest: RefCell::default(),
            item_added: Signal::new(),
            item_removed: Signal::new(),
            name_changed: Signal::new(),
        })
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Rename the floor; always raises `name_changed`
    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        *self.name.borrow_mut() = name.clone();
        self.name_changed.emit(&name);
    }

    /// Building currently holding this floor
    pub fn building(&self) -> Option<Rc<Building>> {
        self.building.borrow().upgrade()
    }

    pub(crate) fn set_building(&self, building: Option<&Rc<Building>>) {
        *self.building.borrow_mut() = building.map(Rc::downgrade).unwrap_or_default();
    }

    #[inline]
    pub fn item_added(&self) -> &Signal<MapElement> {
        &self.item_added
    }

    #[inline]
    pub fn item_removed(&self) -> &Signal<MapElement> {
        &self.item_removed
    }

    #[inline]
    pub fn name_changed(&self) -> &Signal<String> {
        &self.name_changed
    }

    /// Add `element` with its dependencies and owner.
    ///
    /// An element held by another floor is taken off that floor first.
    /// Returns `false` when the element was already here.
    pub fn add(self: &Rc<Self>, element: &MapElement) -> bool {
        if self.contains(element) {
            return false;
        }
        if let Some(other) = element.floor() {
            if !Rc::ptr_eq(&other, self) {
                other.remove(element);
            }
        }

        self.insert(element);
        element.set_floor(Some(self));
        trace!("floor '{}': added {} {}", self.name(), element.kind(), element.id());

        for dependency in element.dependencies() {
            self.add(&dependency);
        }
        if let Some(owner) = element.owner() {
            self.add(&owner);
        }

        self.item_added.emit(element);
        true
    }

    /// Remove `element` with its dependencies and owner.
    ///
    /// Returns `false` when the element was not on this floor.
    pub fn remove(&self, element: &MapElement) -> bool {
        if !self.take(element) {
            return false;
        }
        element.set_floor(None);
        trace!("floor '{}': removed {} {}", self.name(), element.kind(), element.id());

        for dependency in element.dependencies() {
            self.remove(&dependency);
        }
        if let Some(owner) = element.owner() {
            self.remove(&owner);
        }

        self.item_removed.emit(element);
        true
    }

    fn insert(&self, element: &MapElement) {
        match element {
            MapElement::Node(node) => self.nodes.borrow_mut().push(Rc::clone(node)),
            MapElement::Wall(wall) => self.walls.borrow_mut().push(Rc::clone(wall)),
            MapElement::Zone(zone) => self.zones.borrow_mut().push(Rc::clone(zone)),
            MapElement::PointOfInterest(poi) => {
                self.points_of_interest.borrow_mut().push(Rc::clone(poi))
            }
        }
    }

    fn take(&self, element: &MapElement) -> bool {
        fn take_from<T>(list: &RefCell<Vec<Rc<T>>>, item: &Rc<T>) -> bool {
            let mut list = list.borrow_mut();
            match list.iter().position(|x| Rc::ptr_eq(x, item)) {
                Some(index) => {
                    list.remove(index);
                    true
                }
                None => false,
            }
        }

        match element {
            MapElement::Node(node) => take_from(&self.nodes, node),
            MapElement::Wall(wall) => take_from(&self.walls, wall),
            MapElement::Zone(zone) => take_from(&self.zones, zone),
            MapElement::PointOfInterest(poi) => take_from(&self.points_of_interest, poi),
        }
    }

    /// Whether `element` sits in its partition on this floor
    pub fn contains(&self, element: &MapElement) -> bool {
        match element {
            MapElement::Node(node) => self.nodes.borrow().iter().any(|n| Rc::ptr_eq(n, node)),
            MapElement::Wall(wall) => self.walls.borrow().iter().any(|w| Rc::ptr_eq(w, wall)),
            MapElement::Zone(zone) => self.contains_zone(zone),
            MapElement::PointOfInterest(poi) => {
                self.points_of_interest.borrow().iter().any(|p| Rc::ptr_eq(p, poi))
            }
        }
    }

    pub fn contains_zone(&self, zone: &Rc<Zone>) -> bool {
        self.zones.borrow().iter().any(|z| Rc::ptr_eq(z, zone))
    }

    /// All elements: nodes, walls, zones, then points of interest, each in
    /// insertion order
    pub fn elements(&self) -> Vec<MapElement> {
        let mut elements = Vec::with_capacity(self.len());
        elements.extend(self.nodes.borrow().iter().cloned().map(MapElement::Node));
        elements.extend(self.walls.borrow().iter().cloned().map(MapElement::Wall));
        elements.extend(self.zones.borrow().iter().cloned().map(MapElement::Zone));
        elements.extend(
            self.points_of_interest
                .borrow()
                .iter()
                .cloned()
                .map(MapElement::PointOfInterest),
        );
        elements
    }

    /// Look up an element on this floor by identifier
    pub fn element(&self, id: ElementId) -> Option<MapElement> {
        self.elements().into_iter().find(|e| e.id() == id)
    }

    pub fn nodes(&self) -> Vec<Rc<Node>> {
        self.nodes.borrow().clone()
    }

    pub fn walls(&self) -> Vec<Rc<Wall>> {
        self.walls.borrow().clone()
    }

    pub fn zones(&self) -> Vec<Rc<Zone>> {
        self.zones.borrow().clone()
    }

    pub fn points_of_interest(&self) -> Vec<Rc<PointOfInterest>> {
        self.points_of_interest.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
            + self.walls.borrow().len()
            + self.zones.borrow().len()
            + self.points_of_interest.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Floor")
            .field("id", &self.id)
            .field("name", &*self.name.borrow())
            .field("nodes", &self.nodes.borrow().len())
            .field("walls", &self.walls.borrow().len())
            .field("zones", &self.zones.borrow().len())
            .field("points_of_interest", &self.points_of_interest.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementKind, PointOfInterestType, Vec2, ZoneType};

    fn triangle() -> Rc<Zone> {
        Zone::new(
            &[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
            "Room",
            ZoneType::Generic,
        )
    }

    fn recorder(signal: &Signal<MapElement>) -> Rc<RefCell<Vec<MapElement>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        signal.subscribe(move |e: &MapElement| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn test_add_zone_brings_corners() {
        let floor = Floor::new("Ground");
        let zone = triangle();
        assert!(floor.add(&zone.clone().into()));

        assert_eq!(floor.nodes().len(), 3);
        assert_eq!(floor.zones().len(), 1);
        for node in zone.corner_nodes() {
            assert!(Rc::ptr_eq(&node.floor().unwrap(), &floor));
        }
        assert!(!floor.add(&zone.into()));
        assert_eq!(floor.len(), 4);
    }

    #[test]
    fn test_added_events_follow_cascade_order() {
        let floor = Floor::new("Ground");
        let added = recorder(floor.item_added());
        let wall = Wall::new(Vec2::ZERO, Vec2::new(5.0, 0.0));
        floor.add(&wall.clone().into());

        let added = added.borrow();
        assert_eq!(added.len(), 3);
        assert_eq!(added[0], MapElement::Node(wall.start_node().clone()));
        assert_eq!(added[1], MapElement::Node(wall.end_node().clone()));
        assert_eq!(added[2], MapElement::Wall(wall));
    }

    #[test]
    fn test_readding_corner_pulls_in_zone() {
        let floor = Floor::new("Ground");
        let zone = triangle();
        let corner = MapElement::Node(zone.corner_nodes()[1].clone());
        floor.add(&corner);
        assert!(floor.contains_zone(&zone));
        assert_eq!(floor.nodes().len(), 3);
    }

    #[test]
    fn test_remove_corner_removes_whole_zone() {
        let floor = Floor::new("Ground");
        let zone = triangle();
        floor.add(&zone.clone().into());
        let removed = recorder(floor.item_removed());

        assert!(floor.remove(&MapElement::Node(zone.corner_nodes()[0].clone())));
        assert!(floor.is_empty());
        assert_eq!(removed.borrow().len(), 4);
        assert!(zone.floor().is_none());
        assert!(!floor.remove(&zone.into()));
    }

    #[test]
    fn test_elements_order_and_lookup() {
        let floor = Floor::new("Ground");
        let poi = PointOfInterest::new(Vec2::new(1.0, 1.0), "Cafe", PointOfInterestType::Restaurant);
        floor.add(&poi.clone().into());
        let wall = Wall::new(Vec2::ZERO, Vec2::new(1.0, 0.0));
        floor.add(&wall.clone().into());

        let kinds: Vec<_> = floor.elements().iter().map(MapElement::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Node,
                ElementKind::Node,
                ElementKind::Wall,
                ElementKind::PointOfInterest
            ]
        );
        assert_eq!(floor.element(poi.id()), Some(MapElement::PointOfInterest(poi)));
        assert_eq!(floor.element(ElementId::new()), None);
    }

    #[test]
    fn test_add_moves_element_between_floors() {
        let first = Floor::new("First");
        let second = Floor::new("Second");
        let wall: MapElement = Wall::new(Vec2::ZERO, Vec2::new(1.0, 1.0)).into();
        first.add(&wall);
        second.add(&wall);
        assert!(first.is_empty());
        assert_eq!(second.len(), 3);
        assert!(Rc::ptr_eq(&wall.floor().unwrap(), &second));
    }

    #[test]
    fn test_rename_notifies() {
        let floor = Floor::new(DEFAULT_FLOOR_NAME);
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        floor.name_changed().subscribe(move |name: &String| *sink.borrow_mut() = name.clone());
        floor.set_name("Basement");
        assert_eq!(floor.name(), "Basement");
        assert_eq!(*seen.borrow(), "Basement");
    }
}
