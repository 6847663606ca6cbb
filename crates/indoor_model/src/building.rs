//! Buildings: ordered floors plus the zone connection relation.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use indoor_core::ElementId;
use indoor_event::{Signal, SubscriberId};

use crate::{Floor, MapElement, Zone};

/// Raised when a zone connection is added or removed
#[derive(Clone, Debug)]
pub struct ConnectionEvent {
    pub zone_a: Rc<Zone>,
    pub zone_b: Rc<Zone>,
    pub connected: bool,
}

/// A multi-floor building.
///
/// Floors keep their display order. Zone connections are symmetric and
/// keyed by zone identifier; entries pointing at zones that are no longer on
/// any floor stay stored but are filtered out by every query.
pub struct Building {
    floors: RefCell<Vec<Rc<Floor>>>,
    connections: RefCell<HashMap<ElementId, Vec<Rc<Zone>>>>,
    name_forwarders: RefCell<HashMap<ElementId, SubscriberId>>,
    floor_added: Signal<Rc<Floor>>,
    floor_removed: Signal<Rc<Floor>>,
    floor_name_changed: Signal<Rc<Floor>>,
    connections_changed: Signal<ConnectionEvent>,
}

impl Building {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            floors: RefCell::default(),
            connections: RefCell::default(),
            name_forwarders: RefCell::default(),
            floor_added: Signal::new(),
            floor_removed: Signal::new(),
            floor_name_changed: Signal::new(),
            connections_changed: Signal::new(),
        })
    }

    #[inline]
    pub fn floor_added(&self) -> &Signal<Rc<Floor>> {
        &self.floor_added
    }

    #[inline]
    pub fn floor_removed(&self) -> &Signal<Rc<Floor>> {
        &self.floor_removed
    }

    #[inline]
    pub fn floor_name_changed(&self) -> &Signal<Rc<Floor>> {
        &self.floor_name_changed
    }

    #[inline]
    pub fn connections_changed(&self) -> &Signal<ConnectionEvent> {
        &self.connections_changed
    }

    // ---------------------------------------------------------------------
    // Floors
    // ---------------------------------------------------------------------

    /// Append a floor. Returns `false` if it is already part of the building.
    pub fn add_floor(self: &Rc<Self>, floor: &Rc<Floor>) -> bool {
        let end = self.floor_count();
        self.insert_floor(end, floor)
    }

    /// Insert a floor at `index` (clamped to the end of the list)
    pub fn insert_floor(self: &Rc<Self>, index: usize, floor: &Rc<Floor>) -> bool {
        if self.contains_floor(floor) {
            return false;
        }
        {
            let mut floors = self.floors.borrow_mut();
            let index = index.min(floors.len());
            floors.insert(index, Rc::clone(floor));
        }
        self.attach(floor);
        debug!("building: added floor '{}'", floor.name());
        self.floor_added.emit(floor);
        true
    }

    /// Remove a floor. Returns `false` if it is not part of the building.
    pub fn remove_floor(&self, floor: &Rc<Floor>) -> bool {
        match self.index_of(floor) {
            Some(index) => self.remove_floor_at(index).is_some(),
            None => false,
        }
    }

    pub fn remove_floor_at(&self, index: usize) -> Option<Rc<Floor>> {
        let floor = {
            let mut floors = self.floors.borrow_mut();
            if index >= floors.len() {
                return None;
            }
            floors.remove(index)
        };
        self.detach(&floor);
        debug!("building: removed floor '{}'", floor.name());
        self.floor_removed.emit(&floor);
        Some(floor)
    }

    /// Replace the floor list without raising per-floor events
    pub fn set_floors(self: &Rc<Self>, floors: Vec<Rc<Floor>>) {
        let previous = self.floors.replace(floors.clone());
        for floor in previous.iter().filter(|f| !floors.iter().any(|n| Rc::ptr_eq(n, f))) {
            self.detach(floor);
        }
        for floor in floors.iter().filter(|f| !previous.iter().any(|p| Rc::ptr_eq(p, f))) {
            self.attach(floor);
        }
        trace!("building: floor list replaced ({} floors)", floors.len());
    }

    /// Move the floor at `from` to position `to`, silently
    pub fn move_floor(&self, from: usize, to: usize) -> bool {
        let mut floors = self.floors.borrow_mut();
        if from >= floors.len() || to >= floors.len() {
            return false;
        }
        let floor = floors.remove(from);
        floors.insert(to, floor);
        true
    }

    fn attach(self: &Rc<Self>, floor: &Rc<Floor>) {
        floor.set_building(Some(self));
        let building = Rc::downgrade(self);
        let weak_floor = Rc::downgrade(floor);
        let id = floor.name_changed().subscribe(move |_: &String| {
            if let (Some(building), Some(floor)) = (building.upgrade(), weak_floor.upgrade()) {
                building.floor_name_changed.emit(&floor);
            }
        });
        if let Some(old) = self.name_forwarders.borrow_mut().insert(floor.id(), id) {
            floor.name_changed().unsubscribe(old);
        }
    }

    fn detach(&self, floor: &Rc<Floor>) {
        if let Some(id) = self.name_forwarders.borrow_mut().remove(&floor.id()) {
            floor.name_changed().unsubscribe(id);
        }
        floor.set_building(None);
    }

    pub fn floor(&self, index: usize) -> Option<Rc<Floor>> {
        self.floors.borrow().get(index).cloned()
    }

    pub fn floors(&self) -> Vec<Rc<Floor>> {
        self.floors.borrow().clone()
    }

    pub fn floor_count(&self) -> usize {
        self.floors.borrow().len()
    }

    pub fn index_of(&self, floor: &Rc<Floor>) -> Option<usize> {
        self.floors.borrow().iter().position(|f| Rc::ptr_eq(f, floor))
    }

    pub fn contains_floor(&self, floor: &Rc<Floor>) -> bool {
        self.index_of(floor).is_some()
    }

    /// Find an element on any floor by identifier
    pub fn find_element(&self, id: ElementId) -> Option<MapElement> {
        self.floors.borrow().iter().find_map(|floor| floor.element(id))
    }

    pub fn find_zone(&self, id: ElementId) -> Option<Rc<Zone>> {
        self.find_element(id).and_then(|e| e.as_zone().cloned())
    }

    // ---------------------------------------------------------------------
    // Zone connections
    // ---------------------------------------------------------------------

    /// Whether `zone` is in the zone partition of some floor
    pub fn contains_zone(&self, zone: &Rc<Zone>) -> bool {
        self.floors.borrow().iter().any(|floor| floor.contains_zone(zone))
    }

    /// Connect two zones in both directions
    pub fn add_connection(&self, zone_a: &Rc<Zone>, zone_b: &Rc<Zone>) -> bool {
        let inserted = {
            let mut connections = self.connections.borrow_mut();
            let forward = link(&mut connections, zone_a, zone_b);
            let backward = link(&mut connections, zone_b, zone_a);
            forward || backward
        };
        if inserted {
            debug!("building: connected zones {} and {}", zone_a.id(), zone_b.id());
            self.connections_changed.emit(&ConnectionEvent {
                zone_a: Rc::clone(zone_a),
                zone_b: Rc::clone(zone_b),
                connected: true,
            });
        }
        inserted
    }

    /// Disconnect two zones; a missing edge is a no-op
    pub fn remove_connection(&self, zone_a: &Rc<Zone>, zone_b: &Rc<Zone>) -> bool {
        let removed = {
            let mut connections = self.connections.borrow_mut();
            let forward = unlink(&mut connections, zone_a, zone_b);
            let backward = unlink(&mut connections, zone_b, zone_a);
            forward || backward
        };
        if removed {
            debug!("building: disconnected zones {} and {}", zone_a.id(), zone_b.id());
            self.connections_changed.emit(&ConnectionEvent {
                zone_a: Rc::clone(zone_a),
                zone_b: Rc::clone(zone_b),
                connected: false,
            });
        }
        removed
    }

    /// Neighbors of `zone` that are still on some floor
    pub fn connected_zones_of(&self, zone: &Rc<Zone>) -> Vec<Rc<Zone>> {
        let neighbors = match self.connections.borrow().get(&zone.id()) {
            Some(neighbors) => neighbors.clone(),
            None => return Vec::new(),
        };
        neighbors.into_iter().filter(|z| self.contains_zone(z)).collect()
    }

    pub fn is_connected(&self, zone_a: &Rc<Zone>, zone_b: &Rc<Zone>) -> bool {
        self.connected_zones_of(zone_a).iter().any(|z| Rc::ptr_eq(z, zone_b))
    }

    /// Every live connection once, in floor then zone order
    pub fn zone_connections(&self) -> Vec<(Rc<Zone>, Rc<Zone>)> {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for floor in self.floors() {
            for zone in floor.zones() {
                for neighbor in self.connected_zones_of(&zone) {
                    let key = if zone.id() <= neighbor.id() {
                        (zone.id(), neighbor.id())
                    } else {
                        (neighbor.id(), zone.id())
                    };
                    if seen.insert(key) {
                        pairs.push((Rc::clone(&zone), neighbor));
                    }
                }
            }
        }
        pairs
    }
}

fn link(connections: &mut HashMap<ElementId, Vec<Rc<Zone>>>, from: &Rc<Zone>, to: &Rc<Zone>) -> bool {
    let neighbors = connections.entry(from.id()).or_default();
    if neighbors.iter().any(|z| Rc::ptr_eq(z, to)) {
        return false;
    }
    neighbors.push(Rc::clone(to));
    true
}

fn unlink(connections: &mut HashMap<ElementId, Vec<Rc<Zone>>>, from: &Rc<Zone>, to: &Rc<Zone>) -> bool {
    let Some(neighbors) = connections.get_mut(&from.id()) else {
        return false;
    };
    let before = neighbors.len();
    neighbors.retain(|z| !Rc::ptr_eq(z, to));
    let removed = neighbors.len() != before;
    if neighbors.is_empty() {
        connections.remove(&from.id());
    }
    removed
}

impl fmt::Debug for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Building")
            .field("floors", &*self.floors.borrow())
            .field("connected_zones", &self.connections.borrow().len())
            .finish()
    }
}
