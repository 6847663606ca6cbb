//! Polygonal zones.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use indoor_core::ElementId;
use indoor_event::Signal;
use indoor_math::Vec2;

use crate::element::{ElementBase, NodeOwner};
use crate::{Floor, Node};

/// What a zone represents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneType {
    #[default]
    Generic,
    Stairs,
    Elevator,
}

impl ZoneType {
    pub fn name(&self) -> &'static str {
        match self {
            ZoneType::Generic => "GENERIC",
            ZoneType::Stairs => "STAIRS",
            ZoneType::Elevator => "ELEVATOR",
        }
    }

    pub fn all() -> &'static [ZoneType] {
        &[ZoneType::Generic, ZoneType::Stairs, ZoneType::Elevator]
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZoneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneType::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown zone type: {}", s))
    }
}

/// A closed polygon over corner nodes it exclusively owns
pub struct Zone {
    base: ElementBase,
    corners: Vec<Rc<Node>>,
    name: RefCell<String>,
    zone_type: Cell<ZoneType>,
}

impl Zone {
    pub const DEFAULT_NAME: &'static str = "Zone";

    /// Create a zone with fresh corner nodes at `corners`
    pub fn new(corners: &[Vec2], name: impl Into<String>, zone_type: ZoneType) -> Rc<Self> {
        let nodes = corners.iter().map(|&p| Node::new(p)).collect();
        Self::from_nodes(ElementId::new(), nodes, name, zone_type)
    }

    /// Build a zone around existing nodes, which become owned by it
    pub fn from_nodes(
        id: ElementId,
        corners: Vec<Rc<Node>>,
        name: impl Into<String>,
        zone_type: ZoneType,
    ) -> Rc<Self> {
        let name = name.into();
        Rc::new_cyclic(|this| {
            for node in &corners {
                node.set_owner(NodeOwner::Zone(this.clone()));
            }
            Self {
                base: ElementBase::new(id),
                corners,
                name: RefCell::new(name),
                zone_type: Cell::new(zone_type),
            }
        })
    }

    #[inline]
    pub fn base(&self) -> &ElementBase {
        &self.base
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        self.base.id()
    }

    #[inline]
    pub fn floor(&self) -> Option<Rc<Floor>> {
        self.base.floor()
    }

    #[inline]
    pub fn changed(&self) -> &Signal<()> {
        self.base.changed()
    }

    #[inline]
    pub fn corner_nodes(&self) -> &[Rc<Node>] {
        &self.corners
    }

    pub fn corner_positions(&self) -> Vec<Vec2> {
        self.corners.iter().map(|n| n.position()).collect()
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.borrow_mut() = name.into();
        self.base.notify();
    }

    #[inline]
    pub fn zone_type(&self) -> ZoneType {
        self.zone_type.get()
    }

    pub fn set_zone_type(&self, zone_type: ZoneType) {
        self.zone_type.set(zone_type);
        self.base.notify();
    }

    /// Centroid of the corners
    pub fn position(&self) -> Vec2 {
        Vec2::centroid(self.corners.iter().map(|n| n.position())).unwrap_or_default()
    }

    /// Move the whole zone so its centroid lands on `position`
    pub fn set_position(&self, position: Vec2) {
        self.move_by(position - self.position());
    }

    /// Translate every corner, raising the zone notification once
    pub fn move_by(&self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        for node in &self.corners {
            node.shift(delta);
        }
        self.base.notify();
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zone")
            .field("id", &self.id())
            .field("name", &*self.name.borrow())
            .field("type", &self.zone_type())
            .field("corners", &self.corners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Rc<Zone> {
        Zone::new(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(0.0, 100.0),
            ],
            "Lobby",
            ZoneType::Generic,
        )
    }

    fn counter(zone: &Zone) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        zone.changed().subscribe(move |_| c.set(c.get() + 1));
        count
    }

    #[test]
    fn test_corners_point_back_at_zone() {
        let zone = square();
        for node in zone.corner_nodes() {
            let owner = node.owner().expect("corner has an owner");
            assert!(Rc::ptr_eq(owner.as_zone().unwrap(), &zone));
        }
    }

    #[test]
    fn test_centroid_position() {
        let zone = square();
        assert_eq!(zone.position(), Vec2::new(50.0, 50.0));
        zone.set_position(Vec2::new(60.0, 40.0));
        assert_eq!(zone.corner_nodes()[0].position(), Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_move_by_is_one_notification() {
        let zone = square();
        let count = counter(&zone);
        zone.move_by(Vec2::new(5.0, 5.0));
        assert_eq!(count.get(), 1);
        zone.move_by(Vec2::new(-5.0, -5.0));
        assert_eq!(zone.corner_positions()[2], Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_corner_drag_and_attributes_notify() {
        let zone = square();
        let count = counter(&zone);
        zone.corner_nodes()[1].set_position(Vec2::new(120.0, 0.0));
        zone.set_name("Atrium");
        zone.set_zone_type(ZoneType::Stairs);
        assert_eq!(count.get(), 3);
        assert_eq!(zone.name(), "Atrium");
        assert_eq!(zone.zone_type(), ZoneType::Stairs);
    }

    #[test]
    fn test_zone_type_names() {
        assert_eq!("elevator".parse::<ZoneType>(), Ok(ZoneType::Elevator));
        assert!("lift".parse::<ZoneType>().is_err());
        assert_eq!(serde_json::to_string(&ZoneType::Stairs).unwrap(), "\"STAIRS\"");
    }
}
