//! Labeled points of interest.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use indoor_core::ElementId;
use indoor_event::Signal;
use indoor_math::Vec2;

use crate::element::ElementBase;
use crate::Floor;

/// Category of a point of interest
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointOfInterestType {
    #[default]
    Generic,
    Restaurant,
    Shop,
    Toilet,
    Exit,
}

impl PointOfInterestType {
    pub fn name(&self) -> &'static str {
        match self {
            PointOfInterestType::Generic => "GENERIC",
            PointOfInterestType::Restaurant => "RESTAURANT",
            PointOfInterestType::Shop => "SHOP",
            PointOfInterestType::Toilet => "TOILET",
            PointOfInterestType::Exit => "EXIT",
        }
    }

    pub fn all() -> &'static [PointOfInterestType] {
        &[
            PointOfInterestType::Generic,
            PointOfInterestType::Restaurant,
            PointOfInterestType::Shop,
            PointOfInterestType::Toilet,
            PointOfInterestType::Exit,
        ]
    }
}

impl fmt::Display for PointOfInterestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PointOfInterestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PointOfInterestType::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown point of interest type: {}", s))
    }
}

/// A named, typed point on a floor
pub struct PointOfInterest {
    base: ElementBase,
    position: Cell<Vec2>,
    name: RefCell<String>,
    poi_type: Cell<PointOfInterestType>,
    description: RefCell<String>,
}

impl PointOfInterest {
    pub const DEFAULT_NAME: &'static str = "Point of Interest";

    pub fn new(position: Vec2, name: impl Into<String>, poi_type: PointOfInterestType) -> Rc<Self> {
        Self::with_id(ElementId::new(), position, name, poi_type)
    }

    pub fn with_id(
        id: ElementId,
        position: Vec2,
        name: impl Into<String>,
        poi_type: PointOfInterestType,
    ) -> Rc<Self> {
        Rc::new(Self {
            base: ElementBase::new(id),
            position: Cell::new(position),
            name: RefCell::new(name.into()),
            poi_type: Cell::new(poi_type),
            description: RefCell::new(String::new()),
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
    pub fn position(&self) -> Vec2 {
        self.position.get()
    }

    pub fn set_position(&self, position: Vec2) {
        if self.position.get() == position {
            return;
        }
        self.position.set(position);
        self.base.notify();
    }

    pub fn move_by(&self, delta: Vec2) {
        self.set_position(self.position() + delta);
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.borrow_mut() = name.into();
        self.base.notify();
    }

    #[inline]
    pub fn poi_type(&self) -> PointOfInterestType {
        self.poi_type.get()
    }

    pub fn set_poi_type(&self, poi_type: PointOfInterestType) {
        self.poi_type.set(poi_type);
        self.base.notify();
    }

    pub fn description(&self) -> String {
        self.description.borrow().clone()
    }

    pub fn set_description(&self, description: impl Into<String>) {
        *self.description.borrow_mut() = description.into();
        self.base.notify();
    }
}

impl fmt::Debug for PointOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointOfInterest")
            .field("id", &self.id())
            .field("name", &*self.name.borrow())
            .field("type", &self.poi_type())
            .field("position", &self.position())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_notify() {
        let poi = PointOfInterest::new(Vec2::new(50.0, 50.0), "Front Desk", PointOfInterestType::Generic);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        poi.changed().subscribe(move |_| c.set(c.get() + 1));

        poi.set_position(Vec2::new(50.0, 50.0));
        assert_eq!(count.get(), 0);

        poi.move_by(Vec2::new(1.0, 0.0));
        poi.set_name("Reception");
        poi.set_poi_type(PointOfInterestType::Shop);
        poi.set_description("Open 9-17");
        assert_eq!(count.get(), 4);
        assert_eq!(poi.position(), Vec2::new(51.0, 50.0));
        assert_eq!(poi.description(), "Open 9-17");
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("toilet".parse::<PointOfInterestType>(), Ok(PointOfInterestType::Toilet));
        assert_eq!(PointOfInterestType::all().len(), 5);
        assert_eq!(PointOfInterestType::Restaurant.to_string(), "RESTAURANT");
    }
}
