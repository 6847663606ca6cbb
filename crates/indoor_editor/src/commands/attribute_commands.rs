//! Attribute change commands for zones, points of interest and floors.

use std::rc::Rc;

use indoor_model::{Floor, PointOfInterest, PointOfInterestType, Zone, ZoneType};

use super::Command;

/// Command to change a zone's name and type.
pub struct ZoneAttributesCommand {
    zone: Rc<Zone>,
    old_name: String,
    old_type: ZoneType,
    new_name: String,
    new_type: ZoneType,
}

impl ZoneAttributesCommand {
    pub fn new(zone: Rc<Zone>, name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            old_name: zone.name(),
            old_type: zone.zone_type(),
            new_name: name.into(),
            new_type: zone_type,
            zone,
        }
    }
}

impl Command for ZoneAttributesCommand {
    fn description(&self) -> &str {
        "Change Zone Attributes"
    }

    fn redo(&mut self) {
        self.zone.set_name(self.new_name.clone());
        self.zone.set_zone_type(self.new_type);
    }

    fn undo(&mut self) {
        self.zone.set_name(self.old_name.clone());
        self.zone.set_zone_type(self.old_type);
    }
}

#[derive(Clone, Debug, PartialEq)]
struct PointOfInterestAttributes {
    name: String,
    poi_type: PointOfInterestType,
    description: String,
}

impl PointOfInterestAttributes {
    fn read(point: &PointOfInterest) -> Self {
        Self {
            name: point.name(),
            poi_type: point.poi_type(),
            description: point.description(),
        }
    }

    fn apply(&self, point: &PointOfInterest) {
        point.set_name(self.name.clone());
        point.set_poi_type(self.poi_type);
        point.set_description(self.description.clone());
    }
}

/// Command to change a point of interest's name, type and description.
pub struct PointOfInterestAttributesCommand {
    point: Rc<PointOfInterest>,
    old: PointOfInterestAttributes,
    new: PointOfInterestAttributes,
}

impl PointOfInterestAttributesCommand {
    pub fn new(
        point: Rc<PointOfInterest>,
        name: impl Into<String>,
        poi_type: PointOfInterestType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            old: PointOfInterestAttributes::read(&point),
            new: PointOfInterestAttributes {
                name: name.into(),
                poi_type,
                description: description.into(),
            },
            point,
        }
    }
}

impl Command for PointOfInterestAttributesCommand {
    fn description(&self) -> &str {
        "Change Point of Interest Attributes"
    }

    fn redo(&mut self) {
        self.new.apply(&self.point);
    }

    fn undo(&mut self) {
        self.old.apply(&self.point);
    }
}

/// Command to rename a floor.
pub struct RenameFloorCommand {
    floor: Rc<Floor>,
    old_name: String,
    new_name: String,
}

impl RenameFloorCommand {
    pub fn new(floor: Rc<Floor>, name: impl Into<String>) -> Self {
        Self {
            old_name: floor.name(),
            new_name: name.into(),
            floor,
        }
    }
}

impl Command for RenameFloorCommand {
    fn description(&self) -> &str {
        "Rename Floor"
    }

    fn redo(&mut self) {
        self.floor.set_name(self.new_name.clone());
    }

    fn undo(&mut self) {
        self.floor.set_name(self.old_name.clone());
    }
}
