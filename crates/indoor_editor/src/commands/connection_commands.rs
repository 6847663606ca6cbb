//! Zone connection commands.

use std::rc::Rc;

use indoor_model::{Building, Zone};

use super::Command;

/// Command to connect two zones.
pub struct AddZoneConnectionCommand {
    building: Rc<Building>,
    zone_a: Rc<Zone>,
    zone_b: Rc<Zone>,
}

impl AddZoneConnectionCommand {
    pub fn new(building: Rc<Building>, zone_a: Rc<Zone>, zone_b: Rc<Zone>) -> Self {
        Self { building, zone_a, zone_b }
    }
}

impl Command for AddZoneConnectionCommand {
    fn description(&self) -> &str {
        "Connect Zones"
    }

    fn redo(&mut self) {
        self.building.add_connection(&self.zone_a, &self.zone_b);
    }

    fn undo(&mut self) {
        self.building.remove_connection(&self.zone_a, &self.zone_b);
    }
}

/// Command to disconnect two zones.
pub struct RemoveZoneConnectionCommand {
    building: Rc<Building>,
    zone_a: Rc<Zone>,
    zone_b: Rc<Zone>,
}

impl RemoveZoneConnectionCommand {
    pub fn new(building: Rc<Building>, zone_a: Rc<Zone>, zone_b: Rc<Zone>) -> Self {
        Self { building, zone_a, zone_b }
    }
}

impl Command for RemoveZoneConnectionCommand {
    fn description(&self) -> &str {
        "Disconnect Zones"
    }

    fn redo(&mut self) {
        self.building.remove_connection(&self.zone_a, &self.zone_b);
    }

    fn undo(&mut self) {
        self.building.add_connection(&self.zone_a, &self.zone_b);
    }
}
