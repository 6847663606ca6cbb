//! Floor add/remove commands.

use std::rc::Rc;

use indoor_model::floor::DEFAULT_FLOOR_NAME;
use indoor_model::{Building, Floor};

use super::Command;

/// Command to append a floor to a building.
pub struct AddFloorCommand {
    building: Rc<Building>,
    floor: Rc<Floor>,
}

impl AddFloorCommand {
    /// Without a floor a new one named [`DEFAULT_FLOOR_NAME`] is created.
    pub fn new(building: Rc<Building>, floor: Option<Rc<Floor>>) -> Self {
        Self {
            building,
            floor: floor.unwrap_or_else(|| Floor::new(DEFAULT_FLOOR_NAME)),
        }
    }

    pub fn floor(&self) -> &Rc<Floor> {
        &self.floor
    }
}

impl Command for AddFloorCommand {
    fn description(&self) -> &str {
        "Add Floor"
    }

    fn redo(&mut self) {
        self.building.add_floor(&self.floor);
    }

    fn undo(&mut self) {
        self.building.remove_floor(&self.floor);
    }
}

/// Command to remove a floor. Undo puts it back at its former index.
pub struct RemoveFloorCommand {
    building: Rc<Building>,
    floor: Rc<Floor>,
    index: Option<usize>,
}

impl RemoveFloorCommand {
    pub fn new(building: Rc<Building>, floor: Rc<Floor>) -> Self {
        Self {
            building,
            floor,
            index: None,
        }
    }

    pub fn floor(&self) -> &Rc<Floor> {
        &self.floor
    }
}

impl Command for RemoveFloorCommand {
    fn description(&self) -> &str {
        "Remove Floor"
    }

    fn redo(&mut self) {
        self.index = self.building.index_of(&self.floor);
        self.building.remove_floor(&self.floor);
    }

    fn undo(&mut self) {
        match self.index.take() {
            Some(index) => {
                self.building.insert_floor(index, &self.floor);
            }
            None => {
                self.building.add_floor(&self.floor);
            }
        }
    }
}
