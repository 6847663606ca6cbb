//! Move commands.

use log::debug;

use indoor_math::Vec2;
use indoor_model::MapElement;

use super::Command;

/// Command to translate a selection by a fixed delta.
///
/// Undo subtracts the same delta rather than restoring recorded positions.
/// A round trip is bit-exact only when `position + delta` is representable;
/// otherwise undo lands within one rounding step of the start and further
/// redo/undo cycles do not drift from there.
pub struct MoveElementsCommand {
    elements: Vec<MapElement>,
    delta: Vec2,
}

impl MoveElementsCommand {
    /// Corners whose wall or zone is part of the same selection are dropped,
    /// they already move with their owner.
    pub fn new(elements: Vec<MapElement>, delta: Vec2) -> Self {
        let mut unique: Vec<MapElement> = Vec::with_capacity(elements.len());
        for element in &elements {
            if !unique.contains(element) {
                unique.push(element.clone());
            }
        }
        let elements = unique
            .iter()
            .filter(|e| e.owner().map_or(true, |owner| !unique.contains(&owner)))
            .cloned()
            .collect();
        Self { elements, delta }
    }

    pub fn elements(&self) -> &[MapElement] {
        &self.elements
    }

    pub fn delta(&self) -> Vec2 {
        self.delta
    }
}

impl Command for MoveElementsCommand {
    fn description(&self) -> &str {
        "Move Elements"
    }

    fn redo(&mut self) {
        for element in &self.elements {
            element.move_by(self.delta);
        }
        debug!("moved {} elements by {}", self.elements.len(), self.delta);
    }

    fn undo(&mut self) {
        for element in &self.elements {
            element.move_by(-self.delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoor_model::{Wall, Zone, ZoneType};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_move_round_trip_is_exact() {
        let wall = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        let mut cmd = MoveElementsCommand::new(vec![wall.clone().into()], Vec2::new(12.5, -50.0));
        cmd.redo();
        assert_eq!(wall.start_node().position(), Vec2::new(12.5, -50.0));
        cmd.undo();
        cmd.redo();
        cmd.undo();
        assert_eq!(wall.start_node().position(), Vec2::new(0.0, 0.0));
        assert_eq!(wall.end_node().position(), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_inexact_delta_does_not_drift() {
        let wall = Wall::new(Vec2::new(0.1, 0.3), Vec2::new(10.0, 0.3));
        let start = wall.start_node().position();
        let mut cmd = MoveElementsCommand::new(vec![wall.clone().into()], Vec2::new(0.2, -0.7));

        cmd.redo();
        cmd.undo();
        let first = wall.start_node().position();
        assert!(first.approx_eq(start));
        assert_eq!(first, Vec2::new(0.1 + 0.2 - 0.2, 0.3));

        for _ in 0..100 {
            cmd.redo();
            cmd.undo();
        }
        assert_eq!(wall.start_node().position(), first);
    }

    #[test]
    fn test_selected_corner_of_selected_zone_moves_once() {
        let zone = Zone::new(
            &[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)],
            "Hall",
            ZoneType::Generic,
        );
        let corner = MapElement::Node(zone.corner_nodes()[0].clone());
        let selection = vec![corner.clone(), zone.clone().into(), corner];
        let mut cmd = MoveElementsCommand::new(selection, Vec2::new(5.0, 0.0));
        assert_eq!(cmd.elements().len(), 1);

        let notified = Rc::new(Cell::new(0));
        let n = Rc::clone(&notified);
        zone.changed().subscribe(move |_| n.set(n.get() + 1));

        cmd.redo();
        assert_eq!(zone.corner_nodes()[0].position(), Vec2::new(5.0, 0.0));
        assert_eq!(notified.get(), 1);
    }
}
