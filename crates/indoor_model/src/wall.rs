//! Straight wall segments.

use std::fmt;
use std::rc::Rc;

use indoor_core::ElementId;
use indoor_event::Signal;
use indoor_math::Vec2;

use crate::element::{ElementBase, NodeOwner};
use crate::{Floor, Node};

/// A segment between two nodes the wall exclusively owns
pub struct Wall {
    base: ElementBase,
    start: Rc<Node>,
    end: Rc<Node>,
}

impl Wall {
    /// Create a wall together with fresh nodes at both ends
    pub fn new(start: Vec2, end: Vec2) -> Rc<Self> {
        Self::from_nodes(ElementId::new(), Node::new(start), Node::new(end))
    }

    /// Build a wall around existing nodes, which become owned by it
    pub fn from_nodes(id: ElementId, start: Rc<Node>, end: Rc<Node>) -> Rc<Self> {
        Rc::new_cyclic(|this| {
            start.set_owner(NodeOwner::Wall(this.clone()));
            end.set_owner(NodeOwner::Wall(this.clone()));
            Self {
                base: ElementBase::new(id),
                start,
                end,
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
    pub fn start_node(&self) -> &Rc<Node> {
        &self.start
    }

    #[inline]
    pub fn end_node(&self) -> &Rc<Node> {
        &self.end
    }

    pub fn nodes(&self) -> [Rc<Node>; 2] {
        [Rc::clone(&self.start), Rc::clone(&self.end)]
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Vec2 {
        self.start.position().midpoint(self.end.position())
    }

    /// Translate both ends, raising the wall notification once
    pub fn move_by(&self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.start.shift(delta);
        self.end.shift(delta);
        self.base.notify();
    }
}

impl fmt::Debug for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wall")
            .field("id", &self.id())
            .field("start", &self.start.position())
            .field("end", &self.end.position())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_length_and_midpoint() {
        let wall = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0));
        assert_eq!(wall.length(), 50.0);
        assert_eq!(wall.midpoint(), Vec2::new(15.0, 20.0));
    }

    #[test]
    fn test_move_by_notifies_wall_once() {
        let wall = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        wall.changed().subscribe(move |_| c.set(c.get() + 1));

        wall.move_by(Vec2::new(10.0, 5.0));
        assert_eq!(count.get(), 1);
        assert_eq!(wall.start_node().position(), Vec2::new(10.0, 5.0));
        assert_eq!(wall.end_node().position(), Vec2::new(110.0, 5.0));

        wall.move_by(Vec2::new(-10.0, -5.0));
        assert_eq!(wall.start_node().position(), Vec2::new(0.0, 0.0));
        assert_eq!(wall.end_node().position(), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_dragging_a_node_notifies_the_wall() {
        let wall = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        wall.changed().subscribe(move |_| c.set(c.get() + 1));

        wall.end_node().set_position(Vec2::new(100.0, 50.0));
        assert_eq!(count.get(), 1);
    }
}
