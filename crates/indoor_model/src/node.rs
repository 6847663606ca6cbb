//! Corner and free-standing points.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use indoor_core::ElementId;
use indoor_event::Signal;
use indoor_math::Vec2;

use crate::element::{ElementBase, MapElement, NodeOwner};
use crate::Floor;

/// A point on a floor, either free-standing or a corner of a wall or zone
pub struct Node {
    base: ElementBase,
    position: Cell<Vec2>,
    owner: RefCell<Option<NodeOwner>>,
}

impl Node {
    pub fn new(position: Vec2) -> Rc<Self> {
        Self::with_id(ElementId::new(), position)
    }

    pub fn with_id(id: ElementId, position: Vec2) -> Rc<Self> {
        Rc::new(Self {
            base: ElementBase::new(id),
            position: Cell::new(position),
            owner: RefCell::new(None),
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

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.get().x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.get().y
    }

    /// Move the node. Unchanged positions raise nothing; otherwise the node
    /// and then its owner are notified once.
    pub fn set_position(&self, position: Vec2) {
        if self.position.get() == position {
            return;
        }
        self.position.set(position);
        self.base.notify();
        if let Some(owner) = self.owner() {
            owner.changed().emit(&());
        }
    }

    pub fn set_x(&self, x: f64) {
        self.set_position(Vec2::new(x, self.y()));
    }

    pub fn set_y(&self, y: f64) {
        self.set_position(Vec2::new(self.x(), y));
    }

    pub fn move_by(&self, delta: Vec2) {
        self.set_position(self.position() + delta);
    }

    /// Translate as part of a composite move: only the node's own observers
    /// hear about it, the owner raises its notification once afterwards.
    pub(crate) fn shift(&self, delta: Vec2) {
        let position = self.position.get() + delta;
        if position != self.position.get() {
            self.position.set(position);
            self.base.notify();
        }
    }

    /// The wall or zone this node is a corner of
    pub fn owner(&self) -> Option<MapElement> {
        self.owner.borrow().as_ref().and_then(NodeOwner::upgrade)
    }

    pub(crate) fn set_owner(&self, owner: NodeOwner) {
        *self.owner.borrow_mut() = Some(owner);
    }

    /// Whether the node was created as a corner of a wall or zone
    pub fn has_owner(&self) -> bool {
        self.owner.borrow().is_some()
    }

    pub fn distance_to(&self, other: &Node) -> f64 {
        self.position().distance(other.position())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id())
            .field("position", &self.position())
            .field("owned", &self.has_owner())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(node: &Node) -> Rc<Cell<u32>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        node.changed().subscribe(move |_| c.set(c.get() + 1));
        count
    }

    #[test]
    fn test_set_position_notifies_once() {
        let node = Node::new(Vec2::new(1.0, 2.0));
        let count = counter(&node);

        node.set_position(Vec2::new(3.0, 4.0));
        assert_eq!(count.get(), 1);
        assert_eq!(node.position(), Vec2::new(3.0, 4.0));

        node.set_position(Vec2::new(3.0, 4.0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_axis_setters() {
        let node = Node::new(Vec2::ZERO);
        let count = counter(&node);
        node.set_x(5.0);
        node.set_y(-2.0);
        node.set_y(-2.0);
        assert_eq!(node.position(), Vec2::new(5.0, -2.0));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_move_and_back_is_exact() {
        let node = Node::new(Vec2::new(150.0, -75.5));
        let delta = Vec2::new(50.0, 25.25);
        node.move_by(delta);
        node.move_by(-delta);
        assert_eq!(node.position(), Vec2::new(150.0, -75.5));
    }

    #[test]
    fn test_free_node_has_no_owner() {
        let a = Node::new(Vec2::new(0.0, 0.0));
        let b = Node::new(Vec2::new(3.0, 4.0));
        assert!(a.owner().is_none());
        assert!(a.floor().is_none());
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
