//! Indoor map document model.
//!
//! A [`Building`] holds an ordered list of [`Floor`]s and an undirected
//! connection relation between zones. Each floor partitions its elements
//! into nodes, walls, zones and points of interest.
//!
//! ## Ownership
//!
//! ```text
//! Building ──owns──▶ Floor ──owns──▶ MapElement (Node | Wall | Zone | PointOfInterest)
//!     ▲                 │ ▲                 │
//!     └──── weak ───────┘ └───── weak ──────┘
//!
//! Wall / Zone ──owns──▶ corner Nodes ──weak owner──▶ Wall / Zone
//! ```
//!
//! Back references never keep their target alive. Adding or removing an
//! element on a floor cascades to its dependencies and to its owner, so a
//! floor never holds half of a wall or zone.

pub mod element;
pub mod node;
pub mod wall;
pub mod zone;
pub mod point_of_interest;
pub mod floor;
pub mod building;

pub use element::{ElementBase, ElementKind, MapElement, NodeOwner};
pub use node::Node;
pub use wall::Wall;
pub use zone::{Zone, ZoneType};
pub use point_of_interest::{PointOfInterest, PointOfInterestType};
pub use floor::Floor;
pub use building::{Building, ConnectionEvent};

pub use indoor_core::ElementId;
pub use indoor_math::Vec2;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Building, ElementId, ElementKind, Floor, MapElement, Node, PointOfInterest,
        PointOfInterestType, Vec2, Wall, Zone, ZoneType,
    };
}
