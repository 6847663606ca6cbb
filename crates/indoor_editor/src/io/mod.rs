//! Document persistence.

mod serializer;

pub use serializer::{
    BuildingData, BuildingSerializer, ConnectionData, FloorData, NodeData, PointOfInterestData,
    SerializeError, WallData, ZoneData,
};
