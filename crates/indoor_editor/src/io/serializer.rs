//! Building serialization to/from JSON.
//!
//! ```text
//! { "floors": [ { "id", "name", "nodes", "walls", "zones", "points_of_interest" } ],
//!   "zone_connections": [ { "zone1_id", "zone2_id" } ] }
//! ```
//!
//! Identifiers are the hyphenated UUID strings of the live elements, so a
//! loaded document keeps the identity of every element.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use indoor_core::ElementId;
use indoor_math::Vec2;
use indoor_model::{
    Building, Floor, MapElement, Node, PointOfInterest, PointOfInterestType, Wall, Zone, ZoneType,
};

/// Building file data structure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingData {
    #[serde(default)]
    pub floors: Vec<FloorData>,
    #[serde(default)]
    pub zone_connections: Vec<ConnectionData>,
}

/// Floor data for serialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub walls: Vec<WallData>,
    #[serde(default)]
    pub zones: Vec<ZoneData>,
    #[serde(default)]
    pub points_of_interest: Vec<PointOfInterestData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallData {
    pub id: String,
    pub start_node_id: String,
    pub end_node_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneData {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub zone_type: ZoneType,
    pub corner_node_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterestData {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub poi_type: PointOfInterestType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// One undirected zone connection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionData {
    pub zone1_id: String,
    pub zone2_id: String,
}

/// Errors raised while saving or loading a building.
///
/// Any of them aborts a load entirely; no partial building is returned.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    #[error("Identifier used twice: {0}")]
    DuplicateId(String),

    #[error("Reference to unknown {kind}: {id}")]
    UnknownReference { kind: &'static str, id: String },

    #[error("Node {0} is a corner of more than one wall or zone")]
    SharedNode(String),

    #[error("Zone {id} has {count} corners, at least 3 are required")]
    TooFewCorners { id: String, count: usize },
}

/// Building serializer for save/load operations.
pub struct BuildingSerializer;

impl BuildingSerializer {
    /// Save a building to a JSON file.
    ///
    /// The document is fully encoded before the file is touched.
    pub fn save(building: &Building, path: &Path) -> Result<(), SerializeError> {
        let json = Self::to_json(building)?;
        std::fs::write(path, json).map_err(|source| SerializeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved building ({} floors) to {:?}", building.floor_count(), path);
        Ok(())
    }

    /// Load a building from a JSON file.
    pub fn load(path: &Path) -> Result<Rc<Building>, SerializeError> {
        let content = std::fs::read_to_string(path).map_err(|source| SerializeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let building = Self::from_json(&content)?;
        log::info!("Loaded building ({} floors) from {:?}", building.floor_count(), path);
        Ok(building)
    }

    pub fn to_json(building: &Building) -> Result<String, SerializeError> {
        Ok(serde_json::to_string_pretty(&Self::to_data(building))?)
    }

    pub fn from_json(json: &str) -> Result<Rc<Building>, SerializeError> {
        let data: BuildingData = serde_json::from_str(json)?;
        Self::from_data(&data)
    }

    /// Convert a building to its file data structure.
    pub fn to_data(building: &Building) -> BuildingData {
        let floors = building.floors().iter().map(|floor| floor_to_data(floor)).collect();
        let zone_connections = building
            .zone_connections()
            .iter()
            .map(|(a, b)| ConnectionData {
                zone1_id: a.id().to_string(),
                zone2_id: b.id().to_string(),
            })
            .collect();

        BuildingData {
            floors,
            zone_connections,
        }
    }

    /// Rebuild a building from file data.
    pub fn from_data(data: &BuildingData) -> Result<Rc<Building>, SerializeError> {
        let building = Building::new();
        let mut loader = Loader::default();

        for floor_data in &data.floors {
            let floor = loader.floor(floor_data)?;
            building.add_floor(&floor);
        }

        for connection in &data.zone_connections {
            let zone_a = loader.zone(&connection.zone1_id)?;
            let zone_b = loader.zone(&connection.zone2_id)?;
            building.add_connection(&zone_a, &zone_b);
        }

        Ok(building)
    }
}

fn floor_to_data(floor: &Floor) -> FloorData {
    FloorData {
        id: floor.id().to_string(),
        name: floor.name(),
        nodes: floor
            .nodes()
            .iter()
            .map(|node| NodeData {
                id: node.id().to_string(),
                x: node.x(),
                y: node.y(),
            })
            .collect(),
        walls: floor
            .walls()
            .iter()
            .map(|wall| WallData {
                id: wall.id().to_string(),
                start_node_id: wall.start_node().id().to_string(),
                end_node_id: wall.end_node().id().to_string(),
            })
            .collect(),
        zones: floor
            .zones()
            .iter()
            .map(|zone| ZoneData {
                id: zone.id().to_string(),
                name: zone.name(),
                zone_type: zone.zone_type(),
                corner_node_ids: zone.corner_nodes().iter().map(|n| n.id().to_string()).collect(),
            })
            .collect(),
        points_of_interest: floor
            .points_of_interest()
            .iter()
            .map(|poi| PointOfInterestData {
                id: poi.id().to_string(),
                x: poi.position().x,
                y: poi.position().y,
                name: poi.name(),
                poi_type: poi.poi_type(),
                description: poi.description(),
            })
            .collect(),
    }
}

/// Identifier map built up while reading a file.
#[derive(Default)]
struct Loader {
    elements: HashMap<ElementId, MapElement>,
    floors: HashMap<ElementId, Rc<Floor>>,
}

impl Loader {
    fn parse_id(id: &str) -> Result<ElementId, SerializeError> {
        id.parse().map_err(|_| SerializeError::InvalidId(id.to_string()))
    }

    fn register(&mut self, element: MapElement) -> Result<(), SerializeError> {
        let id = element.id();
        if self.elements.insert(id, element).is_some() {
            return Err(SerializeError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    /// A still unowned node declared on `floor`.
    fn node(&self, id: &str, floor: &Rc<Floor>) -> Result<Rc<Node>, SerializeError> {
        let unknown = || SerializeError::UnknownReference {
            kind: "node",
            id: id.to_string(),
        };
        let key = Self::parse_id(id)?;
        let node = self
            .elements
            .get(&key)
            .and_then(MapElement::as_node)
            .cloned()
            .ok_or_else(unknown)?;
        if !node.floor().is_some_and(|f| Rc::ptr_eq(&f, floor)) {
            return Err(unknown());
        }
        if node.has_owner() {
            return Err(SerializeError::SharedNode(id.to_string()));
        }
        Ok(node)
    }

    fn zone(&self, id: &str) -> Result<Rc<Zone>, SerializeError> {
        let key = Self::parse_id(id)?;
        self.elements
            .get(&key)
            .and_then(MapElement::as_zone)
            .cloned()
            .ok_or_else(|| SerializeError::UnknownReference {
                kind: "zone",
                id: id.to_string(),
            })
    }

    /// Build one floor. Nodes are added while still unowned, so every
    /// partition keeps file order and walls and zones find their corners
    /// already in place.
    fn floor(&mut self, data: &FloorData) -> Result<Rc<Floor>, SerializeError> {
        let id = Self::parse_id(&data.id)?;
        let floor = Floor::with_id(id, data.name.clone());
        if self.floors.insert(id, Rc::clone(&floor)).is_some() {
            return Err(SerializeError::DuplicateId(data.id.clone()));
        }

        for node_data in &data.nodes {
            let node = Node::with_id(Self::parse_id(&node_data.id)?, Vec2::new(node_data.x, node_data.y));
            let element = MapElement::Node(node);
            self.register(element.clone())?;
            floor.add(&element);
        }

        for wall_data in &data.walls {
            let start = self.node(&wall_data.start_node_id, &floor)?;
            let end = self.node(&wall_data.end_node_id, &floor)?;
            if Rc::ptr_eq(&start, &end) {
                return Err(SerializeError::SharedNode(wall_data.start_node_id.clone()));
            }
            let wall = MapElement::Wall(Wall::from_nodes(Self::parse_id(&wall_data.id)?, start, end));
            self.register(wall.clone())?;
            floor.add(&wall);
        }

        for zone_data in &data.zones {
            if zone_data.corner_node_ids.len() < 3 {
                return Err(SerializeError::TooFewCorners {
                    id: zone_data.id.clone(),
                    count: zone_data.corner_node_ids.len(),
                });
            }
            let mut corners: Vec<Rc<Node>> = Vec::with_capacity(zone_data.corner_node_ids.len());
            for corner_id in &zone_data.corner_node_ids {
                let corner = self.node(corner_id, &floor)?;
                if corners.iter().any(|c| Rc::ptr_eq(c, &corner)) {
                    return Err(SerializeError::SharedNode(corner_id.clone()));
                }
                corners.push(corner);
            }
            let zone = MapElement::Zone(Zone::from_nodes(
                Self::parse_id(&zone_data.id)?,
                corners,
                zone_data.name.clone(),
                zone_data.zone_type,
            ));
            self.register(zone.clone())?;
            floor.add(&zone);
        }

        for poi_data in &data.points_of_interest {
            let poi = PointOfInterest::with_id(
                Self::parse_id(&poi_data.id)?,
                Vec2::new(poi_data.x, poi_data.y),
                poi_data.name.clone(),
                poi_data.poi_type,
            );
            poi.set_description(poi_data.description.clone());
            let poi = MapElement::PointOfInterest(poi);
            self.register(poi.clone())?;
            floor.add(&poi);
        }

        Ok(floor)
    }
}
