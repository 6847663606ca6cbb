//! Structural tests for indoor_model
//!
//! These cover the cascade and connection rules the editor relies on when it
//! undoes deletions and saves documents.

use std::collections::HashSet;
use std::rc::Rc;

use indoor_model::*;

fn square(x: f64, y: f64, size: f64) -> Vec<Vec2> {
    vec![
        Vec2::new(x, y),
        Vec2::new(x + size, y),
        Vec2::new(x + size, y + size),
        Vec2::new(x, y + size),
    ]
}

fn element_ids(floor: &Floor) -> HashSet<ElementId> {
    floor.elements().iter().map(MapElement::id).collect()
}

fn transitive_dependencies(element: &MapElement) -> Vec<MapElement> {
    let mut out = Vec::new();
    let mut stack = element.dependencies();
    while let Some(dep) = stack.pop() {
        stack.extend(dep.dependencies());
        out.push(dep);
    }
    out
}

fn sample_elements() -> Vec<MapElement> {
    let zone = Zone::new(&square(0.0, 0.0, 100.0), "Lobby", ZoneType::Generic);
    vec![
        Node::new(Vec2::new(3.0, 4.0)).into(),
        Wall::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)).into(),
        zone.clone().into(),
        zone.corner_nodes()[2].clone().into(),
        PointOfInterest::new(Vec2::new(50.0, 50.0), "Front Desk", PointOfInterestType::Generic).into(),
    ]
}

/// Adding any element leaves all of its dependencies on the floor
#[test]
fn invariant_cascade_closure() {
    for element in sample_elements() {
        let floor = Floor::new("Ground");
        floor.add(&element);
        for dep in transitive_dependencies(&element) {
            assert!(floor.contains(&dep), "{:?} missing after adding {:?}", dep, element);
            assert!(Rc::ptr_eq(&dep.floor().unwrap(), &floor));
        }
    }
}

/// Removing what was just added restores the previous element set
#[test]
fn invariant_cascade_symmetry() {
    let floor = Floor::new("Ground");
    floor.add(&Zone::new(&square(200.0, 0.0, 50.0), "Existing", ZoneType::Stairs).into());
    let before = element_ids(&floor);

    for element in sample_elements() {
        floor.add(&element);
        assert!(floor.len() > before.len());
        floor.remove(&element);
        assert_eq!(element_ids(&floor), before);
        assert!(element.floor().is_none());
    }
}

/// Deleting one corner of a zone deletes the zone and every other corner
#[test]
fn invariant_partial_zone_deletion_removes_whole_zone() {
    let floor = Floor::new("Ground");
    let zone = Zone::new(&square(0.0, 0.0, 10.0), "Office", ZoneType::Generic);
    let wall = Wall::new(Vec2::new(0.0, 20.0), Vec2::new(10.0, 20.0));
    floor.add(&zone.clone().into());
    floor.add(&wall.clone().into());

    floor.remove(&zone.corner_nodes()[3].clone().into());

    assert!(floor.zones().is_empty());
    assert_eq!(floor.nodes().len(), 2);
    assert_eq!(floor.walls().len(), 1);
    for corner in zone.corner_nodes() {
        assert!(corner.floor().is_none());
    }
}

/// Moving back and forth returns every kind to exactly where it was
#[test]
fn invariant_move_inverse_is_exact() {
    let delta = Vec2::new(37.5, -12.25);
    for element in sample_elements() {
        let before: Vec<Vec2> = element.movables().iter().map(MapElement::position).collect();
        element.move_by(delta);
        element.move_by(-delta);
        let after: Vec<Vec2> = element.movables().iter().map(MapElement::position).collect();
        assert_eq!(before, after);
    }
}

/// Connections are symmetric and ignore zones no longer on any floor
#[test]
fn invariant_connection_symmetry() {
    let building = Building::new();
    let ground = Floor::new("Ground");
    let first = Floor::new("First");
    building.add_floor(&ground);
    building.add_floor(&first);

    let stairs_down = Zone::new(&square(0.0, 0.0, 10.0), "Stairs", ZoneType::Stairs);
    let stairs_up = Zone::new(&square(0.0, 0.0, 10.0), "Stairs", ZoneType::Stairs);
    ground.add(&stairs_down.clone().into());
    first.add(&stairs_up.clone().into());

    building.add_connection(&stairs_down, &stairs_up);
    assert!(building.is_connected(&stairs_down, &stairs_up));
    assert!(building.is_connected(&stairs_up, &stairs_down));

    // Removing a corner cascades the zone off its floor, which hides the link
    first.remove(&stairs_up.corner_nodes()[0].clone().into());
    assert!(!building.is_connected(&stairs_down, &stairs_up));
    assert!(building.zone_connections().is_empty());

    building.remove_connection(&stairs_up, &stairs_down);
    first.add(&stairs_up.clone().into());
    assert!(!building.is_connected(&stairs_down, &stairs_up));
}

/// Each connected pair is listed once regardless of direction
#[test]
fn invariant_connection_listing_is_canonical() {
    let building = Building::new();
    let floor = Floor::new("Ground");
    building.add_floor(&floor);
    let zones: Vec<_> = (0..4)
        .map(|i| Zone::new(&square(i as f64 * 20.0, 0.0, 10.0), format!("Room {}", i), ZoneType::Generic))
        .collect();
    for zone in &zones {
        floor.add(&zone.clone().into());
    }
    building.add_connection(&zones[0], &zones[1]);
    building.add_connection(&zones[1], &zones[2]);
    building.add_connection(&zones[3], &zones[0]);
    building.add_connection(&zones[1], &zones[0]);

    let pairs: HashSet<(ElementId, ElementId)> = building
        .zone_connections()
        .iter()
        .map(|(a, b)| if a.id() < b.id() { (a.id(), b.id()) } else { (b.id(), a.id()) })
        .collect();
    assert_eq!(building.zone_connections().len(), 3);
    assert_eq!(pairs.len(), 3);
}
