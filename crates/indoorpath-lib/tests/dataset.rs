mod common;

use std::fs;

use indoorpath_lib::{
    load_building, Error, GraphStore, LandmarkCategory, NodeKind, DEFAULT_MAX_SUBGRAPH_DEPTH,
};
use tempfile::tempdir;

use common::boelter_hall;

#[test]
fn fixture_loads_nodes_and_landmarks() {
    let map = boelter_hall();
    assert_eq!(map.node_count(), 12);
    // "5th Floor Printer" points at a node that does not exist and is skipped.
    assert_eq!(map.landmark_count(), 6);
    assert!(map
        .find_landmark_by_name("5th Floor Printer")
        .unwrap()
        .is_none());
}

#[test]
fn fixture_node_attributes() {
    let map = boelter_hall();
    let stair = map
        .node(map.node_id_by_name("3-Stair-UpTo4").unwrap())
        .unwrap();
    assert_eq!(stair.kind, NodeKind::Stair);
    assert!(!stair.accessible);
    assert_eq!(stair.building.as_deref(), Some("Boelter Hall"));

    let hall = map.node(map.node_id_by_name("3-Hall-A").unwrap()).unwrap();
    let neighbor_names: Vec<&str> = hall
        .neighbors
        .iter()
        .filter_map(|&id| map.node_name(id))
        .collect();
    assert_eq!(
        neighbor_names,
        vec!["Boelter Entrance Door", "3-Hall-B", "3-Stair-UpTo4", "3-Elevator"]
    );
}

#[test]
fn fixture_landmark_links() {
    let map = boelter_hall();
    let entrance = map.find_landmark_by_name("Boelter Entrance").unwrap().unwrap();
    let room = map.find_landmark_by_name("Room 3420").unwrap().unwrap();
    assert_eq!(room.parent, Some(entrance.id));
    assert_eq!(room.category, LandmarkCategory::Classroom);
    assert!(entrance.location.is_some());

    let kiosk = map.find_landmark_by_name("Unlinked Kiosk").unwrap().unwrap();
    assert!(kiosk.primary_node().is_none());
}

#[test]
fn subgraph_of_fixture_reaches_every_accessible_node() {
    let map = boelter_hall();
    let start = map.node_id_by_name("Boelter Entrance Door").unwrap();
    let expanded = map
        .expand_subgraph(
            start,
            DEFAULT_MAX_SUBGRAPH_DEPTH,
            &indoorpath_lib::PathConstraints::accessible(),
        )
        .unwrap();
    // Two stair landings are excluded.
    assert_eq!(expanded.len(), 10);
}

#[test]
fn loads_dataset_from_temp_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("tiny.json");
    fs::write(
        &path,
        r#"{"nodes":[{"name":"A","connectsTo":["B"]},{"name":"B","connectsTo":["A"]}],
            "landmarks":[{"name":"Desk","type":"study-spot","connectedTo":"B"}]}"#,
    )
    .unwrap();

    let map = load_building(&path).expect("dataset loads");
    assert_eq!(map.node_count(), 2);
    assert_eq!(map.landmark_count(), 1);
}

#[test]
fn malformed_json_is_reported() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_building(&path), Err(Error::Json(_))));
}

#[test]
fn missing_dataset_is_reported() {
    let dir = tempdir().expect("temp dir");
    let err = load_building(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::DatasetNotFound { .. }));
    assert!(err.to_string().contains("absent.json"));
}
