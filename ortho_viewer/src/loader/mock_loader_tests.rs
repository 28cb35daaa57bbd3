use glam::Vec3;
use crate::error::Error;
use crate::loader::{LoadEvent, ModelLoader};
use crate::scene::{MeshData, ModelNode};
use super::*;

fn create_test_node() -> ModelNode {
    ModelNode::new("tri").with_mesh(MeshData::new(
        "tri",
        vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        vec![0, 1, 2],
    ))
}

fn drain(loader: &mut dyn ModelLoader) -> Vec<LoadEvent> {
    std::iter::from_fn(|| loader.poll()).collect()
}

// ============================================================================
// LoadEvent
// ============================================================================

#[test]
fn test_percent_with_known_total() {
    let event = LoadEvent::Progress { loaded: 25, total: Some(100) };
    assert_eq!(event.percent(), Some(25.0));

    let done = LoadEvent::Progress { loaded: 4096, total: Some(4096) };
    assert_eq!(done.percent(), Some(100.0));
}

#[test]
fn test_percent_is_clamped() {
    let event = LoadEvent::Progress { loaded: 150, total: Some(100) };
    assert_eq!(event.percent(), Some(100.0));
}

#[test]
fn test_percent_unknown_total() {
    assert_eq!(LoadEvent::Progress { loaded: 10, total: None }.percent(), None);
    assert_eq!(LoadEvent::Progress { loaded: 0, total: Some(0) }.percent(), Some(100.0));
}

#[test]
fn test_terminal_events_have_no_percent() {
    let loaded = LoadEvent::Loaded { node: create_test_node() };
    let failed = LoadEvent::Failed { error: Error::Io("gone".to_string()) };

    assert_eq!(loaded.percent(), None);
    assert!(loaded.is_terminal());
    assert!(failed.is_terminal());
    assert!(!LoadEvent::Progress { loaded: 0, total: None }.is_terminal());
}

// ============================================================================
// MockLoader
// ============================================================================

#[test]
fn test_nothing_before_begin() {
    let mut loader = MockLoader::succeeding(create_test_node(), 100, 2);
    assert!(loader.poll().is_none());
}

#[test]
fn test_succeeding_script() {
    let mut loader = MockLoader::succeeding(create_test_node(), 100, 4);
    loader.begin("models/tri.obj");

    let events = drain(&mut loader);
    assert_eq!(events.len(), 5);
    assert_eq!(events[0], LoadEvent::Progress { loaded: 25, total: Some(100) });
    assert_eq!(events[3].percent(), Some(100.0));
    assert!(matches!(&events[4], LoadEvent::Loaded { node } if node.name == "tri"));
    assert_eq!(loader.requested_paths(), ["models/tri.obj".to_string()]);
    assert!(loader.is_idle());
}

#[test]
fn test_failing_script() {
    let mut loader = MockLoader::failing("missing.obj", "not found");
    loader.begin("missing.obj");

    let events = drain(&mut loader);
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[1],
        LoadEvent::Failed { error: Error::AssetLoadFailed { path, .. } } if path == "missing.obj"
    ));
}

#[test]
fn test_events_after_terminal_are_dropped() {
    let mut loader = MockLoader::new(vec![
        LoadEvent::Loaded { node: create_test_node() },
        LoadEvent::Progress { loaded: 1, total: None },
        LoadEvent::Failed { error: Error::Io("late".to_string()) },
    ]);
    loader.begin("a.obj");

    let events = drain(&mut loader);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], LoadEvent::Loaded { .. }));
}

#[test]
fn test_begin_restarts_script() {
    let mut loader = MockLoader::succeeding(create_test_node(), 10, 1);
    loader.begin("a.obj");
    assert!(loader.poll().is_some());

    loader.begin("b.obj");
    assert_eq!(drain(&mut loader).len(), 2);
    assert_eq!(loader.requested_paths().len(), 2);
}
