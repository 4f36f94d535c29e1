//! Atlas Recompute Tests
//!
//! These tests drive the context object the way a scene host does and check
//! the published views:
//! - Grid example, minimum size, unique cell keys, sort order
//! - Idempotence and exact restore after focus
//! - Date range and hide/show transitions
//! - Deterministic fallback placement across reloads

use std::collections::HashSet;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use tomb_atlas::core::atlas::NO_CLUSTER_HERE;
use tomb_atlas::core::models::Placement;
use tomb_atlas::{
    parse_artifact_list, Artifact, Atlas, AtlasConfig, ClusterSummary, ConsolePresenter,
    DateRange, LabelStrategy, Position,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn at(id: &str, x: f64, z: f64) -> Artifact {
    Artifact::new(id, Position::new(x, 0.0, z))
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn excavation() -> Atlas {
    let list = json!([
        {"id": "u1", "position": [0.2, 0.0, 0.3], "type": "Ushabti",
         "mention": "Blue faience ushabti", "date": "1925-01-04"},
        {"id": "u2", "position": [1.1, 2.5, 0.9], "type": "ushabti",
         "mention": "Ushabti with hieroglyphs", "date": "1925-01-06"},
        {"id": "u3", "position": "1.9 0 1.5", "type": "ushabti",
         "mention": "Ushabti head", "date": "1925-01-20"},
        {"id": "f1", "position": {"x": 6.5, "y": 0, "z": 6.1},
         "mention": "Falcon amulet", "start_date": "1925-01-08", "end_date": "1925-01-09"},
        {"id": "f2", "position": {"x": 7.9, "y": 0, "z": 7.0},
         "mention": "Falcon pendant", "date": "1925-01-10"},
        {"id": "lone", "position": [20, 0, 20], "mention": "Copper chisel"},
        {"id": "m1", "position": [-3.5, 0, -3.5], "mention": "Alabaster jar"},
        {"id": "m2", "position": [-3.1, 0, -2.2], "mention": "Limestone fragment"}
    ])
    .to_string();
    let config = AtlasConfig::default();
    let artifacts = parse_artifact_list(&list, &config).unwrap();
    Atlas::new(artifacts, config).unwrap()
}

// =============================================================================
// Clustering
// =============================================================================

#[test]
fn test_grid_example() {
    let artifacts = vec![at("a", 0.0, 0.0), at("b", 0.5, 0.5), at("c", 10.0, 10.0)];
    let atlas = Atlas::new(artifacts, AtlasConfig::default()).unwrap();
    let view = atlas.recompute();
    assert_eq!(view.clusters.len(), 1);
    assert_eq!(view.clusters[0].member_count, 2);
    assert_eq!(view.clusters[0].members, vec!["a", "b"]);
    assert_eq!(view.visible_count, 3);
}

#[test]
fn test_cluster_invariants() {
    let view = excavation().recompute();
    let keys: HashSet<_> = view.clusters.iter().map(|c| c.key).collect();
    assert_eq!(keys.len(), view.clusters.len());
    assert!(view.clusters.iter().all(|c| c.member_count >= 2));
    assert!(view
        .clusters
        .windows(2)
        .all(|w| w[0].member_count > w[1].member_count
            || (w[0].member_count == w[1].member_count && w[0].key < w[1].key)));
}

#[test]
fn test_excavation_summary() {
    let view = excavation().recompute();
    assert_eq!(
        view.summaries(),
        vec![
            ClusterSummary::new("ushabti", 3),
            ClusterSummary::new("(no shared term)", 2),
            ClusterSummary::new("falcon", 2),
        ]
    );
    assert_eq!(view.clusters[0].label.strategy, LabelStrategy::ExplicitField);
}

#[test]
fn test_recompute_is_idempotent() {
    let atlas = excavation();
    let first = atlas.recompute();
    let second = atlas.recompute();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_min_cluster_size_config() {
    let config = AtlasConfig {
        min_cluster_size: 3,
        ..AtlasConfig::default()
    };
    let artifacts = excavation().artifacts().to_vec();
    let view = Atlas::new(artifacts, config).unwrap().recompute();
    assert_eq!(view.summaries(), vec![ClusterSummary::new("ushabti", 3)]);
}

// =============================================================================
// Transitions
// =============================================================================

#[test]
fn test_date_range_transition() {
    let mut atlas = excavation();
    let extent = atlas.filter().extent().unwrap();
    assert_eq!((extent.from_iso(), extent.to_iso()), ("1925-01-04".into(), "1925-01-20".into()));

    atlas.set_date_range(DateRange::new(ymd(1925, 1, 1), ymd(1925, 1, 7)));
    let view = atlas.recompute();
    // u1, u2 plus the three undated artifacts
    assert_eq!(view.visible_count, 5);
    let ushabti = view.clusters.iter().find(|c| c.label.text == "ushabti").unwrap();
    assert_eq!(ushabti.member_count, 2);
    assert!(view.clusters.iter().all(|c| c.label.text != "falcon"));
}

#[test]
fn test_hide_then_show_restores_view() {
    let mut atlas = excavation();
    let before = atlas.recompute();
    atlas.hide("f1");
    assert!(atlas.recompute().clusters.iter().all(|c| c.label.text != "falcon"));
    atlas.show("f1");
    assert_eq!(atlas.recompute(), before);
}

#[test]
fn test_focus_then_publish_restores_console() {
    let atlas = excavation();
    let view = atlas.recompute();

    let mut console = ConsolePresenter::new();
    view.publish(&mut console);
    let unfocused = console.clone();

    let focus = atlas.focus("u2").unwrap();
    focus.publish(&mut console);
    assert_eq!(console.clusters()[0], ClusterSummary::new("ushabti", 3));
    assert_eq!(console.focused_label(), "Ushabti with hieroglyphs");
    assert_eq!(console.visible_count(), 8);

    view.publish(&mut console);
    assert_eq!(console, unfocused);
}

#[test]
fn test_focus_outside_cluster() {
    let atlas = excavation();
    let focus = atlas.focus("lone").unwrap();
    assert_eq!(focus.rows, vec![ClusterSummary::new(NO_CLUSTER_HERE, 1)]);
    assert_eq!(focus.member_count, 1);
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_fallback_placement_is_stable() {
    let list = r#"[{"id": "lost-1", "position": "unknown"}, {"id": "lost-2"}]"#;
    let config = AtlasConfig::default();
    let first = parse_artifact_list(list, &config).unwrap();
    let second = parse_artifact_list(list, &config).unwrap();
    assert!(first.iter().all(|a| a.placement == Placement::Fallback));
    assert_eq!(first, second);
    assert_ne!(first[0].position, first[1].position);
}

#[test]
fn test_hide_untitled_artifact_leaves_namesake_visible() {
    let list = r#"[{"position": [0, 0, 0]}, {"id": "artifact-0", "position": [50, 0, 50]}]"#;
    let config = AtlasConfig::default();
    let artifacts = parse_artifact_list(list, &config).unwrap();
    assert_ne!(artifacts[0].id, artifacts[1].id);

    let untitled = artifacts[0].id.clone();
    let mut atlas = Atlas::new(artifacts, config).unwrap();
    atlas.hide("artifact-0");
    assert_eq!(atlas.recompute().visible_count, 1);
    assert!(atlas.is_visible(&untitled));
    assert!(atlas.focus("artifact-0").is_none());
    assert!(atlas.focus(&untitled).is_some());
}

#[test]
fn test_reload_rebuilds_statistics() {
    let mut atlas = excavation();
    assert_eq!(atlas.stats().corpus_size(), 8);
    atlas.reload(vec![at("a", 0.0, 0.0).with_mention("Falcon amulet")]);
    assert_eq!(atlas.stats().corpus_size(), 1);
    assert_eq!(atlas.stats().doc_freq("ushabti"), 0);
    assert!(!atlas.filter().is_enabled());
}
