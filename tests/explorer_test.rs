use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};

use careertree::application::services::{CareerExplorer, ClickOutcome, EXPLORER_BADGE};
use careertree::application::ApplicationError;
use careertree::domain::{
    builtin_taxonomy, DomainError, LayoutConfig, NodeId, NodeRole, TreeBuilder,
};
use careertree::infrastructure::traits::BadgeNotifier;
use careertree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

// ============================================================
// Mock Implementations
// ============================================================

#[derive(Default)]
struct RecordingNotifier {
    awarded: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn awarded(&self) -> Vec<String> {
        self.awarded.lock().unwrap().clone()
    }
}

impl BadgeNotifier for RecordingNotifier {
    fn award(&self, badge: &str) {
        self.awarded.lock().unwrap().push(badge.to_string());
    }
}

// ============================================================
// Fixtures
// ============================================================

struct Harness {
    explorer: CareerExplorer,
    notifier: Arc<RecordingNotifier>,
}

#[fixture]
fn harness() -> Harness {
    let tree = TreeBuilder::default()
        .build(&builtin_taxonomy().unwrap())
        .unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let explorer = CareerExplorer::new(tree, LayoutConfig::default(), notifier.clone()).unwrap();
    Harness { explorer, notifier }
}

// ============================================================
// Click semantics
// ============================================================

#[rstest]
fn given_closed_stream_when_clicked_then_expands_and_shows_children(mut harness: Harness) {
    let explorer = &mut harness.explorer;

    let outcome = explorer.click("science").unwrap();

    assert_eq!(outcome, ClickOutcome::Expanded(NodeId::from("science")));
    assert_eq!(explorer.layout().nodes.len(), 8);
    assert!(!explorer.detail_view().is_open());
}

#[rstest]
fn given_open_stream_when_clicked_then_collapses_subtree(mut harness: Harness) {
    let explorer = &mut harness.explorer;
    explorer.reveal("science.engineering").unwrap();

    let outcome = explorer.click("science").unwrap();

    assert_eq!(
        outcome,
        ClickOutcome::Collapsed {
            id: NodeId::from("science"),
            removed: 2
        }
    );
    assert_eq!(explorer.layout().nodes.len(), 5);
}

#[rstest]
fn given_leaf_with_details_when_clicked_then_detail_view_opens(mut harness: Harness) {
    let explorer = &mut harness.explorer;
    explorer.reveal("science.medical").unwrap();
    let before = explorer.state().clone();

    let outcome = explorer.click("science.medical.mbbs").unwrap();

    assert_eq!(
        outcome,
        ClickOutcome::DetailsOpened(NodeId::from("science.medical.mbbs"))
    );
    assert_eq!(explorer.state(), &before);
    assert!(explorer.detail_view().is_open());
    let (node, details) = explorer.details().unwrap();
    assert_eq!(node.data.id.as_str(), "science.medical.mbbs");
    assert!(details.courses.contains(&"NEET".to_string()));
    assert!(!details.avg_salary.is_empty());
}

#[rstest]
fn given_open_detail_view_when_closed_then_nothing_is_selected(mut harness: Harness) {
    let explorer = &mut harness.explorer;
    explorer.click("arts.teaching").unwrap();
    assert!(explorer.detail_view().is_open());

    explorer.close_details();

    assert!(!explorer.detail_view().is_open());
    assert!(explorer.details().is_none());
}

#[rstest]
fn given_leaf_without_details_when_clicked_then_ignored(mut harness: Harness) {
    let explorer = &mut harness.explorer;
    let before = explorer.state().clone();

    let outcome = explorer.click("commerce.management.entrepreneurship").unwrap();

    assert_eq!(
        outcome,
        ClickOutcome::Ignored(NodeId::from("commerce.management.entrepreneurship"))
    );
    assert_eq!(explorer.state(), &before);
    assert!(!explorer.detail_view().is_open());
}

#[rstest]
fn given_unknown_id_when_clicked_then_node_not_found(mut harness: Harness) {
    let result = harness.explorer.click("science.astrology");

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::NodeNotFound(ref id))) if id == "science.astrology"
    ));
    assert!(harness.notifier.awarded().is_empty());
}

#[rstest]
fn given_several_clicks_then_badge_is_awarded_once(mut harness: Harness) {
    let explorer = &mut harness.explorer;
    assert!(harness.notifier.awarded().is_empty());

    explorer.click("science").unwrap();
    explorer.click("science.engineering").unwrap();
    explorer.click("science").unwrap();

    assert_eq!(harness.notifier.awarded(), vec![EXPLORER_BADGE.to_string()]);
}

#[rstest]
fn given_toggle_without_click_then_no_badge(mut harness: Harness) {
    harness.explorer.toggle("science");
    assert!(harness.notifier.awarded().is_empty());
}

// ============================================================
// Reveal, reset and search
// ============================================================

#[rstest]
fn given_deep_id_when_revealed_then_whole_path_is_visible(mut harness: Harness) {
    let explorer = &mut harness.explorer;
    let target = "science.engineering.computer_science.software.ai.ml.research_scientist";

    explorer
        .reveal("science.engineering.computer_science.software.ai.ml")
        .unwrap();

    let layout = explorer.layout();
    let node = layout.node(target).unwrap();
    assert_eq!(node.depth, 7);
    assert!(node.has_details);
}

#[rstest]
fn given_unknown_id_when_revealed_then_error_and_state_unchanged(mut harness: Harness) {
    let explorer = &mut harness.explorer;
    let before = explorer.state().clone();

    let result = explorer.reveal("nowhere");

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::NodeNotFound(_)))
    ));
    assert_eq!(explorer.state(), &before);
}

#[rstest]
fn given_explored_state_when_reset_then_initial_view_returns(mut harness: Harness) {
    let explorer = &mut harness.explorer;
    let initial = explorer.layout();
    explorer.reveal("commerce.accounting").unwrap();
    explorer.click("commerce.accounting.ca").unwrap();

    explorer.reset();

    assert_eq!(explorer.layout(), initial);
    assert!(!explorer.detail_view().is_open());
}

#[rstest]
#[case("civil", &["science.engineering.civil", "arts.civil_services"])]
#[case("BANK", &["commerce.accounting.banking"])]
#[case("chartered", &["commerce.accounting.ca"])]
#[case("  ", &[])]
#[case("astrology", &[])]
fn given_query_when_searching_then_matches_label_or_id(
    harness: Harness,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    let hits: Vec<&str> = harness
        .explorer
        .search(query)
        .into_iter()
        .map(|n| n.data.id.as_str())
        .collect();
    assert_eq!(hits, expected);
}

#[rstest]
fn given_root_label_when_searching_then_root_is_excluded(harness: Harness) {
    assert!(harness
        .explorer
        .search("career paths")
        .iter()
        .all(|n| !n.data.id.is_root()));
}

// ============================================================
// Scene and construction
// ============================================================

#[rstest]
fn given_initial_state_when_building_scene_then_roles_and_json(harness: Harness) {
    let scene = harness.explorer.scene();

    assert_eq!(scene.nodes.len(), 5);
    assert_eq!(scene.nodes[0].role, NodeRole::Root);
    assert!(scene.nodes[1..].iter().all(|n| n.role == NodeRole::Stream));
    assert!(scene.bounds.is_some());

    let json: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
    assert_eq!(json["nodes"][0]["id"], "root");
    assert_eq!(json["nodes"][0]["role"], "root");
    assert_eq!(json["edges"].as_array().unwrap().len(), 4);
}

#[rstest]
fn given_invalid_layout_config_when_creating_then_rejected() {
    let tree = TreeBuilder::default()
        .build(&builtin_taxonomy().unwrap())
        .unwrap();
    let config = LayoutConfig {
        level_spacing: vec![],
        ..LayoutConfig::default()
    };

    let result = CareerExplorer::new(tree, config, Arc::new(RecordingNotifier::default()));

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidLayout(_)))
    ));
}
