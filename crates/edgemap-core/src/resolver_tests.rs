//! Tests for the edge collection registry.

use std::sync::Arc;
use std::thread;

use crate::config::{ConflictPolicy, EdgeMapConfig};
use crate::edge_collection::EdgeCollection;
use crate::error::Error;
use crate::graph::{EdgeDefinition, Graph, MemoryGraph};
use crate::model::{EdgeModel, EdgeModelDescriptor, Endpoints};
use crate::naming::NamingConvention;
use crate::resolver::EdgeCollectionRegistry;
use crate::test_support::CountingGraph;

fn registry() -> (Arc<CountingGraph>, EdgeCollectionRegistry) {
    let graph = Arc::new(CountingGraph::new());
    let registry = EdgeCollectionRegistry::new(graph.clone());
    (graph, registry)
}

struct Authored;

impl EdgeModel for Authored {
    const NAME: &'static str = "Authored";

    fn from() -> Endpoints {
        Endpoints::one("users")
    }

    fn to() -> Endpoints {
        Endpoints::many(["posts", "comments"])
    }
}

// =============================================================================
// Application-defined collection types
// =============================================================================

#[test]
fn test_user_defined_collection_wins() {
    // Arrange
    let (graph, registry) = registry();
    let my_edge = EdgeModelDescriptor::new("MyEdge", "users", "users");
    registry.register_model(my_edge.clone()).expect("register");
    let defined = registry.define("MyEdgesCollection").expect("define");
    assert_eq!(graph.call_count(), 1);

    // Act
    let resolved = registry.for_model(&my_edge).expect("resolve");

    // Assert
    assert!(Arc::ptr_eq(&defined, &resolved));
    assert_eq!(graph.call_count(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_existing_type_is_returned_without_validation() {
    let (graph, registry) = registry();
    registry
        .register_model(EdgeModelDescriptor::new("MyEdge", "users", "users"))
        .expect("register");
    let defined = registry.define("MyEdgesCollection").expect("define");

    // Same name, different endpoints: the defined type is still returned.
    let other = EdgeModelDescriptor::new("MyEdge", "bots", "bots");
    let resolved = registry.for_model(&other).expect("resolve");

    assert!(Arc::ptr_eq(&defined, &resolved));
    assert_eq!(resolved.edge_class().from(), &Endpoints::one("users"));
    assert_eq!(graph.call_count(), 1);
}

#[test]
fn test_define_existing_name_fails() {
    let (_, registry) = registry();
    registry
        .register_model(EdgeModelDescriptor::new("MyEdge", "users", "users"))
        .expect("register");
    registry.define("MyEdgesCollection").expect("define");

    let err = registry
        .create_edge_collection("MyEdgesCollection")
        .expect_err("duplicate");

    assert!(matches!(err, Error::CollectionExists(ref name) if name == "MyEdgesCollection"));
}

#[test]
fn test_define_without_model_fails_and_binds_nothing() {
    let (graph, registry) = registry();

    let err = registry
        .define("GhostEdgesCollection")
        .expect_err("no model");

    assert!(matches!(err, Error::Resolution { .. }));
    assert!(registry.get("GhostEdgesCollection").is_none());
    assert!(registry.is_empty());
    assert_eq!(graph.call_count(), 0);
}

// =============================================================================
// Implicit collection types
// =============================================================================

#[test]
fn test_creates_collection_for_unknown_model() {
    // Arrange
    let (graph, registry) = registry();
    let amazing = EdgeModelDescriptor::new("AmazingEdge", "users", "posts");

    // Act
    let collection = registry.for_model(&amazing).expect("resolve");

    // Assert
    assert_eq!(collection.type_name(), "AmazingEdgesCollection");
    assert_eq!(collection.edge_class(), &amazing);
    assert_eq!(
        graph.calls(),
        vec![EdgeDefinition::new(
            "amazing_edges",
            vec!["users".into()],
            vec!["posts".into()],
        )]
    );
    assert_eq!(registry.type_names(), vec!["AmazingEdgesCollection"]);
    assert_eq!(registry.model("AmazingEdge"), Some(amazing));
}

#[test]
fn test_resolution_is_idempotent() {
    let (graph, registry) = registry();
    let amazing = EdgeModelDescriptor::new("AmazingEdge", "users", "posts");

    let first = registry.for_model(&amazing).expect("first");
    let second = registry.for_model(&amazing).expect("second");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(graph.call_count(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_static_model_resolution() {
    let (graph, registry) = registry();
    registry.register::<Authored>().expect("register");

    let collection = registry.for_edge::<Authored>().expect("resolve");

    assert_eq!(collection.collection_name(), "authoreds");
    assert_eq!(
        graph.calls()[0].to(),
        ["posts".to_string(), "comments".to_string()]
    );
}

#[test]
fn test_empty_model_name_is_rejected() {
    let (graph, registry) = registry();

    let err = registry
        .for_model(&EdgeModelDescriptor::new("", "a", "b"))
        .expect_err("empty");

    assert!(matches!(err, Error::InvalidName(_)));
    assert_eq!(graph.call_count(), 0);
}

#[test]
fn test_failed_registration_leaves_no_type() {
    let graph: Arc<dyn Graph> = Arc::new(CountingGraph::rejecting());
    let registry = EdgeCollectionRegistry::new(graph);

    let err = registry
        .for_model(&EdgeModelDescriptor::new("Like", "users", "posts"))
        .expect_err("rejected");

    assert!(matches!(err, Error::Registration { .. }));
    assert!(registry.collection_for_model("Like").is_none());
    assert!(registry.model("Like").is_none());
}

#[test]
fn test_corrected_model_resolves_after_failed_definition() {
    // Arrange
    let graph = Arc::new(MemoryGraph::default());
    graph
        .add_edge_definition(&EdgeDefinition::new(
            "likes",
            vec!["bots".into()],
            vec!["bots".into()],
        ))
        .expect("preexisting");
    let registry = EdgeCollectionRegistry::new(graph);
    registry
        .for_model(&EdgeModelDescriptor::new("Like", "users", "posts"))
        .expect_err("conflict");

    // Act
    let corrected = EdgeModelDescriptor::new("Like", "bots", "bots");
    let collection = registry.for_model(&corrected).expect("retry");

    // Assert
    assert_eq!(collection.edge_class(), &corrected);
    assert_eq!(registry.model("Like"), Some(corrected));
}

#[test]
fn test_new_type_binds_passed_model_despite_plural_collision() {
    // Arrange
    let (graph, registry) = registry();
    registry
        .register_model(EdgeModelDescriptor::new("City", "a", "b"))
        .expect("register");
    let citie = EdgeModelDescriptor::new("Citie", "x", "y");

    // Act
    let collection = registry.for_model(&citie).expect("resolve");

    // Assert
    assert_eq!(collection.type_name(), "CitiesCollection");
    assert_eq!(collection.edge_class(), &citie);
    assert_eq!(graph.calls()[0].from(), ["x".to_string()]);
}

#[test]
fn test_concurrent_resolution_defines_one_type() {
    // Arrange
    let (graph, registry) = registry();
    let registry = Arc::new(registry);
    let model = EdgeModelDescriptor::new("Follow", "users", "users");

    // Act
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let model = model.clone();
            thread::spawn(move || registry.for_model(&model).expect("resolve"))
        })
        .collect();
    let resolved: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();

    // Assert
    assert_eq!(graph.call_count(), 1);
    assert!(resolved.iter().all(|c| Arc::ptr_eq(c, &resolved[0])));
}

// =============================================================================
// Model registration
// =============================================================================

#[test]
fn test_register_model_conflict() {
    let (_, registry) = registry();
    registry
        .register_model(EdgeModelDescriptor::new("Like", "users", "posts"))
        .expect("first");
    registry
        .register_model(EdgeModelDescriptor::new("Like", "users", "posts"))
        .expect("identical");

    let err = registry
        .register_model(EdgeModelDescriptor::new("Like", "users", "comments"))
        .expect_err("conflict");

    assert!(matches!(err, Error::ModelConflict(ref name) if name == "Like"));
    assert_eq!(registry.models().len(), 1);
}

#[test]
fn test_custom_naming_convention() {
    let graph = Arc::new(CountingGraph::new());
    let registry = EdgeCollectionRegistry::with_naming(
        graph.clone(),
        NamingConvention::with_suffix("Store").expect("suffix"),
    );

    let collection = registry
        .for_model(&EdgeModelDescriptor::new("Vote", "users", "posts"))
        .expect("resolve");

    assert_eq!(collection.type_name(), "VotesStore");
    assert_eq!(graph.calls()[0].collection(), "votes");
}

#[test]
fn test_open_returns_working_handle() {
    use crate::collection::Collection;
    use crate::graph::EdgeDocument;

    let (_, registry) = registry();
    let model = EdgeModelDescriptor::new("Follow", "users", "users");

    let handle = registry.open(&model).expect("open");
    handle
        .insert(EdgeDocument::new("users/1", "users/2"))
        .expect("insert");

    let again = registry.open(&model).expect("reopen");
    assert_eq!(again.count(), 1);
}

// =============================================================================
// Startup registration from configuration
// =============================================================================

#[test]
fn test_from_config_registers_declared_models() {
    // Arrange
    let config = EdgeMapConfig::from_toml(
        r#"
[[models]]
name = "Follow"
from = "users"
to = "users"

[[models]]
name = "Membership"
from = "users"
to = ["teams", "orgs"]
"#,
    )
    .expect("parse");
    let graph = Arc::new(CountingGraph::new());

    // Act
    let registry = EdgeCollectionRegistry::from_config(graph.clone(), &config).expect("load");

    // Assert
    assert_eq!(
        registry.type_names(),
        vec!["FollowsCollection", "MembershipsCollection"]
    );
    assert_eq!(graph.call_count(), 2);
    assert_eq!(
        graph.edge_definition("memberships").map(|d| d.to().to_vec()),
        Some(vec!["teams".to_string(), "orgs".to_string()])
    );
}

#[test]
fn test_from_config_rejects_other_graph() {
    let mut config = EdgeMapConfig::default();
    config.graph.name = "social".to_string();
    let graph = Arc::new(CountingGraph::new());

    let err = EdgeCollectionRegistry::from_config(graph.clone(), &config).expect_err("mismatch");

    assert!(matches!(err, Error::Config(ref message) if message.contains("social")));
    assert_eq!(graph.call_count(), 0);
}

#[test]
fn test_from_config_applies_skip_policy() {
    // Arrange
    let config = EdgeMapConfig::from_toml(
        r#"
[registration]
on_conflict = "skip"

[[models]]
name = "Follow"
from = "users"
to = "users"
"#,
    )
    .expect("parse");
    let graph = Arc::new(CountingGraph::new());
    graph
        .add_edge_definition(&EdgeDefinition::new(
            "follows",
            vec!["users".into()],
            vec!["teams".into()],
        ))
        .expect("preexisting");

    // Act
    let registry = EdgeCollectionRegistry::from_config(graph.clone(), &config).expect("load");

    // Assert
    assert_eq!(registry.conflict_policy(), ConflictPolicy::Skip);
    assert_eq!(registry.type_names(), vec!["FollowsCollection"]);
    assert_eq!(graph.call_count(), 1);
    assert_eq!(
        graph.edge_definition("follows").map(|d| d.to().to_vec()),
        Some(vec!["teams".to_string()])
    );
}

#[test]
fn test_auto_register_counts_new_types_only() {
    let (_, registry) = registry();
    let models = vec![
        EdgeModelDescriptor::new("Follow", "users", "users"),
        EdgeModelDescriptor::new("Like", "users", "posts"),
    ];

    assert_eq!(registry.auto_register(&models).expect("first"), 2);
    assert_eq!(registry.auto_register(&models).expect("second"), 0);
}
