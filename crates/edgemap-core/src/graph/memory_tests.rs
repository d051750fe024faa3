//! Tests for MemoryGraph.

use super::*;
use crate::error::Error;

fn definition(collection: &str, from: &[&str], to: &[&str]) -> EdgeDefinition {
    EdgeDefinition::new(
        collection,
        from.iter().map(ToString::to_string).collect(),
        to.iter().map(ToString::to_string).collect(),
    )
}

#[test]
fn test_add_edge_definition_creates_collection() {
    // Arrange
    let graph = MemoryGraph::new("social");

    // Act
    graph
        .add_edge_definition(&definition("follows", &["users"], &["users"]))
        .expect("register");

    // Assert
    assert_eq!(graph.name(), "social");
    assert_eq!(graph.edge_definitions().len(), 1);
    assert_eq!(
        graph.edge_definition("follows"),
        Some(definition("follows", &["users"], &["users"]))
    );
    assert_eq!(graph.edge_collection("follows").expect("collection").name(), "follows");
}

#[test]
fn test_identical_definition_is_accepted_once() {
    let graph = MemoryGraph::default();
    let def = definition("likes", &["users"], &["posts"]);

    graph.add_edge_definition(&def).expect("first");
    graph.add_edge_definition(&def).expect("second");

    assert_eq!(graph.edge_definitions(), vec![def]);
}

#[test]
fn test_conflicting_definition_is_rejected() {
    // Arrange
    let graph = MemoryGraph::default();
    graph
        .add_edge_definition(&definition("likes", &["users"], &["posts"]))
        .expect("first");

    // Act
    let err = graph
        .add_edge_definition(&definition("likes", &["users"], &["comments"]))
        .expect_err("conflict");

    // Assert
    assert!(matches!(err, Error::Registration { ref collection, .. } if collection == "likes"));
    assert_eq!(
        graph.edge_definition("likes"),
        Some(definition("likes", &["users"], &["posts"]))
    );
}

#[test]
fn test_unknown_edge_collection() {
    let graph = MemoryGraph::default();

    let err = graph.edge_collection("missing").expect_err("missing");

    assert!(matches!(err, Error::CollectionNotFound(ref name) if name == "missing"));
}

#[test]
fn test_edge_collection_handles_share_storage() {
    let graph = MemoryGraph::default();
    graph
        .add_edge_definition(&definition("links", &["a"], &["b"]))
        .expect("register");

    let first = graph.edge_collection("links").expect("collection");
    let second = graph.edge_collection("links").expect("collection");
    first.write().insert(EdgeDocument::new("a/1", "b/1"));

    assert_eq!(first, second);
    assert_eq!(second.read().len(), 1);
    assert_ne!(first, RawEdgeCollection::new("links"));
}

#[test]
fn test_neighbors_through_collection() {
    let graph = MemoryGraph::default();
    graph
        .add_edge_definition(&definition("links", &["a"], &["b"]))
        .expect("register");
    let raw = graph.edge_collection("links").expect("collection");
    raw.write().insert(EdgeDocument::new("a/1", "b/1"));
    raw.write().insert(EdgeDocument::new("a/1", "b/2"));

    let neighbors = graph
        .neighbors("links", "a/1", Direction::Outbound)
        .expect("neighbors");

    assert_eq!(neighbors, vec!["b/1", "b/2"]);
    assert!(graph.neighbors("nope", "a/1", Direction::Any).is_err());
}

#[test]
fn test_edge_definition_display() {
    let def = definition("likes", &["users", "bots"], &["posts"]);

    assert_eq!(def.to_string(), "likes (users|bots -> posts)");
}
