use graphlib::graph::{property_map, EntityId, GraphStore, Node, Relation};
use graphlib::traversal::{NodeTraversal, QueryError, Traversal};
use uuid::Uuid;

fn bob_id() -> EntityId {
    EntityId::from(Uuid::from_u128(1))
}

fn alice_id() -> EntityId {
    EntityId::from(Uuid::from_u128(2))
}

/// Bob and Alice, both people, with a "test" relation from Bob to Alice
fn scenario_a() -> GraphStore {
    let mut store = GraphStore::new();
    let bob = store.add_node(Node::new_with_properties(
        bob_id(),
        property_map([("Name", "Bob"), ("Hobby", "Sportsball")]),
        ["Person"],
    ));
    let alice = store.add_node(Node::new_with_properties(
        alice_id(),
        property_map([("Name", "Alice"), ("Hobby", "trains"), ("Bloodtype", "A+")]),
        ["Person"],
    ));
    store.add_relationship(Relation::new("test", bob, alice)).unwrap();
    store
}

fn assert_scenario_queries(store: &GraphStore) {
    let names: Vec<String> = store
        .all_nodes()
        .has_id(bob_id())
        .out_v()
        .values(["Name"])
        .collect();
    assert_eq!(names, vec!["Alice"]);
    assert_eq!(store.all_nodes().has_label(["Person"]).count(), 2);
    assert_eq!(store.all_nodes().has_key(["Bloodtype"]).count(), 1);
    assert_eq!(store.all_nodes().has_label(["Train"]).count(), 0);
}

#[test]
fn test_scenario_a_queries() {
    let store = scenario_a();
    assert_eq!(store.all_nodes().len(), 2);
    assert_scenario_queries(&store);
}

#[test]
fn test_scenario_b_reload_reproduces_queries() {
    let store = scenario_a();
    let xml = store.to_xml_string().unwrap();
    let reloaded = GraphStore::from_xml_str(&xml).unwrap();

    assert_scenario_queries(&reloaded);
}

#[test]
fn test_single_result_accessor() {
    let store = scenario_a();

    let name = store
        .all_nodes()
        .has_id(bob_id())
        .out_v()
        .values(["Name"])
        .single()
        .unwrap();
    assert_eq!(name, "Alice");

    assert_eq!(
        store.all_nodes().has_id(bob_id()).single().unwrap().id,
        bob_id()
    );
    assert_ne!(
        store.all_nodes().has_id(alice_id()).single().unwrap().id,
        bob_id()
    );
    assert_eq!(
        store.all_nodes().has_label(["Train"]).single().unwrap_err(),
        QueryError::EmptyResult
    );
    assert_eq!(
        store.all_nodes().has_label(["Person"]).single().unwrap_err(),
        QueryError::MultipleResults
    );
}

#[test]
fn test_label_or_semantics() {
    let mut store = GraphStore::new();
    store.add_node(Node::new(["Person", "Train"]));

    assert_eq!(store.all_nodes().has_label(["Train", "Boat"]).count(), 1);
    assert_eq!(store.all_nodes().has_label(["Person"]).count(), 1);
    assert_eq!(store.all_nodes().has_label(["Boat"]).count(), 0);
}

#[test]
fn test_flattened_length_matches_relation_count() {
    let mut store = GraphStore::new();
    let hubs: Vec<_> = (0..3).map(|_| store.add_node(Node::new(["Hub"]))).collect();
    let leaf = store.add_node(Node::new(["Leaf"]));

    for (i, hub) in hubs.iter().enumerate() {
        for _ in 0..=i {
            store.add_relationship(Relation::new("spoke", *hub, leaf)).unwrap();
        }
    }

    assert_eq!(store.all_nodes().out_e().count(), 6);
    assert_eq!(store.all_nodes().out_v().count(), store.relation_count());

    let sources: Vec<_> = store.all_nodes().out_e().map(|r| r.source().index()).collect();
    assert_eq!(
        sources,
        vec![hubs[0], hubs[1], hubs[1], hubs[2], hubs[2], hubs[2]]
    );
}
