//! GraphLib
//!
//! An embeddable in-memory property graph: identity-bearing nodes and typed
//! directed relations, each with an ordered property bag, queried through a
//! composable traversal algebra and persisted to an XML document.
//!
//! # Architecture
//!
//! - [`graph`]: entity model and the append-only [`GraphStore`]. Nodes and
//!   relations live in arenas owned by the store and refer to each other by
//!   index, so the node -> relation -> node cycle needs no shared ownership.
//! - [`traversal`]: lazy iterator adaptors (`has_id`, `has_label`, `has_key`,
//!   `values`, `out_v`, `out_e`) plus the `single` terminal accessor.
//! - [`persistence`]: deterministic XML writer and two-phase reader.
//!
//! The store is single-threaded and unsynchronized. Callers that share it
//! across threads must provide their own mutual exclusion.
//!
//! ## Example Usage
//!
//! ```rust
//! use graphlib::graph::{property_map, EntityId, GraphStore, Node, Relation};
//! use graphlib::traversal::{NodeTraversal, Traversal};
//!
//! let mut store = GraphStore::new();
//! let bob = store.add_node(Node::new_with_properties(
//!     EntityId::new_v4(),
//!     property_map([("Name", "Bob")]),
//!     ["Person"],
//! ));
//! let alice = store.add_node(Node::new(["Person"]));
//! store.add_relationship(Relation::new("KNOWS", bob, alice)).unwrap();
//!
//! assert_eq!(store.all_nodes().has_label(["Person"]).count(), 2);
//! assert_eq!(store.all_nodes().has_key(["Name"]).out_v().count(), 1);
//!
//! let xml = store.to_xml_string().unwrap();
//! let reloaded = GraphStore::from_xml_str(&xml).unwrap();
//! assert_eq!(reloaded.relation_count(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;
pub mod persistence;
pub mod traversal;

// Re-export main types for convenience
pub use graph::{
    property_map, Entity, EntityId, GraphError, GraphResult, GraphStore, Label, Node, NodeIndex,
    NodeRef, PropertyMap, Relation, RelationIndex, RelationRef, RelationType,
};

pub use traversal::{NodeTraversal, QueryError, QueryResult, RelationTraversal, Traversal};

pub use persistence::{CodecConfig, CodecError, CodecResult, IndentStyle, XmlCodec, FORMAT_VERSION};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
