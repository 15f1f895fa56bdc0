//! Core graph store implementation
//!
//! This module implements the property graph data model with:
//! - Nodes with ordered labels and properties
//! - Directed, typed relations with properties
//! - Multiple relations between the same nodes
//! - Append-only arenas owned by the store, linked by index

pub mod node;
pub mod property;
pub mod relation;
pub mod store;
pub mod types;

// Re-export main types
pub use node::Node;
pub use property::{property_map, Entity, PropertyMap};
pub use relation::Relation;
pub use store::{
    GraphError, GraphResult, GraphStore, NodeRef, Nodes, OutRelations, RelationRef, Relations,
};
pub use types::{EntityId, Label, NodeIndex, RelationIndex, RelationType};
