//! Composable traversal operators
//!
//! Pipelines are plain iterator chains. Every operator is lazy, keeps input
//! order, and is `Clone` whenever its input is, so a pipeline can be re-run:
//!
//! ```rust
//! use graphlib::graph::{property_map, EntityId, GraphStore, Node, Relation};
//! use graphlib::traversal::{NodeTraversal, Traversal};
//!
//! let mut store = GraphStore::new();
//! let bob_id = EntityId::new_v4();
//! let bob = store.add_node(Node::new_with_properties(
//!     bob_id,
//!     property_map([("Name", "Bob")]),
//!     ["Person"],
//! ));
//! let alice = store.add_node(Node::new_with_properties(
//!     EntityId::new_v4(),
//!     property_map([("Name", "Alice")]),
//!     ["Person"],
//! ));
//! store.add_relationship(Relation::new("test", bob, alice)).unwrap();
//!
//! let names: Vec<String> = store.all_nodes().has_id(bob_id).out_v().values(["Name"]).collect();
//! assert_eq!(names, vec!["Alice".to_string()]);
//! assert_eq!(store.all_nodes().has_label(["Person"]).count(), 2);
//! ```
//!
//! Pipelines borrow the store, so it cannot be structurally modified while
//! one is being enumerated.

pub mod filter;
pub mod step;

pub use filter::{HasId, HasKey, HasLabel, HasType};
pub use step::{OutE, OutV, Values};

use crate::graph::{Entity, EntityId, NodeRef, RelationRef};
use thiserror::Error;

/// Errors raised by terminal accessors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query returned no results")]
    EmptyResult,

    #[error("Query returned more than one result")]
    MultipleResults,
}

pub type QueryResult<T> = Result<T, QueryError>;

fn collect_strings<K, S>(items: K) -> Vec<String>
where
    K: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

/// Operators available on any sequence of entities
pub trait Traversal: Iterator + Sized {
    /// Keep entities whose identifier equals `id`
    fn has_id(self, id: EntityId) -> HasId<Self>
    where
        Self::Item: Entity,
    {
        HasId::new(self, id)
    }

    /// Keep entities that have any of `keys` as a property
    fn has_key<K, S>(self, keys: K) -> HasKey<Self>
    where
        Self::Item: Entity,
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HasKey::new(self, collect_strings(keys))
    }

    /// Emit the values of `keys` for each entity, skipping missing keys
    fn values<K, S>(self, keys: K) -> Values<Self>
    where
        Self::Item: Entity,
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Values::new(self, collect_strings(keys))
    }

    /// Unwrap a sequence that must hold exactly one element
    ///
    /// Stops pulling after the second element.
    fn single(mut self) -> QueryResult<Self::Item> {
        let first = self.next().ok_or(QueryError::EmptyResult)?;
        match self.next() {
            None => Ok(first),
            Some(_) => Err(QueryError::MultipleResults),
        }
    }
}

impl<I: Iterator> Traversal for I {}

/// Operators available on sequences of nodes
pub trait NodeTraversal<'g>: Iterator<Item = NodeRef<'g>> + Sized {
    /// Keep nodes carrying any of `labels`
    fn has_label<K, S>(self, labels: K) -> HasLabel<Self>
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HasLabel::new(self, collect_strings(labels))
    }

    /// Follow outgoing relations to their target nodes
    fn out_v(self) -> OutV<'g, Self> {
        step::out_v(self)
    }

    /// Follow outgoing relations, emitting the relations themselves
    fn out_e(self) -> OutE<'g, Self> {
        step::out_e(self)
    }
}

impl<'g, I: Iterator<Item = NodeRef<'g>>> NodeTraversal<'g> for I {}

/// Operators available on sequences of relations
pub trait RelationTraversal<'g>: Iterator<Item = RelationRef<'g>> + Sized {
    /// Keep relations whose type is any of `types`
    fn has_type<K, S>(self, types: K) -> HasType<Self>
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HasType::new(self, collect_strings(types))
    }
}

impl<'g, I: Iterator<Item = RelationRef<'g>>> RelationTraversal<'g> for I {}
