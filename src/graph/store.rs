//! In-memory graph storage implementation
//!
//! The store owns two append-only arenas, one for nodes and one for relations.
//! A relation is a member of the graph only when it sits in the relation arena
//! AND in its source node's outgoing list; `add_relationship` is the single
//! place where both placements happen.

use super::node::Node;
use super::property::{Entity, PropertyMap};
use super::relation::Relation;
use super::types::{EntityId, NodeIndex, RelationIndex};
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;
use std::slice;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Invalid relation: source node {0} is not a member of the store")]
    InvalidRelationSource(NodeIndex),

    #[error("Invalid relation: target node {0} is not a member of the store")]
    InvalidRelationTarget(NodeIndex),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes: arena of nodes in insertion order
/// - relations: arena of relations in insertion order
///
/// Node identifiers are not checked for uniqueness.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    relations: Vec<Relation>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, returning its handle
    pub fn add_node(&mut self, mut node: Node) -> NodeIndex {
        // Adjacency is only ever built by add_relationship on this store.
        node.outgoing.clear();

        let index = NodeIndex::new(self.nodes.len());
        debug!(id = %node.id, %index, "adding node");
        self.nodes.push(node);
        index
    }

    /// Register a relation and link it into its source node's outgoing list
    pub fn add_relationship(&mut self, relation: Relation) -> GraphResult<RelationIndex> {
        let source = relation.source();
        let target = relation.target();
        if source.as_usize() >= self.nodes.len() {
            return Err(GraphError::InvalidRelationSource(source));
        }
        if target.as_usize() >= self.nodes.len() {
            return Err(GraphError::InvalidRelationTarget(target));
        }

        let index = RelationIndex::new(self.relations.len());
        debug!(
            id = %relation.id,
            relation_type = %relation.relation_type(),
            %source,
            %target,
            "adding relationship"
        );
        self.relations.push(relation);
        self.nodes[source.as_usize()].outgoing.push(index);
        Ok(index)
    }

    /// All nodes in insertion order, as a lazy view over live state
    pub fn all_nodes(&self) -> Nodes<'_> {
        Nodes {
            store: self,
            inner: 0..self.nodes.len(),
        }
    }

    /// All relations in insertion order
    pub fn all_relations(&self) -> Relations<'_> {
        Relations {
            store: self,
            inner: 0..self.relations.len(),
        }
    }

    pub fn node(&self, index: NodeIndex) -> Option<NodeRef<'_>> {
        self.nodes.get(index.as_usize()).map(|_| NodeRef { store: self, index })
    }

    pub fn relation(&self, index: RelationIndex) -> Option<RelationRef<'_>> {
        self.relations
            .get(index.as_usize())
            .map(|_| RelationRef { store: self, index })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relations.is_empty()
    }
}

/// Borrowed view of a node inside a store
///
/// Carries the store so traversal steps can follow outgoing relations.
#[derive(Clone, Copy)]
pub struct NodeRef<'g> {
    store: &'g GraphStore,
    index: NodeIndex,
}

impl<'g> NodeRef<'g> {
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn node(&self) -> &'g Node {
        &self.store.nodes[self.index.as_usize()]
    }

    /// Outgoing relations in the order they were registered
    pub fn out_relations(self) -> OutRelations<'g> {
        OutRelations {
            store: self.store,
            inner: self.node().outgoing.iter(),
        }
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("id", &self.node().id)
            .finish()
    }
}

impl Entity for NodeRef<'_> {
    fn id(&self) -> EntityId {
        self.node().id
    }

    fn properties(&self) -> &PropertyMap {
        &self.node().properties
    }
}

/// Borrowed view of a relation inside a store
#[derive(Clone, Copy)]
pub struct RelationRef<'g> {
    store: &'g GraphStore,
    index: RelationIndex,
}

impl<'g> RelationRef<'g> {
    pub fn index(&self) -> RelationIndex {
        self.index
    }

    pub fn relation(&self) -> &'g Relation {
        &self.store.relations[self.index.as_usize()]
    }

    pub fn source(&self) -> NodeRef<'g> {
        NodeRef {
            store: self.store,
            index: self.relation().source(),
        }
    }

    pub fn target(&self) -> NodeRef<'g> {
        NodeRef {
            store: self.store,
            index: self.relation().target(),
        }
    }
}

impl Deref for RelationRef<'_> {
    type Target = Relation;

    fn deref(&self) -> &Relation {
        self.relation()
    }
}

impl fmt::Debug for RelationRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationRef")
            .field("index", &self.index)
            .field("id", &self.relation().id)
            .finish()
    }
}

impl Entity for RelationRef<'_> {
    fn id(&self) -> EntityId {
        self.relation().id
    }

    fn properties(&self) -> &PropertyMap {
        &self.relation().properties
    }
}

/// Iterator over every node of a store
#[derive(Debug, Clone)]
pub struct Nodes<'g> {
    store: &'g GraphStore,
    inner: std::ops::Range<usize>,
}

impl<'g> Iterator for Nodes<'g> {
    type Item = NodeRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.inner.next()?;
        Some(NodeRef {
            store: self.store,
            index: NodeIndex::new(index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Nodes<'_> {}
impl FusedIterator for Nodes<'_> {}

/// Iterator over every relation of a store
#[derive(Debug, Clone)]
pub struct Relations<'g> {
    store: &'g GraphStore,
    inner: std::ops::Range<usize>,
}

impl<'g> Iterator for Relations<'g> {
    type Item = RelationRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.inner.next()?;
        Some(RelationRef {
            store: self.store,
            index: RelationIndex::new(index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Relations<'_> {}
impl FusedIterator for Relations<'_> {}

/// Iterator over one node's outgoing relations
#[derive(Debug, Clone)]
pub struct OutRelations<'g> {
    store: &'g GraphStore,
    inner: slice::Iter<'g, RelationIndex>,
}

impl<'g> Iterator for OutRelations<'g> {
    type Item = RelationRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = *self.inner.next()?;
        Some(RelationRef {
            store: self.store,
            index,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for OutRelations<'_> {}
impl FusedIterator for OutRelations<'_> {}
