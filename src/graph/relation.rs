//! Relation implementation for the property graph
//!
//! A relation is a directed, typed edge. Its endpoints are arena handles into
//! the store rather than owning references, so the node -> relation -> node
//! cycle never owns anything twice.

use super::property::{Entity, PropertyMap};
use super::types::{EntityId, NodeIndex, RelationType};
use serde::{Deserialize, Serialize};

/// A directed relation in the property graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// Identifier for this relation
    pub id: EntityId,

    /// Type of relationship (e.g., "KNOWS")
    relation_type: RelationType,

    /// Source node (relation goes FROM this node)
    source: NodeIndex,

    /// Target node (relation goes TO this node)
    target: NodeIndex,

    /// Properties associated with this relation
    pub properties: PropertyMap,
}

impl Relation {
    /// Create a relation with a fresh identifier
    pub fn new(relation_type: impl Into<RelationType>, source: NodeIndex, target: NodeIndex) -> Self {
        Self::new_with_properties(EntityId::new_v4(), relation_type, PropertyMap::new(), source, target)
    }

    /// Create a relation with a caller-supplied identifier
    pub fn new_with_id(
        id: EntityId,
        relation_type: impl Into<RelationType>,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Self {
        Self::new_with_properties(id, relation_type, PropertyMap::new(), source, target)
    }

    pub fn new_with_properties(
        id: EntityId,
        relation_type: impl Into<RelationType>,
        properties: PropertyMap,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Self {
        Relation {
            id,
            relation_type: relation_type.into(),
            source,
            target,
            properties,
        }
    }

    pub fn relation_type(&self) -> &RelationType {
        &self.relation_type
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    /// Set a property value, returning the previous one
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl Entity for Relation {
    fn id(&self) -> EntityId {
        self.id
    }

    fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Relation {}

impl std::hash::Hash for Relation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
