//! Node implementation for the property graph

use super::property::{Entity, PropertyMap};
use super::types::{EntityId, Label, RelationIndex};
use serde::{Deserialize, Serialize};

/// A node in the property graph
///
/// Nodes have:
/// - An identifier
/// - Ordered labels (repeats allowed)
/// - Ordered properties
/// - The outgoing relations registered through the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Identifier for this node
    pub id: EntityId,

    /// Labels in insertion order
    pub labels: Vec<Label>,

    /// Properties associated with this node
    pub properties: PropertyMap,

    /// Outgoing relations, appended only by `GraphStore::add_relationship`
    #[serde(skip)]
    pub(crate) outgoing: Vec<RelationIndex>,
}

impl Node {
    /// Create a node with a fresh identifier
    pub fn new<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> Self {
        Self::new_with_properties(EntityId::new_v4(), PropertyMap::new(), labels)
    }

    /// Create a node with a caller-supplied identifier
    pub fn new_with_id<L: Into<Label>>(id: EntityId, labels: impl IntoIterator<Item = L>) -> Self {
        Self::new_with_properties(id, PropertyMap::new(), labels)
    }

    /// Create a node with an identifier, properties and labels
    pub fn new_with_properties<L: Into<Label>>(
        id: EntityId,
        properties: PropertyMap,
        labels: impl IntoIterator<Item = L>,
    ) -> Self {
        Node {
            id,
            labels: labels.into_iter().map(Into::into).collect(),
            properties,
            outgoing: Vec::new(),
        }
    }

    /// Append a label to this node
    pub fn add_label(&mut self, label: impl Into<Label>) {
        self.labels.push(label.into());
    }

    /// Check if node has a specific label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == label)
    }

    /// Set a property value, returning the previous one
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Relations leaving this node, in registration order
    pub fn outgoing_relations(&self) -> &[RelationIndex] {
        &self.outgoing
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}

impl Entity for Node {
    fn id(&self) -> EntityId {
        self.id
    }

    fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::property::property_map;

    #[test]
    fn test_create_node_with_labels() {
        let node = Node::new(["Person", "Train"]);
        assert_eq!(node.label_count(), 2);
        assert!(node.has_label("Person"));
        assert!(node.has_label("Train"));
        assert!(!node.has_label("Boat"));
        assert!(node.outgoing_relations().is_empty());
    }

    #[test]
    fn test_repeated_labels_are_kept() {
        let mut node = Node::new(["Person"]);
        node.add_label("Person");
        assert_eq!(node.label_count(), 2);
    }

    #[test]
    fn test_node_properties() {
        let id = EntityId::new_v4();
        let mut node = Node::new_with_properties(id, property_map([("Name", "Bob")]), ["Person"]);

        assert_eq!(node.get_property("Name"), Some("Bob"));
        assert_eq!(node.set_property("Name", "Robert"), Some("Bob".to_string()));
        assert_eq!(node.set_property("Hobby", "Sportsball"), None);
        assert_eq!(node.property("Hobby"), Some("Sportsball"));
        assert!(node.has_property("Name"));
        assert!(!node.has_property("Bloodtype"));
    }

    #[test]
    fn test_node_equality_is_by_id() {
        let id = EntityId::new_v4();
        let node1 = Node::new_with_id(id, ["Person"]);
        let node2 = Node::new_with_id(id, ["Boat"]);
        let node3 = Node::new(["Person"]);

        assert_eq!(node1, node2);
        assert_ne!(node1, node3);
    }
}
