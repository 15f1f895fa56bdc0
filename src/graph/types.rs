//! Core type definitions for the graph store

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier shared by nodes and relations
///
/// Uniqueness is a convention of the caller; the store does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh random identifier
    pub fn new_v4() -> Self {
        EntityId(Uuid::new_v4())
    }

    pub fn parse_str(input: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(input).map(EntityId)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        EntityId(id)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityId::parse_str(s)
    }
}

/// Position of a node in the store's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    pub fn new(index: usize) -> Self {
        NodeIndex(index)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIndex({})", self.0)
    }
}

/// Position of a relation in the store's relation arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RelationIndex(pub usize);

impl RelationIndex {
    pub fn new(index: usize) -> Self {
        RelationIndex(index)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RelationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelationIndex({})", self.0)
    }
}

/// Node label (e.g., "Person", "Train")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Label(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label(s.to_string())
    }
}

/// Relation type (e.g., "KNOWS", "test")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RelationType(String);

impl RelationType {
    pub fn new(relation_type: impl Into<String>) -> Self {
        RelationType(relation_type.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RelationType {
    fn from(s: String) -> Self {
        RelationType(s)
    }
}

impl From<&str> for RelationType {
    fn from(s: &str) -> Self {
        RelationType(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_display_and_parse() {
        let id = EntityId::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
        assert_eq!(format!("{}", id), "00000000-0000-0000-0000-000000000001");

        let reparsed: EntityId = id.to_string().parse().unwrap();
        assert_eq!(id, reparsed);
    }

    #[test]
    fn test_entity_id_rejects_garbage() {
        assert!(EntityId::parse_str("not-a-guid").is_err());
    }

    #[test]
    fn test_fresh_ids_differ() {
        assert_ne!(EntityId::new_v4(), EntityId::new_v4());
    }

    #[test]
    fn test_indices() {
        let idx = NodeIndex::new(3);
        assert_eq!(idx.as_usize(), 3);
        assert_eq!(format!("{}", idx), "NodeIndex(3)");
        assert_eq!(format!("{}", RelationIndex::new(7)), "RelationIndex(7)");
    }

    #[test]
    fn test_label() {
        let label = Label::new("Person");
        assert_eq!(label.as_str(), "Person");
        assert_eq!(format!("{}", label), "Person");

        let label2: Label = "Train".into();
        assert_eq!(label2.as_str(), "Train");
    }

    #[test]
    fn test_relation_type() {
        let relation_type = RelationType::new("KNOWS");
        assert_eq!(relation_type.as_str(), "KNOWS");
        assert_eq!(format!("{}", relation_type), "KNOWS");
    }
}
