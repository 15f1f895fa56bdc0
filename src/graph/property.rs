//! Property bags for graph nodes and relations
//!
//! Properties are plain string pairs kept in insertion order. The order is
//! what makes serialized output byte-stable across runs.

use super::types::EntityId;
use indexmap::IndexMap;

/// Property map for storing node and relation properties
///
/// Keys are unique. Re-inserting an existing key replaces the value in place.
pub type PropertyMap = IndexMap<String, String>;

/// Build a property map from key/value pairs, preserving their order
pub fn property_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> PropertyMap
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Identity plus property bag, shared by nodes and relations
pub trait Entity {
    fn id(&self) -> EntityId;

    fn properties(&self) -> &PropertyMap;

    /// Get a property value
    fn property(&self, key: &str) -> Option<&str> {
        self.properties().get(key).map(String::as_str)
    }

    /// Check if property exists
    fn has_property(&self, key: &str) -> bool {
        self.properties().contains_key(key)
    }
}

impl<T: Entity + ?Sized> Entity for &T {
    fn id(&self) -> EntityId {
        (**self).id()
    }

    fn properties(&self) -> &PropertyMap {
        (**self).properties()
    }
}
