//! Filtering operators
//!
//! Each filter keeps the items of its input that match and preserves their
//! order. Label, key and type filters use OR semantics: an item passes when
//! any one of the supplied strings matches.

use crate::graph::{Entity, EntityId, NodeRef, RelationRef};

/// Entities whose identifier equals a given id
#[derive(Debug, Clone)]
pub struct HasId<I> {
    iter: I,
    id: EntityId,
}

impl<I> HasId<I> {
    pub(super) fn new(iter: I, id: EntityId) -> Self {
        Self { iter, id }
    }
}

impl<I> Iterator for HasId<I>
where
    I: Iterator,
    I::Item: Entity,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.id;
        self.iter.find(|entity| entity.id() == id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

/// Entities carrying at least one of the given property keys
#[derive(Debug, Clone)]
pub struct HasKey<I> {
    iter: I,
    keys: Vec<String>,
}

impl<I> HasKey<I> {
    pub(super) fn new(iter: I, keys: Vec<String>) -> Self {
        Self { iter, keys }
    }
}

impl<I> Iterator for HasKey<I>
where
    I: Iterator,
    I::Item: Entity,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let keys = &self.keys;
        self.iter
            .find(|entity| keys.iter().any(|key| entity.has_property(key)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

/// Nodes carrying at least one of the given labels
#[derive(Debug, Clone)]
pub struct HasLabel<I> {
    iter: I,
    labels: Vec<String>,
}

impl<I> HasLabel<I> {
    pub(super) fn new(iter: I, labels: Vec<String>) -> Self {
        Self { iter, labels }
    }
}

impl<'g, I> Iterator for HasLabel<I>
where
    I: Iterator<Item = NodeRef<'g>>,
{
    type Item = NodeRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let labels = &self.labels;
        self.iter.find(|node| {
            node.labels
                .iter()
                .any(|label| labels.iter().any(|wanted| wanted == label.as_str()))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

/// Relations whose type is one of the given types
#[derive(Debug, Clone)]
pub struct HasType<I> {
    iter: I,
    types: Vec<String>,
}

impl<I> HasType<I> {
    pub(super) fn new(iter: I, types: Vec<String>) -> Self {
        Self { iter, types }
    }
}

impl<'g, I> Iterator for HasType<I>
where
    I: Iterator<Item = RelationRef<'g>>,
{
    type Item = RelationRef<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        let types = &self.types;
        self.iter.find(|relation| {
            let relation_type = relation.relation_type().as_str();
            types.iter().any(|wanted| wanted == relation_type)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}
