//! Traversal steps and projections

use crate::graph::{Entity, NodeRef, OutRelations, RelationRef};
use std::fmt;
use std::iter::{FlatMap, Map};

/// Outgoing relations of every input node, node-major then registration order
pub type OutE<'g, I> = FlatMap<I, OutRelations<'g>, fn(NodeRef<'g>) -> OutRelations<'g>>;

/// Targets of the outgoing relations of every input node
pub type OutV<'g, I> = Map<OutE<'g, I>, fn(RelationRef<'g>) -> NodeRef<'g>>;

pub(super) fn out_e<'g, I>(iter: I) -> OutE<'g, I>
where
    I: Iterator<Item = NodeRef<'g>>,
{
    iter.flat_map(NodeRef::out_relations as fn(NodeRef<'g>) -> OutRelations<'g>)
}

pub(super) fn out_v<'g, I>(iter: I) -> OutV<'g, I>
where
    I: Iterator<Item = NodeRef<'g>>,
{
    out_e(iter).map(target_of as fn(RelationRef<'g>) -> NodeRef<'g>)
}

fn target_of(relation: RelationRef<'_>) -> NodeRef<'_> {
    relation.target()
}

/// Property values of each entity, entity-major and key-minor
///
/// Keys an entity lacks are skipped.
pub struct Values<I: Iterator> {
    iter: I,
    keys: Vec<String>,
    current: Option<I::Item>,
    pos: usize,
}

impl<I: Iterator> Values<I> {
    pub(super) fn new(iter: I, keys: Vec<String>) -> Self {
        Self {
            iter,
            keys,
            current: None,
            pos: 0,
        }
    }
}

impl<I> Iterator for Values<I>
where
    I: Iterator,
    I::Item: Entity,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(entity) = &self.current {
                while self.pos < self.keys.len() {
                    let key = &self.keys[self.pos];
                    self.pos += 1;
                    if let Some(value) = entity.property(key) {
                        return Some(value.to_string());
                    }
                }
            }
            self.current = Some(self.iter.next()?);
            self.pos = 0;
        }
    }
}

impl<I> Clone for Values<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            keys: self.keys.clone(),
            current: self.current.clone(),
            pos: self.pos,
        }
    }
}

impl<I> fmt::Debug for Values<I>
where
    I: Iterator + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values")
            .field("iter", &self.iter)
            .field("keys", &self.keys)
            .field("pos", &self.pos)
            .finish()
    }
}
