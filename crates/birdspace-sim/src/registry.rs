//! Insertion-ordered entity registry.
//!
//! The hecs `World` stores components; the registry fixes the order in which
//! entities are updated and drawn, and keeps a secondary index of the
//! entities that carry health.

use hecs::Entity;

#[derive(Debug, Default, Clone)]
pub struct Registry {
    order: Vec<Entity>,
    damageable: Vec<Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity. Damageable entities are also added to the health index.
    pub fn register(&mut self, entity: Entity, damageable: bool) {
        self.order.push(entity);
        if damageable {
            self.damageable.push(entity);
        }
    }

    /// Remove an entity from both collections. Linear in the entity count.
    /// Returns false if the entity was not registered.
    pub fn unregister(&mut self, entity: Entity) -> bool {
        if let Some(i) = self.damageable.iter().position(|e| *e == entity) {
            self.damageable.remove(i);
        }
        match self.order.iter().position(|e| *e == entity) {
            Some(i) => {
                self.order.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.order.contains(&entity)
    }

    /// Entities in insertion order (draw order).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Entity> + '_ {
        self.order.iter().copied()
    }

    /// Snapshot of the update order: reverse insertion order.
    ///
    /// Entities registered while the snapshot is walked are not visited this
    /// frame; entities removed meanwhile must be skipped by the caller.
    pub fn update_order(&self) -> Vec<Entity> {
        self.order.iter().rev().copied().collect()
    }

    /// Entities with health, in insertion order.
    pub fn damageable(&self) -> &[Entity] {
        &self.damageable
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.damageable.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
