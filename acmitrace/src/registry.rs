//! The entity registry.
//!
//! Append-only for the lifetime of one decode run: entities are never
//! deleted, a `Removed` event only annotates a timeline. Iteration is in
//! registration order, which parent inference relies on for
//! deterministic tie-breaking.

use std::collections::HashMap;

use crate::entity::Entity;

/// Id-to-entity map preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entities: HashMap<u64, Entity>,
    order: Vec<u64>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn get(&self, id: u64) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Register an entity. Ids are unique; registering an id twice would
    /// break the append-only history, so the second insert is refused.
    pub fn insert(&mut self, entity: Entity) {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            return;
        }
        self.entities.insert(id, entity);
        self.order.push(id);
    }

    /// Entities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Schema;

    #[test]
    fn test_iteration_follows_registration_order() {
        let mut registry = Registry::new();
        registry.insert(Entity::new(0x300, Schema::Object));
        registry.insert(Entity::new(0x100, Schema::Object));
        registry.insert(Entity::new(0x200, Schema::Object));

        let ids: Vec<u64> = registry.iter().map(Entity::id).collect();
        assert_eq!(ids, vec![0x300, 0x100, 0x200]);
    }

    #[test]
    fn test_duplicate_insert_is_refused() {
        let mut registry = Registry::new();
        registry.insert(Entity::new(0x100, Schema::Object));
        registry.insert(Entity::new(0x100, Schema::Object));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup() {
        let mut registry = Registry::new();
        assert!(!registry.contains(0x100));
        registry.insert(Entity::new(0x100, Schema::Object));
        assert!(registry.contains(0x100));
        assert_eq!(registry.get(0x100).map(Entity::id), Some(0x100));
        assert!(registry.get(0x200).is_none());
    }
}
