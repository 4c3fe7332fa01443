//! Generic entity registry.
//!
//! Handlers, reasoning procedures, and tools are all registered by name
//! in the same registry structure. The registry is populated once at
//! startup and read-only on the request path, so lookups need no locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Anything that can live in a registry: it has a unique name and a
/// human-readable description.
pub trait Describe {
    /// The unique registration key.
    fn name(&self) -> &str;

    /// What this entity does (for introspection and diagnostics).
    fn description(&self) -> &str;
}

/// Name + description metadata for a registered entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub name: String,
    pub description: String,
}

/// A name-keyed registry with deterministic iteration order.
///
/// Registration is always override-or-insert: registering a name that
/// already exists replaces the previous entry (last write wins). Call
/// sites rely on this to re-register singletons. Iteration order is
/// insertion order; an overwrite keeps the entity's original position.
pub struct EntityRegistry<T> {
    entries: HashMap<String, T>,
    order: Vec<String>,
}

impl<T: Describe> EntityRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register an entity. Replaces any existing entity with the same name.
    pub fn register(&mut self, entity: T) {
        let name = entity.name().to_string();
        if self.entries.insert(name.clone(), entity).is_none() {
            self.order.push(name);
        }
    }

    /// Get an entity by name. Absence is a normal outcome, not a fault.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// The first registered entity — the fallback target when a lookup
    /// by name misses.
    pub fn first(&self) -> Option<&T> {
        self.order.first().and_then(|name| self.entries.get(name))
    }

    /// List all registered entities in registration order.
    pub fn list(&self) -> Vec<EntityInfo> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name))
            .map(|entity| EntityInfo {
                name: entity.name().to_string(),
                description: entity.description().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<T: Describe> Default for EntityRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
