//! Action repository
//!
//! The engine treats the store of committed actions as a capability
//! contract: an ordered, per-item multiset with get/add/remove. The
//! surrounding application may supply an observable or persistent
//! implementation; `InMemoryActionRepository` is the default. The store
//! is the only shared mutable state in the engine, kept behind a single
//! lock.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use sync_inventory::PathIdentity;

use crate::actions::AtomicAction;
use crate::error::{Error, Result};

/// Ordered per-item store of committed atomic actions
pub trait ActionRepository: Send + Sync {
    /// Actions committed for one item, in insertion order
    fn actions_for(&self, item: &PathIdentity) -> Result<Vec<AtomicAction>>;

    /// Insert an action, or replace the stored action with the same id
    fn add_or_update(&self, action: AtomicAction) -> Result<()>;

    /// Insert or replace a batch
    fn add_or_update_many(&self, actions: Vec<AtomicAction>) -> Result<()> {
        for action in actions {
            self.add_or_update(action)?;
        }
        Ok(())
    }

    /// Remove one action by owning item and id; absent ids are a no-op
    fn remove(&self, item: &PathIdentity, action_id: Uuid) -> Result<()>;

    /// Drop every action committed for the item
    fn remove_all_for(&self, item: &PathIdentity) -> Result<()>;

    /// Every committed action, grouped by item in item-key order
    fn all(&self) -> Result<Vec<AtomicAction>>;
}

/// Default in-memory store behind a single mutex
#[derive(Debug, Default)]
pub struct InMemoryActionRepository {
    actions: Mutex<HashMap<PathIdentity, Vec<AtomicAction>>>,
}

impl InMemoryActionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<PathIdentity, Vec<AtomicAction>>>> {
        self.actions.lock().map_err(|_| Error::Repository {
            message: "action store lock poisoned".to_string(),
        })
    }
}

impl ActionRepository for InMemoryActionRepository {
    fn actions_for(&self, item: &PathIdentity) -> Result<Vec<AtomicAction>> {
        Ok(self.locked()?.get(item).cloned().unwrap_or_default())
    }

    fn add_or_update(&self, action: AtomicAction) -> Result<()> {
        let mut store = self.locked()?;
        let actions = store.entry(action.path_identity.clone()).or_default();
        match actions.iter_mut().find(|a| a.id == action.id) {
            Some(existing) => *existing = action,
            None => actions.push(action),
        }
        Ok(())
    }

    fn remove(&self, item: &PathIdentity, action_id: Uuid) -> Result<()> {
        let mut store = self.locked()?;
        if let Some(actions) = store.get_mut(item) {
            actions.retain(|a| a.id != action_id);
            if actions.is_empty() {
                store.remove(item);
            }
        }
        Ok(())
    }

    fn remove_all_for(&self, item: &PathIdentity) -> Result<()> {
        self.locked()?.remove(item);
        Ok(())
    }

    fn all(&self) -> Result<Vec<AtomicAction>> {
        let store = self.locked()?;
        let mut keys: Vec<&PathIdentity> = store.keys().collect();
        keys.sort_by(|a, b| {
            a.linking_data
                .cmp(&b.linking_data)
                .then_with(|| a.file_system_type.cmp(&b.file_system_type))
        });
        Ok(keys
            .into_iter()
            .flat_map(|k| store[k].iter().cloned())
            .collect())
    }
}
