//! Data part indexing
//!
//! Builds the session's name→`DataPart` map and re-links stored rules
//! and targeted actions after inventories are rebuilt. Addressing is a
//! global decision: while every inventory has exactly one part, parts go
//! by inventory code (`"A"`); as soon as any inventory has a second
//! part, every name switches to inventory-part codes (`"A1"`, `"B2"`).
//! The index is an explicit value owned by the session, never global
//! state.

use std::collections::BTreeMap;

use sync_inventory::{DataPart, Inventory};

use crate::actions::AtomicAction;
use crate::rules::SynchronizationRule;

/// Name→part map for one inventory generation
#[derive(Debug, Clone, Default)]
pub struct DataPartIndex {
    by_name: BTreeMap<String, DataPart>,
}

impl DataPartIndex {
    /// Build the map for the given inventories
    pub fn build(inventories: &[Inventory]) -> Self {
        let single_part_everywhere = inventories.iter().all(|i| i.parts.len() == 1);

        let mut by_name = BTreeMap::new();
        if single_part_everywhere {
            for inventory in inventories {
                by_name.insert(inventory.code.clone(), DataPart::inventory(&inventory.code));
            }
        } else {
            for inventory in inventories {
                for part in &inventory.parts {
                    by_name.insert(
                        part.code.clone(),
                        DataPart::inventory_part(&inventory.code, &part.code),
                    );
                }
            }
        }

        tracing::debug!(
            part_count = by_name.len(),
            by_inventory = single_part_everywhere,
            "Built data part index"
        );
        Self { by_name }
    }

    /// Resolve a part by name
    pub fn get(&self, name: &str) -> Option<&DataPart> {
        self.by_name.get(name)
    }

    /// Every addressable part, in name order
    pub fn all(&self) -> impl Iterator<Item = &DataPart> {
        self.by_name.values()
    }

    /// Re-resolve every part reference in the given rules
    ///
    /// A rule referencing a name that no longer resolves is flagged
    /// inapplicable, not dropped and not an error: the authoring layer
    /// decides what to do with it.
    pub fn remap_rules(&self, rules: &mut [SynchronizationRule]) {
        for rule in rules {
            let mut applicable = true;

            for condition in &mut rule.conditions {
                applicable &= self.remap_part(&mut condition.source);
                if !condition.destination.is_virtual() {
                    applicable &= self.remap_part(&mut condition.destination);
                }
            }
            for template in &mut rule.actions {
                if let Some(source) = template.source.as_mut() {
                    applicable &= self.remap_part(source);
                }
                if let Some(destination) = template.destination.as_mut() {
                    applicable &= self.remap_part(destination);
                }
            }

            if !applicable {
                tracing::warn!(rule_id = %rule.id, "Rule references a vanished data part");
            }
            rule.is_applicable = applicable;
        }
    }

    /// Re-resolve every part reference in the given targeted actions
    ///
    /// Actions whose endpoints no longer resolve are dropped.
    pub fn remap_actions(&self, actions: &mut Vec<AtomicAction>) {
        actions.retain_mut(|action| {
            let mut applicable = true;
            if let Some(source) = action.source.as_mut() {
                applicable &= self.remap_part(source);
            }
            if let Some(destination) = action.destination.as_mut() {
                applicable &= self.remap_part(destination);
            }
            if !applicable {
                tracing::warn!(
                    action_id = %action.id,
                    linking_data = %action.path_identity.linking_data,
                    "Dropping targeted action referencing a vanished data part"
                );
            }
            applicable
        });
    }

    /// Replace a part with its fresh resolution; false when it vanished
    fn remap_part(&self, part: &mut DataPart) -> bool {
        match self.by_name.get(&part.name) {
            Some(fresh) => {
                *part = fresh.clone();
                true
            }
            None => false,
        }
    }
}
