//! Identity & Status Builder
//!
//! Turns raw per-part scan records into one `ComparisonItem` per distinct
//! logical entry and computes which inventories and parts are missing
//! each item. Pure grouping and set difference over the snapshot; the
//! builder performs no I/O.

use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::identity::{ContentIdentity, ContentIdentityCore, PathIdentity};
use crate::inventory::{FileDescription, Inventory, LinkingKey};
use crate::item::{ComparisonItem, ContentRepartition};

/// Builds comparison items from a session's inventories
#[derive(Debug, Clone, Copy)]
pub struct ComparisonItemBuilder {
    linking_key: LinkingKey,
}

impl ComparisonItemBuilder {
    pub fn new(linking_key: LinkingKey) -> Self {
        Self { linking_key }
    }

    /// Build one item per distinct `(file_system_type, linking_data)` pair
    ///
    /// Within an item, descriptions sharing `(signature_hash, size)` are
    /// grouped into one `ContentIdentity`. Output is sorted by linking
    /// data, then type, so runs over the same snapshot are deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot is malformed: duplicate
    /// inventory codes, or parts/descriptions wired to the wrong owner.
    pub fn build(&self, inventories: &[Inventory]) -> Result<Vec<ComparisonItem>> {
        Self::validate(inventories)?;
        let mut by_identity: HashMap<PathIdentity, ComparisonItem> = HashMap::new();

        for inventory in inventories {
            for part in &inventory.parts {
                for description in &part.descriptions {
                    let identity = self.path_identity(description);
                    let item = by_identity
                        .entry(identity.clone())
                        .or_insert_with(|| ComparisonItem::new(identity));
                    Self::attach(item, description.clone());
                }
            }
        }

        let all_inventories: BTreeSet<String> =
            inventories.iter().map(|i| i.code.clone()).collect();
        let all_parts: BTreeSet<String> = inventories
            .iter()
            .flat_map(|i| i.parts.iter().map(|p| p.code.clone()))
            .collect();

        let mut items: Vec<ComparisonItem> = by_identity.into_values().collect();
        for item in &mut items {
            item.content_repartition = Self::repartition(item, &all_inventories, &all_parts);
        }
        items.sort_by(|a, b| {
            a.path_identity
                .linking_data
                .cmp(&b.path_identity.linking_data)
                .then_with(|| {
                    a.path_identity
                        .file_system_type
                        .cmp(&b.path_identity.file_system_type)
                })
        });

        tracing::debug!(
            item_count = items.len(),
            inventory_count = inventories.len(),
            "Built comparison items"
        );
        Ok(items)
    }

    /// Reject malformed snapshots before grouping
    fn validate(inventories: &[Inventory]) -> Result<()> {
        let mut codes = BTreeSet::new();
        for inventory in inventories {
            if !codes.insert(inventory.code.as_str()) {
                return Err(Error::DuplicateInventoryCode {
                    code: inventory.code.clone(),
                });
            }
            for part in &inventory.parts {
                if part.inventory_code != inventory.code {
                    return Err(Error::UnknownInventory {
                        part: part.code.clone(),
                        inventory: part.inventory_code.clone(),
                    });
                }
                for description in &part.descriptions {
                    if description.inventory_part_code != part.code {
                        return Err(Error::UnknownInventoryPart {
                            path: description.relative_path.clone(),
                            part: description.inventory_part_code.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn path_identity(&self, description: &FileDescription) -> PathIdentity {
        let linking_data = description.linking_data(self.linking_key).to_string();
        PathIdentity::new(
            description.file_system_type,
            linking_data.clone(),
            description.name.clone(),
            linking_data,
        )
    }

    /// Attach a description to the content identity matching its hash and
    /// size, creating the identity on first sight of that content
    fn attach(item: &mut ComparisonItem, description: FileDescription) {
        let core = match (&description.signature_hash, description.size) {
            (None, None) => None,
            (hash, size) => Some(ContentIdentityCore {
                signature_hash: hash.clone(),
                size,
            }),
        };

        if let Some(existing) = item
            .content_identities
            .iter_mut()
            .find(|ci| ci.core == core)
        {
            existing.descriptions.push(description);
        } else {
            let mut content = ContentIdentity::new(core);
            content.descriptions.push(description);
            item.content_identities.push(content);
        }
    }

    fn repartition(
        item: &ComparisonItem,
        all_inventories: &BTreeSet<String>,
        all_parts: &BTreeSet<String>,
    ) -> ContentRepartition {
        let mut seen_inventories = BTreeSet::new();
        let mut seen_parts = BTreeSet::new();
        for content in &item.content_identities {
            for code in content.inventory_codes() {
                seen_inventories.insert(code.to_string());
            }
            for code in content.part_codes() {
                seen_parts.insert(code.to_string());
            }
        }

        ContentRepartition {
            missing_inventories: all_inventories.difference(&seen_inventories).cloned().collect(),
            missing_inventory_parts: all_parts.difference(&seen_parts).cloned().collect(),
        }
    }
}
