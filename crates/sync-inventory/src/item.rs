//! Comparison items
//!
//! A `ComparisonItem` is one logical entry matched across every inventory
//! in the session, carrying each distinct content version observed for it
//! and the derived picture of where it is missing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::identity::{ContentIdentity, PathIdentity};
use crate::inventory::FileDescription;
use crate::part::DataPart;

/// Which inventories and parts are missing an item entirely
///
/// An inventory (part) is missing iff no description in any of the item's
/// content identities references it. Pure set difference, no I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRepartition {
    /// Inventory codes with no trace of the item
    pub missing_inventories: BTreeSet<String>,
    /// Inventory part codes with no trace of the item
    pub missing_inventory_parts: BTreeSet<String>,
}

/// One logical entry matched across all inventories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonItem {
    /// Cross-inventory identity of the entry
    pub path_identity: PathIdentity,
    /// Every distinct content version observed, in first-seen order
    pub content_identities: Vec<ContentIdentity>,
    /// Where the item is missing
    pub content_repartition: ContentRepartition,
}

impl ComparisonItem {
    pub fn new(path_identity: PathIdentity) -> Self {
        Self {
            path_identity,
            content_identities: Vec::new(),
            content_repartition: ContentRepartition::default(),
        }
    }

    /// Every content identity that has a description covered by the part
    ///
    /// A healthy snapshot yields at most one; more than one means the
    /// scanner handed us contradictory data for the same part.
    pub fn content_identities_for(&self, part: &DataPart) -> Vec<&ContentIdentity> {
        self.content_identities
            .iter()
            .filter(|ci| ci.descriptions.iter().any(|d| part.covers(d)))
            .collect()
    }

    /// The description the item has on the given part, if any
    pub fn description_for(&self, part: &DataPart) -> Option<&FileDescription> {
        self.content_identities
            .iter()
            .flat_map(|ci| ci.descriptions.iter())
            .find(|d| part.covers(d))
    }

    /// True when any description of the item is covered by the part
    pub fn is_present_on(&self, part: &DataPart) -> bool {
        self.description_for(part).is_some()
    }
}
