//! Data parts
//!
//! A `DataPart` names one side of a condition or action. It is backed by
//! a whole inventory, by one inventory part, or by nothing at all: a
//! virtual part exists only to carry a literal value (a fixed date, size
//! or name pattern) supplied directly in a condition.

use serde::{Deserialize, Serialize};

use crate::identity::inventory_code_of;
use crate::inventory::FileDescription;

/// What a data part refers to
///
/// "No backing filesystem" is a variant, not a null field, so virtual
/// parts are a type-level fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataPartBacking {
    /// A whole inventory (single-part addressing regime)
    Inventory(String),
    /// One inventory part (multi-part addressing regime)
    InventoryPart { inventory: String, part: String },
    /// No backing; the part only carries a literal in a condition
    Virtual,
}

/// A reference to one side of a condition or action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataPart {
    /// Display and lookup name (e.g. "A", "B2", or a literal label)
    pub name: String,
    /// What the name resolves to
    pub backing: DataPartBacking,
}

impl DataPart {
    /// A part addressing a whole inventory by code
    pub fn inventory(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            backing: DataPartBacking::Inventory(code),
        }
    }

    /// A part addressing one inventory part by code
    pub fn inventory_part(inventory: impl Into<String>, part: impl Into<String>) -> Self {
        let part = part.into();
        Self {
            name: part.clone(),
            backing: DataPartBacking::InventoryPart {
                inventory: inventory.into(),
                part,
            },
        }
    }

    /// A virtual part holding a condition literal
    pub fn virtual_part(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backing: DataPartBacking::Virtual,
        }
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.backing, DataPartBacking::Virtual)
    }

    /// True when the given description was scanned from this part
    pub fn covers(&self, description: &FileDescription) -> bool {
        match &self.backing {
            DataPartBacking::Inventory(code) => {
                inventory_code_of(&description.inventory_part_code) == code
            }
            DataPartBacking::InventoryPart { part, .. } => {
                description.inventory_part_code == *part
            }
            DataPartBacking::Virtual => false,
        }
    }
}
