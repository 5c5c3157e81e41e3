//! Path and content identity
//!
//! `PathIdentity` is the cross-inventory identity of one logical entry;
//! `ContentIdentity` is one distinct content version (hash + size)
//! observed for that entry, together with every part-level description
//! sharing it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use crate::inventory::{FileDescription, FileSystemType};

/// Identity of one logical filesystem entry across all inventories
///
/// Equality and hashing are defined on `(file_system_type, linking_data)`
/// only; the display fields do not participate. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathIdentity {
    /// Whether the entry is a file or a directory
    pub file_system_type: FileSystemType,
    /// Display form of the linking key (what the UI shows)
    pub linking_key_value: String,
    /// File or directory name
    pub file_name: String,
    /// The actual equality key (relative path or name per session setting)
    pub linking_data: String,
}

impl PathIdentity {
    pub fn new(
        file_system_type: FileSystemType,
        linking_key_value: impl Into<String>,
        file_name: impl Into<String>,
        linking_data: impl Into<String>,
    ) -> Self {
        Self {
            file_system_type,
            linking_key_value: linking_key_value.into(),
            file_name: file_name.into(),
            linking_data: linking_data.into(),
        }
    }
}

impl PartialEq for PathIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.file_system_type == other.file_system_type && self.linking_data == other.linking_data
    }
}

impl Eq for PathIdentity {}

impl Hash for PathIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.file_system_type.hash(state);
        self.linking_data.hash(state);
    }
}

/// One content version: signature hash plus size
///
/// Directories have neither; a file that could not be analyzed carries a
/// size but no hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentIdentityCore {
    /// Content signature, `sha256:<hex>` form
    pub signature_hash: Option<String>,
    /// Size in bytes
    pub size: Option<u64>,
}

impl ContentIdentityCore {
    /// Build a core from raw content bytes
    ///
    /// Used by scanner adapters and test fixtures; the engine itself never
    /// reads file content.
    pub fn from_bytes(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self {
            signature_hash: Some(format!("sha256:{:x}", hasher.finalize())),
            size: Some(content.len() as u64),
        }
    }
}

/// One content version observed for a comparison item, with every
/// part-level description that shares it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIdentity {
    /// Hash + size of this version; `None` for directories
    pub core: Option<ContentIdentityCore>,
    /// Descriptions sharing this content, at most one per inventory part
    pub descriptions: Vec<FileDescription>,
}

impl ContentIdentity {
    pub fn new(core: Option<ContentIdentityCore>) -> Self {
        Self {
            core,
            descriptions: Vec::new(),
        }
    }

    /// Codes of the inventory parts holding this content
    pub fn part_codes(&self) -> BTreeSet<&str> {
        self.descriptions
            .iter()
            .map(|d| d.inventory_part_code.as_str())
            .collect()
    }

    /// Codes of the inventories holding this content
    ///
    /// Derived from part codes: a part code is its inventory code plus a
    /// numeric ordinal suffix.
    pub fn inventory_codes(&self) -> BTreeSet<&str> {
        self.descriptions
            .iter()
            .map(|d| inventory_code_of(&d.inventory_part_code))
            .collect()
    }

    /// The description this content has on the given part, if any
    pub fn description_on(&self, part_code: &str) -> Option<&FileDescription> {
        self.descriptions
            .iter()
            .find(|d| d.inventory_part_code == part_code)
    }

    /// True if any description in this identity failed analysis
    pub fn has_analysis_error(&self) -> bool {
        self.descriptions.iter().any(|d| d.has_analysis_error)
    }

    /// True when this content exists on the part and could be opened
    pub fn is_accessible_on(&self, part_code: &str) -> bool {
        self.description_on(part_code)
            .is_some_and(|d| d.is_accessible)
    }
}

/// Strip the numeric ordinal from a part code to get the inventory code
pub(crate) fn inventory_code_of(part_code: &str) -> &str {
    let end = part_code
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(part_code.len());
    &part_code[..end]
}
