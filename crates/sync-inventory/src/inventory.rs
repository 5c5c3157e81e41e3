//! Inventory snapshot types
//!
//! An `Inventory` is the scanned snapshot of one machine's filesystem,
//! split into one or more `InventoryPart`s (one per scanned root). The
//! engine never touches the filesystem itself; it only consumes the
//! `FileDescription` records the scanner produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of filesystem entry a description refers to
///
/// Ordered so items sharing a linking key sort files first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FileSystemType {
    File,
    Directory,
}

/// Session setting selecting the key used to match entries across inventories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkingKey {
    /// Match entries by relative path (the default)
    RelativePath,
    /// Match entries by file name only, regardless of directory
    Name,
}

/// One scanned file or directory entry within an inventory part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescription {
    /// Whether this entry is a file or a directory
    pub file_system_type: FileSystemType,
    /// Code of the inventory part this entry was scanned from (e.g. "A1")
    pub inventory_part_code: String,
    /// Path relative to the part root, with forward slashes
    pub relative_path: String,
    /// File or directory name (last path segment)
    pub name: String,
    /// Size in bytes; `None` for directories or when the scan could not stat
    pub size: Option<u64>,
    /// Last write time in UTC, when the scanner could read it
    pub last_write_time_utc: Option<DateTime<Utc>>,
    /// Content signature hash; `None` for directories or unanalyzed files
    pub signature_hash: Option<String>,
    /// The analysis phase failed for this entry (hash could not be computed)
    pub has_analysis_error: bool,
    /// The entry exists but could not be opened for reading
    pub is_accessible: bool,
}

impl FileDescription {
    /// The linking value for this description under the given session key
    pub fn linking_data(&self, key: LinkingKey) -> &str {
        match key {
            LinkingKey::RelativePath => &self.relative_path,
            LinkingKey::Name => &self.name,
        }
    }

    /// True when the entry was read cleanly: accessible and analyzed
    pub fn is_healthy(&self) -> bool {
        self.is_accessible && !self.has_analysis_error
    }
}

/// One scanned root within an inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryPart {
    /// Part code, inventory code plus ordinal (e.g. "A1")
    pub code: String,
    /// Code of the owning inventory (e.g. "A")
    pub inventory_code: String,
    /// Root path this part was scanned from
    pub root_path: String,
    /// Entries scanned under the root
    pub descriptions: Vec<FileDescription>,
}

/// A scanned snapshot of one machine's filesystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Inventory code, a single letter assigned per session (e.g. "A")
    pub code: String,
    /// Name of the machine the snapshot came from
    pub machine_name: String,
    /// Ordered scanned roots
    pub parts: Vec<InventoryPart>,
}

impl Inventory {
    /// Create an inventory with no parts yet
    pub fn new(code: impl Into<String>, machine_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            machine_name: machine_name.into(),
            parts: Vec::new(),
        }
    }

    /// Append a part, assigning its code from the inventory code and ordinal
    pub fn add_part(&mut self, root_path: impl Into<String>) -> &mut InventoryPart {
        let index = self.parts.len();
        self.parts.push(InventoryPart {
            code: format!("{}{}", self.code, index + 1),
            inventory_code: self.code.clone(),
            root_path: root_path.into(),
            descriptions: Vec::new(),
        });
        &mut self.parts[index]
    }
}
