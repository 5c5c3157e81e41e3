//! Error types for sync-inventory

/// Result type for sync-inventory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-inventory operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two inventories in the same session share a code
    #[error("Duplicate inventory code: {code}")]
    DuplicateInventoryCode { code: String },

    /// An inventory part references an inventory that is not in the session
    #[error("Inventory part {part} references unknown inventory {inventory}")]
    UnknownInventory { part: String, inventory: String },

    /// A file description references a part that is not in its inventory
    #[error("Description for {path} references unknown inventory part {part}")]
    UnknownInventoryPart { path: String, part: String },
}
