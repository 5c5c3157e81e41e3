//! Error types for sync-engine
//!
//! Only engine faults surface here. Business rejections (an action that
//! cannot be added to an item) are data, not errors; see
//! `actions::ValidationFailureReason`.

/// Result type for sync-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-engine operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The action store could not serve a request
    #[error("Action repository error: {message}")]
    Repository { message: String },

    /// A committed action references an item absent from the snapshot
    #[error("No comparison item for {linking_data}")]
    UnknownItem { linking_data: String },

    /// Inventory model error
    #[error(transparent)]
    Inventory(#[from] sync_inventory::Error),
}
