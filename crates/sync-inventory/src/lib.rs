//! Inventory and comparison-item data model
//!
//! This crate is the layer-0 data model of the synchronization decision
//! core. It turns scanned filesystem snapshots (`Inventory` /
//! `InventoryPart` / `FileDescription`) into the normalized comparison
//! view the engine reasons about:
//!
//! - **`PathIdentity`**: one logical entry matched across inventories
//! - **`ContentIdentity`**: one distinct content version (hash + size)
//! - **`ComparisonItem`**: identity + observed versions + missing-status
//! - **`DataPart`**: a reference to one side of a condition or action
//!
//! Everything here is a pure in-memory value; scanning, transfer and
//! persistence live in the surrounding application.

pub mod builder;
pub mod error;
pub mod identity;
pub mod inventory;
pub mod item;
pub mod part;

pub use builder::ComparisonItemBuilder;
pub use error::{Error, Result};
pub use identity::{ContentIdentity, ContentIdentityCore, PathIdentity};
pub use inventory::{FileDescription, FileSystemType, Inventory, InventoryPart, LinkingKey};
pub use item::{ComparisonItem, ContentRepartition};
pub use part::{DataPart, DataPartBacking};
