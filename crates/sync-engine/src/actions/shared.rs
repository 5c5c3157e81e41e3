//! Shared actions
//!
//! The terminal stage of a comparison: every committed action is
//! flattened into one `SharedActionsGroup` carrying resolved source and
//! target content identity, so the transfer subsystem can address the
//! right bytes without re-deriving anything from disk. Exactly one group
//! per accepted action; never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sync_inventory::{ComparisonItem, DataPart, PathIdentity};

use crate::error::{Error, Result};
use crate::repository::ActionRepository;

use super::action::ActionOperator;

/// One side of a shared action with its resolved content identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedDataPart {
    /// The endpoint the action names
    pub data_part: DataPart,
    /// Signature hash of the bytes currently on this side, if any
    pub signature_hash: Option<String>,
    /// Size currently on this side
    pub size: Option<u64>,
    /// Last write time currently on this side
    pub last_write_time_utc: Option<DateTime<Utc>>,
}

/// The flattened, transfer-ready form of one accepted action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedActionsGroup {
    /// Id of the action this group was built from
    pub action_id: Uuid,
    pub operator: ActionOperator,
    /// The logical item the action belongs to
    pub path_identity: PathIdentity,
    /// Resolved source side; `None` for Create/Delete/DoNothing
    pub source: Option<SharedDataPart>,
    /// Resolved target side; `None` for DoNothing
    pub destination: Option<SharedDataPart>,
}

/// Flattens committed actions into cross-client action groups
#[derive(Debug, Default, Clone, Copy)]
pub struct SharedActionsComputer;

impl SharedActionsComputer {
    /// One group per committed action, in item order
    ///
    /// # Errors
    ///
    /// A committed action whose owning item is absent from the snapshot
    /// is an engine fault: a silent drop would desynchronize the clients.
    pub fn compute(
        items: &[ComparisonItem],
        repository: &dyn ActionRepository,
    ) -> Result<Vec<SharedActionsGroup>> {
        let mut groups = Vec::new();
        for item in items {
            for action in repository.actions_for(&item.path_identity)? {
                groups.push(SharedActionsGroup {
                    action_id: action.id,
                    operator: action.operator,
                    path_identity: item.path_identity.clone(),
                    source: action.source.as_ref().map(|part| resolve(item, part)),
                    destination: action.destination.as_ref().map(|part| resolve(item, part)),
                });
            }
        }

        let committed = repository.all()?;
        if committed.len() != groups.len() {
            let known: Vec<&PathIdentity> = items.iter().map(|i| &i.path_identity).collect();
            let orphan = committed
                .iter()
                .find(|a| !known.contains(&&a.path_identity));
            if let Some(orphan) = orphan {
                return Err(Error::UnknownItem {
                    linking_data: orphan.path_identity.linking_data.clone(),
                });
            }
        }

        tracing::debug!(group_count = groups.len(), "Computed shared action groups");
        Ok(groups)
    }
}

/// Resolve what the given side currently holds for the item
fn resolve(item: &ComparisonItem, part: &DataPart) -> SharedDataPart {
    let description = item.description_for(part);
    SharedDataPart {
        data_part: part.clone(),
        signature_hash: description.and_then(|d| d.signature_hash.clone()),
        size: description.and_then(|d| d.size),
        last_write_time_utc: description.and_then(|d| d.last_write_time_utc),
    }
}
