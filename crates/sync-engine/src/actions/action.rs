//! Atomic actions
//!
//! An `AtomicAction` is one concrete operation between two data parts for
//! one comparison item. Rule-driven actions carry the id of the rule that
//! produced them; targeted (manually assigned) actions carry `None`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sync_inventory::{DataPart, PathIdentity};

/// Operation an atomic action performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionOperator {
    /// Create the (directory) entry on the destination
    Create,
    /// Delete the entry on the destination
    Delete,
    /// Copy content and carry over the source last-write time
    SynchronizeContentAndDate,
    /// Copy content only
    SynchronizeContent,
    /// Re-stamp the destination with the source last-write time
    SynchronizeDate,
    /// Hold the item: no operation may run on it
    DoNothing,
}

impl ActionOperator {
    /// True for the operators that copy from a source side
    pub fn requires_source(&self) -> bool {
        matches!(
            self,
            Self::SynchronizeContentAndDate | Self::SynchronizeContent | Self::SynchronizeDate
        )
    }

    /// True for every operator except `DoNothing`
    pub fn requires_destination(&self) -> bool {
        !matches!(self, Self::DoNothing)
    }

    /// True for the three synchronize variants
    pub fn is_synchronize(&self) -> bool {
        matches!(
            self,
            Self::SynchronizeContentAndDate | Self::SynchronizeContent | Self::SynchronizeDate
        )
    }
}

/// One concrete operation bound to a comparison item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicAction {
    /// Unique action id
    pub id: Uuid,
    /// Operation to perform
    pub operator: ActionOperator,
    /// Side content flows from; `None` for Create/Delete/DoNothing
    pub source: Option<DataPart>,
    /// Side the operation applies to; `None` for DoNothing
    pub destination: Option<DataPart>,
    /// Identity of the owning comparison item
    pub path_identity: PathIdentity,
    /// Rule that instantiated this action; `None` when user-targeted
    pub rule_id: Option<Uuid>,
}

impl AtomicAction {
    pub fn new(
        operator: ActionOperator,
        source: Option<DataPart>,
        destination: Option<DataPart>,
        path_identity: PathIdentity,
        rule_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            operator,
            source,
            destination,
            path_identity,
            rule_id,
        }
    }

    /// True when the action was assigned manually rather than by a rule
    pub fn is_targeted(&self) -> bool {
        self.rule_id.is_none()
    }

    /// Same operator and endpoints, ignoring id and provenance
    pub fn same_operation_as(&self, other: &AtomicAction) -> bool {
        self.operator == other.operator
            && self.source == other.source
            && self.destination == other.destination
    }
}
