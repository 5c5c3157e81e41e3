//! Atomic action consistency checking
//!
//! `ConsistencyChecker::can_add` is a pure function deciding whether a
//! candidate action may join the set already committed for its item. A
//! rejection is the engine doing its job, so it is returned as data, a
//! `ValidationFailureReason`, never as an error. The committed set is
//! kept consistent at insertion time; it is never repaired afterwards.

use serde::{Deserialize, Serialize};

use sync_inventory::{ComparisonItem, DataPart, FileDescription, FileSystemType};

use crate::error::Result;
use crate::report::AtomicActionValidationResult;
use crate::repository::ActionRepository;
use crate::rules::ActionTemplate;

use super::action::{ActionOperator, AtomicAction};

/// Closed enumeration of the ways a candidate action can be inconsistent
///
/// Kept closed and exhaustively matched so a new class forces every
/// consumer (checker, localizer, UI) to be updated at compile time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum ValidationFailureReason {
    // Operation / type compatibility
    #[error("synchronize operations do not apply to directories")]
    SynchronizeNotAllowedOnDirectory,
    #[error("create only applies to directories; files are synchronized")]
    CreateNotAllowedOnFile,

    // Requiredness
    #[error("the operation requires a concrete source")]
    SourceRequired,
    #[error("the operation requires a concrete destination")]
    DestinationRequired,

    // Source-side analysis problems
    #[error("the item has no content on the source")]
    SourceContentMissing,
    #[error("the source holds more than one content version for the item")]
    SourceContentAmbiguous,
    #[error("the source copy failed content analysis")]
    SourceAnalysisError,
    #[error("the source copy is not accessible")]
    SourceNotAccessible,

    // Target-side analysis problems
    #[error("the item does not exist on the destination")]
    TargetMissing,
    #[error("the destination copy failed content analysis")]
    TargetAnalysisError,
    #[error("the destination copy is not accessible")]
    TargetNotAccessible,
    #[error("an entry of the other filesystem type occupies the destination")]
    TargetFileSystemTypeMismatch,
    #[error("the entry already exists on the destination")]
    TargetAlreadyExists,

    // Redundant-content problems
    #[error("content and date are already identical on both sides")]
    ContentAndDateAlreadyIdentical,
    #[error("content is already identical on both sides")]
    ContentAlreadyIdentical,

    // Conflicts with actions already committed for the item
    #[error("an identical action is already committed")]
    DuplicateActionNotAllowed,
    #[error("a do-nothing hold excludes every other action on the item")]
    DoNothingIsExclusive,
    #[error("the source of one action is the destination of another")]
    SourceDestinationOverlap,
    #[error("another action already writes to this destination")]
    DestinationAlreadyUsed,
    #[error("a delete cannot share the item with any other action")]
    DeleteConflict,
}

/// Batch outcome of validating one action template over an item set
#[derive(Debug, Clone, Default)]
pub struct CanAddResult {
    /// Candidates that may be committed
    pub valid: Vec<AtomicActionValidationResult>,
    /// Candidates that were rejected, with their reason
    pub non_valid: Vec<AtomicActionValidationResult>,
}

impl CanAddResult {
    /// True iff the item set was non-empty and every validation succeeded
    pub fn is_ok(&self) -> bool {
        !self.valid.is_empty() && self.non_valid.is_empty()
    }
}

/// Validates candidate actions against an item's committed action set
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Decide whether the candidate may join the committed set
    ///
    /// Pure: neither the item nor the committed set is touched.
    pub fn can_add(
        candidate: &AtomicAction,
        item: &ComparisonItem,
        existing: &[AtomicAction],
    ) -> std::result::Result<(), ValidationFailureReason> {
        Self::check_operator_compatibility(candidate, item)?;
        Self::check_requiredness(candidate)?;
        Self::check_source_health(candidate, item)?;
        Self::check_target_health(candidate, item)?;
        Self::check_redundancy(candidate, item)?;
        Self::check_cross_action_conflicts(candidate, existing)?;
        Ok(())
    }

    /// Validate one template against every item of a selection
    ///
    /// Used by the UI before a multi-item targeted assignment; nothing is
    /// committed here.
    pub fn check_can_add(
        template: &ActionTemplate,
        items: &[ComparisonItem],
        repository: &dyn ActionRepository,
    ) -> Result<CanAddResult> {
        let mut result = CanAddResult::default();
        for item in items {
            let candidate = AtomicAction::new(
                template.operator,
                template.source.clone(),
                template.destination.clone(),
                item.path_identity.clone(),
                None,
            );
            let existing = repository.actions_for(&item.path_identity)?;
            match Self::can_add(&candidate, item, &existing) {
                Ok(()) => result.valid.push(AtomicActionValidationResult::success(candidate)),
                Err(reason) => result
                    .non_valid
                    .push(AtomicActionValidationResult::failure(candidate, reason)),
            }
        }
        Ok(result)
    }

    fn check_operator_compatibility(
        candidate: &AtomicAction,
        item: &ComparisonItem,
    ) -> std::result::Result<(), ValidationFailureReason> {
        let file_system_type = item.path_identity.file_system_type;
        if candidate.operator.is_synchronize() && file_system_type == FileSystemType::Directory {
            return Err(ValidationFailureReason::SynchronizeNotAllowedOnDirectory);
        }
        if candidate.operator == ActionOperator::Create && file_system_type == FileSystemType::File
        {
            return Err(ValidationFailureReason::CreateNotAllowedOnFile);
        }
        Ok(())
    }

    fn check_requiredness(
        candidate: &AtomicAction,
    ) -> std::result::Result<(), ValidationFailureReason> {
        if candidate.operator.requires_source() && concrete(&candidate.source).is_none() {
            return Err(ValidationFailureReason::SourceRequired);
        }
        if candidate.operator.requires_destination() && concrete(&candidate.destination).is_none()
        {
            return Err(ValidationFailureReason::DestinationRequired);
        }
        Ok(())
    }

    fn check_source_health(
        candidate: &AtomicAction,
        item: &ComparisonItem,
    ) -> std::result::Result<(), ValidationFailureReason> {
        if !candidate.operator.requires_source() {
            return Ok(());
        }
        let Some(source) = concrete(&candidate.source) else {
            return Ok(());
        };

        let identities = item.content_identities_for(source);
        if identities.is_empty() {
            return Err(ValidationFailureReason::SourceContentMissing);
        }
        if identities.len() > 1 {
            return Err(ValidationFailureReason::SourceContentAmbiguous);
        }
        let Some(description) = item.description_for(source) else {
            return Err(ValidationFailureReason::SourceContentMissing);
        };
        if description.has_analysis_error {
            return Err(ValidationFailureReason::SourceAnalysisError);
        }
        if !description.is_accessible {
            return Err(ValidationFailureReason::SourceNotAccessible);
        }
        Ok(())
    }

    fn check_target_health(
        candidate: &AtomicAction,
        item: &ComparisonItem,
    ) -> std::result::Result<(), ValidationFailureReason> {
        if !candidate.operator.requires_destination() {
            return Ok(());
        }
        let Some(destination) = concrete(&candidate.destination) else {
            return Ok(());
        };
        let description = item.description_for(destination);

        // Delete and date re-stamping need an existing target; content
        // transfers may create it.
        let target_must_exist = matches!(
            candidate.operator,
            ActionOperator::Delete | ActionOperator::SynchronizeDate
        );
        let Some(description) = description else {
            if target_must_exist {
                return Err(ValidationFailureReason::TargetMissing);
            }
            return Ok(());
        };

        if description.has_analysis_error {
            return Err(ValidationFailureReason::TargetAnalysisError);
        }
        if !description.is_accessible {
            return Err(ValidationFailureReason::TargetNotAccessible);
        }
        if candidate.operator == ActionOperator::Create {
            if description.file_system_type != item.path_identity.file_system_type {
                return Err(ValidationFailureReason::TargetFileSystemTypeMismatch);
            }
            return Err(ValidationFailureReason::TargetAlreadyExists);
        }
        Ok(())
    }

    fn check_redundancy(
        candidate: &AtomicAction,
        item: &ComparisonItem,
    ) -> std::result::Result<(), ValidationFailureReason> {
        if !candidate.operator.is_synchronize() {
            return Ok(());
        }
        let (Some(source), Some(destination)) =
            (concrete(&candidate.source), concrete(&candidate.destination))
        else {
            return Ok(());
        };
        let (Some(source_description), Some(destination_description)) =
            (item.description_for(source), item.description_for(destination))
        else {
            return Ok(());
        };

        match candidate.operator {
            ActionOperator::SynchronizeContentAndDate => {
                if same_hash(source_description, destination_description)
                    && same_date(source_description, destination_description)
                {
                    return Err(ValidationFailureReason::ContentAndDateAlreadyIdentical);
                }
            }
            ActionOperator::SynchronizeContent => {
                if same_hash(source_description, destination_description) {
                    return Err(ValidationFailureReason::ContentAlreadyIdentical);
                }
            }
            // Re-stamping an equal date is harmless; no redundancy class
            _ => {}
        }
        Ok(())
    }

    fn check_cross_action_conflicts(
        candidate: &AtomicAction,
        existing: &[AtomicAction],
    ) -> std::result::Result<(), ValidationFailureReason> {
        if existing.iter().any(|e| e.same_operation_as(candidate)) {
            return Err(ValidationFailureReason::DuplicateActionNotAllowed);
        }

        if existing.iter().any(|e| e.operator == ActionOperator::DoNothing)
            || (candidate.operator == ActionOperator::DoNothing && !existing.is_empty())
        {
            return Err(ValidationFailureReason::DoNothingIsExclusive);
        }

        for committed in existing {
            let source_writes_elsewhere = candidate.source.is_some()
                && candidate.source == committed.destination;
            let destination_reads_elsewhere = candidate.destination.is_some()
                && candidate.destination == committed.source;
            if source_writes_elsewhere || destination_reads_elsewhere {
                return Err(ValidationFailureReason::SourceDestinationOverlap);
            }
        }

        for committed in existing {
            if candidate.destination.is_some()
                && candidate.destination == committed.destination
                && !complementary(candidate, committed)
            {
                return Err(ValidationFailureReason::DestinationAlreadyUsed);
            }
        }

        if candidate.operator == ActionOperator::Delete && !existing.is_empty() {
            return Err(ValidationFailureReason::DeleteConflict);
        }
        if existing.iter().any(|e| e.operator == ActionOperator::Delete) {
            return Err(ValidationFailureReason::DeleteConflict);
        }

        Ok(())
    }
}

/// A concrete (non-virtual) endpoint, when present
fn concrete(part: &Option<DataPart>) -> Option<&DataPart> {
    part.as_ref().filter(|p| !p.is_virtual())
}

fn same_hash(a: &FileDescription, b: &FileDescription) -> bool {
    matches!(
        (&a.signature_hash, &b.signature_hash),
        (Some(left), Some(right)) if left == right
    )
}

fn same_date(a: &FileDescription, b: &FileDescription) -> bool {
    matches!(
        (a.last_write_time_utc, b.last_write_time_utc),
        (Some(left), Some(right)) if left == right
    )
}

/// Content and date transfers to the same destination complement each
/// other when they read from the same source
fn complementary(a: &AtomicAction, b: &AtomicAction) -> bool {
    let pair = (a.operator, b.operator);
    let operators_complement = matches!(
        pair,
        (ActionOperator::SynchronizeContent, ActionOperator::SynchronizeDate)
            | (ActionOperator::SynchronizeDate, ActionOperator::SynchronizeContent)
    );
    operators_complement && a.source == b.source
}
