//! Targeted actions
//!
//! The manual (non-rule) path for assigning actions to items. The
//! exclusivity of `DoNothing` is enforced by replacing the item's whole
//! action set, not by merging: a `DoNothing` wipes everything, and a
//! manual real action silently retires a previously assigned `DoNothing`
//! before being validated against whatever remains.

use sync_inventory::ComparisonItem;

use crate::error::Result;
use crate::report::{AtomicActionValidationResult, ComparisonItemValidationResult};
use crate::repository::ActionRepository;
use crate::rules::ActionTemplate;

use super::action::{ActionOperator, AtomicAction};
use super::consistency::ConsistencyChecker;

/// Assigns and removes manually targeted actions
pub struct TargetedActionsManager<'a> {
    repository: &'a dyn ActionRepository,
}

impl<'a> TargetedActionsManager<'a> {
    pub fn new(repository: &'a dyn ActionRepository) -> Self {
        Self { repository }
    }

    /// Assign one targeted action to every item of a selection
    ///
    /// Validation failures are reported per item as data; an `Err` only
    /// signals a repository fault.
    pub fn add_targeted_action(
        &self,
        template: &ActionTemplate,
        items: &[ComparisonItem],
    ) -> Result<Vec<ComparisonItemValidationResult>> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            results.push(self.add_to_item(template, item)?);
        }
        Ok(results)
    }

    /// Remove one targeted action
    pub fn remove_targeted_action(&self, action: &AtomicAction) -> Result<()> {
        self.repository.remove(&action.path_identity, action.id)
    }

    fn add_to_item(
        &self,
        template: &ActionTemplate,
        item: &ComparisonItem,
    ) -> Result<ComparisonItemValidationResult> {
        let candidate = AtomicAction::new(
            template.operator,
            template.source.clone(),
            template.destination.clone(),
            item.path_identity.clone(),
            None,
        );

        if candidate.operator == ActionOperator::DoNothing {
            // Replace the whole set: DoNothing excludes everything,
            // including an earlier DoNothing.
            self.repository.remove_all_for(&item.path_identity)?;
            self.repository.add_or_update(candidate.clone())?;
            tracing::debug!(
                linking_data = %item.path_identity.linking_data,
                "Replaced action set with a do-nothing hold"
            );
            return Ok(ComparisonItemValidationResult {
                path_identity: item.path_identity.clone(),
                results: vec![AtomicActionValidationResult::success(candidate)],
            });
        }

        let existing = self.repository.actions_for(&item.path_identity)?;
        let (holds, remainder): (Vec<_>, Vec<_>) = existing
            .into_iter()
            .partition(|a| a.operator == ActionOperator::DoNothing);

        let result = match ConsistencyChecker::can_add(&candidate, item, &remainder) {
            Ok(()) => {
                // Only mutate once the candidate is known to be valid
                for hold in holds {
                    self.repository.remove(&item.path_identity, hold.id)?;
                }
                self.repository.add_or_update(candidate.clone())?;
                AtomicActionValidationResult::success(candidate)
            }
            Err(reason) => AtomicActionValidationResult::failure(candidate, reason),
        };

        Ok(ComparisonItemValidationResult {
            path_identity: item.path_identity.clone(),
            results: vec![result],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_inventory::{
        ComparisonItemBuilder, ContentIdentityCore, DataPart, FileDescription, FileSystemType,
        Inventory, LinkingKey,
    };

    use crate::actions::ValidationFailureReason;
    use crate::repository::InMemoryActionRepository;

    fn directory_item() -> ComparisonItem {
        let mut a = Inventory::new("A", "alpha");
        a.add_part("/data").descriptions.push(FileDescription {
            file_system_type: FileSystemType::Directory,
            inventory_part_code: "A1".to_string(),
            relative_path: "dir".to_string(),
            name: "dir".to_string(),
            size: None,
            last_write_time_utc: None,
            signature_hash: None,
            has_analysis_error: false,
            is_accessible: true,
        });
        let mut b = Inventory::new("B", "beta");
        b.add_part("/backup");
        ComparisonItemBuilder::new(LinkingKey::RelativePath)
            .build(&[a, b])
            .unwrap()
            .remove(0)
    }

    fn file_item() -> ComparisonItem {
        let core = ContentIdentityCore::from_bytes(b"payload");
        let mut a = Inventory::new("A", "alpha");
        a.add_part("/data").descriptions.push(FileDescription {
            file_system_type: FileSystemType::File,
            inventory_part_code: "A1".to_string(),
            relative_path: "f.txt".to_string(),
            name: "f.txt".to_string(),
            size: core.size,
            last_write_time_utc: None,
            signature_hash: core.signature_hash,
            has_analysis_error: false,
            is_accessible: true,
        });
        let mut b = Inventory::new("B", "beta");
        b.add_part("/backup");
        ComparisonItemBuilder::new(LinkingKey::RelativePath)
            .build(&[a, b])
            .unwrap()
            .remove(0)
    }

    fn create_template() -> ActionTemplate {
        ActionTemplate {
            operator: ActionOperator::Create,
            source: None,
            destination: Some(DataPart::inventory("B")),
        }
    }

    fn do_nothing_template() -> ActionTemplate {
        ActionTemplate {
            operator: ActionOperator::DoNothing,
            source: None,
            destination: None,
        }
    }

    #[test]
    fn test_do_nothing_replaces_the_whole_action_set() {
        let item = directory_item();
        let repository = InMemoryActionRepository::new();
        let manager = TargetedActionsManager::new(&repository);

        let results = manager
            .add_targeted_action(&create_template(), std::slice::from_ref(&item))
            .unwrap();
        assert!(results[0].is_ok());

        manager
            .add_targeted_action(&do_nothing_template(), std::slice::from_ref(&item))
            .unwrap();
        let committed = repository.actions_for(&item.path_identity).unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].operator, ActionOperator::DoNothing);
    }

    #[test]
    fn test_real_action_retires_a_prior_do_nothing() {
        let item = directory_item();
        let repository = InMemoryActionRepository::new();
        let manager = TargetedActionsManager::new(&repository);

        manager
            .add_targeted_action(&do_nothing_template(), std::slice::from_ref(&item))
            .unwrap();
        let results = manager
            .add_targeted_action(&create_template(), std::slice::from_ref(&item))
            .unwrap();
        assert!(results[0].is_ok());

        let committed = repository.actions_for(&item.path_identity).unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].operator, ActionOperator::Create);
    }

    #[test]
    fn test_do_nothing_replaces_an_earlier_do_nothing() {
        let item = directory_item();
        let repository = InMemoryActionRepository::new();
        let manager = TargetedActionsManager::new(&repository);

        manager
            .add_targeted_action(&do_nothing_template(), std::slice::from_ref(&item))
            .unwrap();
        manager
            .add_targeted_action(&do_nothing_template(), std::slice::from_ref(&item))
            .unwrap();

        let committed = repository.actions_for(&item.path_identity).unwrap();
        assert_eq!(committed.len(), 1);
    }

    #[test]
    fn test_rejected_candidate_leaves_the_hold_in_place() {
        // Create on a file item is invalid; the hold must survive
        let item = file_item();
        let repository = InMemoryActionRepository::new();
        let manager = TargetedActionsManager::new(&repository);

        manager
            .add_targeted_action(&do_nothing_template(), std::slice::from_ref(&item))
            .unwrap();
        let results = manager
            .add_targeted_action(&create_template(), std::slice::from_ref(&item))
            .unwrap();
        assert_eq!(
            results[0].results[0].failure,
            Some(ValidationFailureReason::CreateNotAllowedOnFile)
        );

        let committed = repository.actions_for(&item.path_identity).unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].operator, ActionOperator::DoNothing);
    }

    #[test]
    fn test_duplicate_targeted_add_is_rejected_second_time() {
        let item = directory_item();
        let repository = InMemoryActionRepository::new();
        let manager = TargetedActionsManager::new(&repository);

        manager
            .add_targeted_action(&create_template(), std::slice::from_ref(&item))
            .unwrap();
        let results = manager
            .add_targeted_action(&create_template(), std::slice::from_ref(&item))
            .unwrap();
        assert_eq!(
            results[0].results[0].failure,
            Some(ValidationFailureReason::DuplicateActionNotAllowed)
        );
        assert_eq!(repository.actions_for(&item.path_identity).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_targeted_action() {
        let item = directory_item();
        let repository = InMemoryActionRepository::new();
        let manager = TargetedActionsManager::new(&repository);

        manager
            .add_targeted_action(&create_template(), std::slice::from_ref(&item))
            .unwrap();
        let committed = repository.actions_for(&item.path_identity).unwrap();
        manager.remove_targeted_action(&committed[0]).unwrap();
        assert!(repository.actions_for(&item.path_identity).unwrap().is_empty());
    }
}
