//! Validation reporting
//!
//! Business rejections flow back to the UI layer as data. These records
//! aggregate per-action and per-item outcomes of a rule run or a batch
//! targeted-action check.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use sync_inventory::PathIdentity;

use crate::actions::{AtomicAction, ValidationFailureReason};

/// Outcome of validating one candidate action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicActionValidationResult {
    /// The candidate that was validated
    pub action: AtomicAction,
    /// `None` on success
    pub failure: Option<ValidationFailureReason>,
}

impl AtomicActionValidationResult {
    pub fn success(action: AtomicAction) -> Self {
        Self {
            action,
            failure: None,
        }
    }

    pub fn failure(action: AtomicAction, reason: ValidationFailureReason) -> Self {
        Self {
            action,
            failure: Some(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }
}

/// Validation outcomes for every candidate of one comparison item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonItemValidationResult {
    pub path_identity: PathIdentity,
    pub results: Vec<AtomicActionValidationResult>,
}

impl ComparisonItemValidationResult {
    pub fn is_ok(&self) -> bool {
        self.results.iter().all(AtomicActionValidationResult::is_valid)
    }
}

/// One failure reason aggregated over the items it affected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailureSummary {
    pub reason: ValidationFailureReason,
    pub item_count: usize,
    pub items: Vec<PathIdentity>,
}

/// Everything a rule run or batch check decided
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub item_results: Vec<ComparisonItemValidationResult>,
}

impl ValidationReport {
    pub fn push(&mut self, result: ComparisonItemValidationResult) {
        self.item_results.push(result);
    }

    /// True when every validated action of every item succeeded
    pub fn is_ok(&self) -> bool {
        self.item_results.iter().all(ComparisonItemValidationResult::is_ok)
    }

    /// Number of actions that were accepted
    pub fn accepted_count(&self) -> usize {
        self.item_results
            .iter()
            .flat_map(|r| r.results.iter())
            .filter(|r| r.is_valid())
            .count()
    }

    /// Aggregate failures by reason for user display
    ///
    /// An item appears once per reason, however many of its candidates
    /// failed with it.
    pub fn failure_summaries(&self) -> Vec<ValidationFailureSummary> {
        let mut by_reason: BTreeMap<ValidationFailureReason, Vec<PathIdentity>> = BTreeMap::new();
        for item_result in &self.item_results {
            for result in &item_result.results {
                if let Some(reason) = result.failure {
                    let items = by_reason.entry(reason).or_default();
                    if !items.contains(&item_result.path_identity) {
                        items.push(item_result.path_identity.clone());
                    }
                }
            }
        }

        by_reason
            .into_iter()
            .map(|(reason, items)| ValidationFailureSummary {
                reason,
                item_count: items.len(),
                items,
            })
            .collect()
    }
}
