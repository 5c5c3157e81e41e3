//! Synchronization rule matching
//!
//! Runs every rule over every comparison item. Matching is pure and has
//! no cross-item state; commits go through the consistency checker, so
//! the per-item action set stays consistent however many rules fire.

use sync_inventory::ComparisonItem;

use crate::actions::{AtomicAction, ConsistencyChecker};
use crate::error::Result;
use crate::matchers::MatcherFactory;
use crate::report::{
    AtomicActionValidationResult, ComparisonItemValidationResult, ValidationReport,
};
use crate::repository::ActionRepository;

use super::rule::{ConditionMode, SynchronizationRule};

/// Evaluates rules against items and commits the resulting actions
pub struct RuleMatcher<'a> {
    factory: MatcherFactory,
    repository: &'a dyn ActionRepository,
}

impl<'a> RuleMatcher<'a> {
    pub fn new(repository: &'a dyn ActionRepository) -> Self {
        Self {
            factory: MatcherFactory::default(),
            repository,
        }
    }

    /// Whether a rule fires for an item
    ///
    /// A rule with no conditions matches nothing under either mode: a
    /// half-authored rule must not silently synchronize everything.
    pub fn rule_matches(&self, rule: &SynchronizationRule, item: &ComparisonItem) -> bool {
        if !rule.is_applicable
            || rule.file_system_type != item.path_identity.file_system_type
            || rule.conditions.is_empty()
        {
            return false;
        }

        match rule.condition_mode {
            ConditionMode::All => rule
                .conditions
                .iter()
                .all(|condition| self.factory.evaluate(condition, item)),
            ConditionMode::Any => rule
                .conditions
                .iter()
                .any(|condition| self.factory.evaluate(condition, item)),
        }
    }

    /// Run every rule over every item, committing validated actions
    ///
    /// Rejections are collected in the report; only repository faults
    /// surface as errors.
    pub fn run(
        &self,
        rules: &[SynchronizationRule],
        items: &[ComparisonItem],
    ) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        for item in items {
            let mut results = Vec::new();
            for rule in rules {
                if !self.rule_matches(rule, item) {
                    continue;
                }
                tracing::debug!(
                    rule_id = %rule.id,
                    linking_data = %item.path_identity.linking_data,
                    "Rule fired"
                );
                for template in &rule.actions {
                    let candidate = AtomicAction::new(
                        template.operator,
                        template.source.clone(),
                        template.destination.clone(),
                        item.path_identity.clone(),
                        Some(rule.id),
                    );
                    let existing = self.repository.actions_for(&item.path_identity)?;
                    match ConsistencyChecker::can_add(&candidate, item, &existing) {
                        Ok(()) => {
                            self.repository.add_or_update(candidate.clone())?;
                            results.push(AtomicActionValidationResult::success(candidate));
                        }
                        Err(reason) => {
                            results.push(AtomicActionValidationResult::failure(candidate, reason));
                        }
                    }
                }
            }
            if !results.is_empty() {
                report.push(ComparisonItemValidationResult {
                    path_identity: item.path_identity.clone(),
                    results,
                });
            }
        }

        Ok(report)
    }
}
