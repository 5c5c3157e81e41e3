//! Size matcher
//!
//! Compares the item's size on the source side against either the size
//! on a concrete destination or a resolved size literal. A side whose
//! size is unknown never matches.

use sync_inventory::ComparisonItem;

use super::ConditionMatcher;
use crate::rules::{AtomicCondition, ComparisonProperty, ConditionOperator};

/// Matches on file size
#[derive(Debug, Default, Clone, Copy)]
pub struct SizeMatcher;

impl ConditionMatcher for SizeMatcher {
    fn supported_property(&self) -> ComparisonProperty {
        ComparisonProperty::Size
    }

    fn matches(&self, condition: &AtomicCondition, item: &ComparisonItem) -> bool {
        let Some(source_size) = item
            .description_for(&condition.source)
            .and_then(|d| d.size)
        else {
            return false;
        };

        let destination_size = if condition.destination.is_virtual() {
            condition.resolved_size_literal()
        } else {
            item.description_for(&condition.destination)
                .and_then(|d| d.size)
        };
        let Some(destination_size) = destination_size else {
            return false;
        };

        match condition.operator {
            ConditionOperator::Equals => source_size == destination_size,
            ConditionOperator::NotEquals => source_size != destination_size,
            ConditionOperator::IsBiggerThan => source_size > destination_size,
            ConditionOperator::IsSmallerThan => source_size < destination_size,
            other => panic!("size matcher cannot evaluate operator {other:?}"),
        }
    }
}
