//! Presence matcher

use sync_inventory::ComparisonItem;

use super::ConditionMatcher;
use crate::rules::{AtomicCondition, ComparisonProperty, ConditionOperator};

/// Matches on whether an item exists on the two sides of a condition
#[derive(Debug, Default, Clone, Copy)]
pub struct PresenceMatcher;

impl ConditionMatcher for PresenceMatcher {
    fn supported_property(&self) -> ComparisonProperty {
        ComparisonProperty::Presence
    }

    fn matches(&self, condition: &AtomicCondition, item: &ComparisonItem) -> bool {
        let on_source = item.is_present_on(&condition.source);
        match condition.operator {
            ConditionOperator::ExistsOn => {
                on_source && item.is_present_on(&condition.destination)
            }
            ConditionOperator::NotExistsOn => {
                on_source && !item.is_present_on(&condition.destination)
            }
            other => panic!("presence matcher cannot evaluate operator {other:?}"),
        }
    }
}
