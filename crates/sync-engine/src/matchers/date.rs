//! Date matcher
//!
//! Compares last-write times. Literals are interpreted in UTC. When the
//! condition compares against a literal and the source stamp has zero
//! seconds and sub-seconds, both sides are truncated to minute precision
//! first; filesystems that only store minute-resolution timestamps would
//! otherwise never compare equal to an authored literal.

use chrono::{DateTime, Timelike, Utc};
use sync_inventory::ComparisonItem;

use super::ConditionMatcher;
use crate::rules::{AtomicCondition, ComparisonProperty, ConditionOperator};

/// Matches on last-write time
#[derive(Debug, Default, Clone, Copy)]
pub struct DateMatcher;

impl ConditionMatcher for DateMatcher {
    fn supported_property(&self) -> ComparisonProperty {
        ComparisonProperty::Date
    }

    fn matches(&self, condition: &AtomicCondition, item: &ComparisonItem) -> bool {
        let Some(source_date) = item
            .description_for(&condition.source)
            .and_then(|d| d.last_write_time_utc)
        else {
            return false;
        };

        let destination_date = if condition.destination.is_virtual() {
            condition.date
        } else {
            let destination_description = item.description_for(&condition.destination);
            if destination_description.is_none()
                && condition.operator == ConditionOperator::IsNewerThan
            {
                // An absent destination is infinitely old
                return true;
            }
            destination_description.and_then(|d| d.last_write_time_utc)
        };
        let Some(destination_date) = destination_date else {
            return false;
        };

        let (source_date, destination_date) = if condition.destination.is_virtual()
            && source_date.second() == 0
            && source_date.nanosecond() == 0
        {
            (
                truncate_to_minute(source_date),
                truncate_to_minute(destination_date),
            )
        } else {
            (source_date, destination_date)
        };

        match condition.operator {
            ConditionOperator::Equals => source_date == destination_date,
            ConditionOperator::NotEquals => source_date != destination_date,
            ConditionOperator::IsOlderThan => source_date < destination_date,
            ConditionOperator::IsNewerThan => source_date > destination_date,
            other => panic!("date matcher cannot evaluate operator {other:?}"),
        }
    }
}

fn truncate_to_minute(date: DateTime<Utc>) -> DateTime<Utc> {
    date.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(date)
}
