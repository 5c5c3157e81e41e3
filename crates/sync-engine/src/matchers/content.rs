//! Content matcher
//!
//! Compares content signature hashes between two concrete sides. A side
//! with an analysis error or access issue never matches: a comparison
//! built on a bad read must not fire a rule. Directories carry no
//! signature and never match on content.

use sync_inventory::{ComparisonItem, FileDescription, FileSystemType};

use super::ConditionMatcher;
use crate::rules::{AtomicCondition, ComparisonProperty, ConditionOperator};

/// Matches on content signature hashes
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentMatcher;

impl ConditionMatcher for ContentMatcher {
    fn supported_property(&self) -> ComparisonProperty {
        ComparisonProperty::Content
    }

    fn matches(&self, condition: &AtomicCondition, item: &ComparisonItem) -> bool {
        if item.path_identity.file_system_type == FileSystemType::Directory {
            return false;
        }

        let Some(source_hash) = healthy_hash(item.description_for(&condition.source)) else {
            return false;
        };
        let Some(destination_hash) = healthy_hash(item.description_for(&condition.destination))
        else {
            return false;
        };

        match condition.operator {
            ConditionOperator::Equals => source_hash == destination_hash,
            ConditionOperator::NotEquals => source_hash != destination_hash,
            other => panic!("content matcher cannot evaluate operator {other:?}"),
        }
    }
}

/// The signature hash of a cleanly read description
fn healthy_hash(description: Option<&FileDescription>) -> Option<&str> {
    let description = description?;
    if !description.is_healthy() {
        return None;
    }
    description.signature_hash.as_deref()
}
