//! Name matcher
//!
//! Compares the item's file name against a literal pattern. `*` is the
//! only glob metacharacter; a pattern containing it compiles to an
//! anchored, case-insensitive regex, everything else is escaped. Without
//! `*` the comparison is a plain case-insensitive equality.

use regex::RegexBuilder;
use sync_inventory::ComparisonItem;

use super::ConditionMatcher;
use crate::rules::{AtomicCondition, ComparisonProperty, ConditionOperator};

/// Cap on the compiled pattern size; a user glob can never legitimately
/// need more
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Matches on the item's file name against a glob or literal
#[derive(Debug, Default, Clone, Copy)]
pub struct NameMatcher;

impl ConditionMatcher for NameMatcher {
    fn supported_property(&self) -> ComparisonProperty {
        ComparisonProperty::Name
    }

    fn matches(&self, condition: &AtomicCondition, item: &ComparisonItem) -> bool {
        let Some(pattern) = condition.name_pattern.as_deref() else {
            tracing::warn!(
                linking_data = %item.path_identity.linking_data,
                "Name condition without a pattern never matches"
            );
            return false;
        };

        let name = item.path_identity.file_name.as_str();
        let is_match = if pattern.contains('*') {
            glob_matches(pattern, name)
        } else {
            pattern.eq_ignore_ascii_case(name)
        };

        match condition.operator {
            ConditionOperator::Equals => is_match,
            ConditionOperator::NotEquals => !is_match,
            other => panic!("name matcher cannot evaluate operator {other:?}"),
        }
    }
}

/// Compile a `*`-glob to an anchored case-insensitive regex and test it
///
/// The regex engine evaluates in linear time, which satisfies the bounded
/// evaluation requirement for hostile patterns; `size_limit` bounds
/// compilation of oversized ones. A pattern that still fails to compile
/// is degraded input and never matches.
fn glob_matches(pattern: &str, name: &str) -> bool {
    let escaped: Vec<String> = pattern.split('*').map(|s| regex::escape(s)).collect();
    let regex_pattern = format!("^{}$", escaped.join(".*"));

    match RegexBuilder::new(&regex_pattern)
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => regex.is_match(name),
        Err(error) => {
            tracing::warn!(%pattern, %error, "Glob pattern failed to compile; never matches");
            false
        }
    }
}
