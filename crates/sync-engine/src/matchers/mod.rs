//! Condition matchers
//!
//! One matcher per comparison property. Matchers are pure: they evaluate
//! a single `AtomicCondition` against a single `ComparisonItem` and
//! return whether it holds. Degraded inputs (unknown size, missing
//! literal, bad read) evaluate to "no match" so one bad item cannot
//! abort a comparison run; an operator a matcher does not support is a
//! programmer fault and panics.

mod content;
mod date;
mod factory;
mod name;
mod presence;
mod size;

pub use content::ContentMatcher;
pub use date::DateMatcher;
pub use factory::MatcherFactory;
pub use name::NameMatcher;
pub use presence::PresenceMatcher;
pub use size::SizeMatcher;

use sync_inventory::ComparisonItem;

use crate::rules::{AtomicCondition, ComparisonProperty};

/// Evaluates one comparison property of a condition against an item
pub trait ConditionMatcher {
    /// The property this matcher handles
    fn supported_property(&self) -> ComparisonProperty;

    /// Whether the condition holds for the item
    fn matches(&self, condition: &AtomicCondition, item: &ComparisonItem) -> bool;
}
