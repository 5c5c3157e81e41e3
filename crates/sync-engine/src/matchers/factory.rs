//! Matcher factory
//!
//! Dispatches a comparison property to its matcher. A property with no
//! registered matcher dispatches to `NullMatcher`, which reports "no
//! match" for everything, so an engine built against a newer rule schema
//! degrades instead of aborting.

use std::collections::HashMap;

use sync_inventory::ComparisonItem;

use super::{
    ConditionMatcher, ContentMatcher, DateMatcher, NameMatcher, PresenceMatcher, SizeMatcher,
};
use crate::rules::{AtomicCondition, ComparisonProperty};

/// Matcher that never matches anything
///
/// Private to the factory: its `supported_property` is arbitrary, so
/// registering it would shadow a real matcher.
#[derive(Debug, Default, Clone, Copy)]
struct NullMatcher;

impl ConditionMatcher for NullMatcher {
    fn supported_property(&self) -> ComparisonProperty {
        // Arbitrary; the null matcher is only reached through the factory
        ComparisonProperty::Presence
    }

    fn matches(&self, _condition: &AtomicCondition, _item: &ComparisonItem) -> bool {
        false
    }
}

/// Registry from comparison property to matcher
pub struct MatcherFactory {
    matchers: HashMap<ComparisonProperty, Box<dyn ConditionMatcher + Send + Sync>>,
    null_matcher: NullMatcher,
}

impl Default for MatcherFactory {
    fn default() -> Self {
        let mut factory = Self {
            matchers: HashMap::new(),
            null_matcher: NullMatcher,
        };
        factory.register(Box::new(ContentMatcher));
        factory.register(Box::new(DateMatcher));
        factory.register(Box::new(NameMatcher));
        factory.register(Box::new(PresenceMatcher));
        factory.register(Box::new(SizeMatcher));
        factory
    }
}

impl MatcherFactory {
    /// Register a matcher under the property it reports
    pub fn register(&mut self, matcher: Box<dyn ConditionMatcher + Send + Sync>) {
        self.matchers.insert(matcher.supported_property(), matcher);
    }

    /// The matcher for a property, or the null matcher when unmapped
    pub fn matcher_for(&self, property: ComparisonProperty) -> &dyn ConditionMatcher {
        match self.matchers.get(&property) {
            Some(matcher) => matcher.as_ref(),
            None => {
                tracing::warn!(?property, "No matcher registered; condition never matches");
                &self.null_matcher
            }
        }
    }

    /// Evaluate one condition against one item
    pub fn evaluate(&self, condition: &AtomicCondition, item: &ComparisonItem) -> bool {
        self.matcher_for(condition.property).matches(condition, item)
    }
}
