//! Synchronization rules: the condition/action model and the matcher
//! that runs rules over comparison items.

mod matcher;
mod rule;

pub use matcher::RuleMatcher;
pub use rule::{
    ActionTemplate, AtomicCondition, ComparisonProperty, ConditionMode, ConditionOperator,
    SizeUnit, SynchronizationRule,
};
