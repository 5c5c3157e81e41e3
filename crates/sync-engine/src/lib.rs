//! Decision core of the synchronization engine
//!
//! Compares inventories collected from the machines of a session and
//! decides, deterministically and without side effects, which atomic
//! actions should run, for which logical item, between which endpoints.
//! The engine is a pure decision function over a snapshot: it executes
//! nothing, performs no I/O, and never decides *when* a comparison runs.
//!
//! # Architecture
//!
//! `sync-engine` sits above the `sync-inventory` data model and below
//! the application layer (session orchestration, transfer pipeline, UI):
//!
//! ```text
//!        session / transfer / UI
//!                  |
//!             sync-engine
//!                  |
//!            sync-inventory
//! ```
//!
//! Stages, leaf to root: condition matchers and their factory evaluate
//! single rule conditions; the rule matcher combines them per rule and
//! instantiates actions; the consistency checker guards every insertion
//! into the per-item action store; the targeted actions manager is the
//! manual assignment path; the data part indexer re-links stored rules
//! and actions when inventories are rebuilt; the shared actions computer
//! flattens the committed set into transfer-ready groups.
//!
//! Business rejections are data (`ValidationFailureReason`), never
//! errors; `Error` is reserved for engine faults.

pub mod actions;
pub mod error;
pub mod indexer;
pub mod matchers;
pub mod report;
pub mod repository;
pub mod rules;

pub use actions::{
    ActionOperator, AtomicAction, CanAddResult, ConsistencyChecker, SharedActionsComputer,
    SharedActionsGroup, SharedDataPart, TargetedActionsManager, ValidationFailureReason,
};
pub use error::{Error, Result};
pub use indexer::DataPartIndex;
pub use matchers::{ConditionMatcher, MatcherFactory};
pub use report::{
    AtomicActionValidationResult, ComparisonItemValidationResult, ValidationFailureSummary,
    ValidationReport,
};
pub use repository::{ActionRepository, InMemoryActionRepository};
pub use rules::{
    ActionTemplate, AtomicCondition, ComparisonProperty, ConditionMode, ConditionOperator,
    RuleMatcher, SizeUnit, SynchronizationRule,
};
