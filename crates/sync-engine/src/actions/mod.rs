//! Atomic actions: model, consistency checking, targeted assignment,
//! and the terminal flattening into shared action groups.

mod action;
mod consistency;
mod shared;
mod targeted;

pub use action::{ActionOperator, AtomicAction};
pub use consistency::{CanAddResult, ConsistencyChecker, ValidationFailureReason};
pub use shared::{SharedActionsComputer, SharedActionsGroup, SharedDataPart};
pub use targeted::TargetedActionsManager;
