//! Synchronization rules and atomic conditions
//!
//! A rule is scoped to one filesystem-entry type and combines an ordered
//! list of conditions (all-of or any-of) with an ordered list of action
//! templates to instantiate for every matching item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sync_inventory::{DataPart, FileSystemType};

use crate::actions::ActionOperator;

/// Property of a comparison item a condition examines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonProperty {
    Content,
    Date,
    Name,
    Presence,
    Size,
}

/// Comparison operator of an atomic condition
///
/// Closed enumeration shared by every property; each matcher supports a
/// subset. `IsEmpty`/`IsNotEmpty` are reserved by the authoring surface
/// and reach no matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    ExistsOn,
    NotExistsOn,
    IsOlderThan,
    IsNewerThan,
    IsBiggerThan,
    IsSmallerThan,
    IsEmpty,
    IsNotEmpty,
}

/// Unit of a size literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeUnit {
    Byte,
    Kib,
    Mib,
    Gib,
}

impl SizeUnit {
    /// Unit code; literal bytes resolve as `size * 1024^(code - 1)`
    pub fn code(&self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Kib => 2,
            Self::Mib => 3,
            Self::Gib => 4,
        }
    }

    pub fn multiplier(&self) -> u64 {
        1024u64.pow(self.code() - 1)
    }
}

/// One property comparison between two data parts
///
/// The destination is virtual when the condition compares against a
/// literal; the literal payload then lives in `size`/`date`/
/// `name_pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicCondition {
    pub source: DataPart,
    pub property: ComparisonProperty,
    pub operator: ConditionOperator,
    pub destination: DataPart,
    /// Size literal, in `size_unit`s
    pub size: Option<u64>,
    pub size_unit: Option<SizeUnit>,
    /// Date literal, interpreted in UTC
    pub date: Option<DateTime<Utc>>,
    /// Name literal; `*` is the only glob metacharacter
    pub name_pattern: Option<String>,
}

impl AtomicCondition {
    /// A condition comparing two concrete sides
    pub fn between(
        source: DataPart,
        property: ComparisonProperty,
        operator: ConditionOperator,
        destination: DataPart,
    ) -> Self {
        Self {
            source,
            property,
            operator,
            destination,
            size: None,
            size_unit: None,
            date: None,
            name_pattern: None,
        }
    }

    /// The size literal resolved to bytes, when present and resolvable
    pub fn resolved_size_literal(&self) -> Option<u64> {
        let size = self.size?;
        let unit = self.size_unit?;
        size.checked_mul(unit.multiplier())
    }
}

/// How a rule combines its condition results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionMode {
    /// Logical AND over all conditions
    All,
    /// Logical OR over all conditions
    Any,
}

/// Action to instantiate for every item a rule matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTemplate {
    pub operator: ActionOperator,
    pub source: Option<DataPart>,
    pub destination: Option<DataPart>,
}

/// A condition-mode-combined set of conditions plus action templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynchronizationRule {
    pub id: Uuid,
    /// Only items of this type are considered
    pub file_system_type: FileSystemType,
    pub condition_mode: ConditionMode,
    pub conditions: Vec<AtomicCondition>,
    pub actions: Vec<ActionTemplate>,
    /// Cleared by the indexer when a referenced data part vanishes
    #[serde(default = "default_applicable")]
    pub is_applicable: bool,
}

fn default_applicable() -> bool {
    true
}

impl SynchronizationRule {
    pub fn new(file_system_type: FileSystemType, condition_mode: ConditionMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_system_type,
            condition_mode,
            conditions: Vec::new(),
            actions: Vec::new(),
            is_applicable: true,
        }
    }
}
