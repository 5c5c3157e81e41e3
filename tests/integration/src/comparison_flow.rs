//! End-to-end comparison flow
//!
//! Exercises the complete decision pipeline: scan records in, comparison
//! items built, rules matched, targeted actions assigned, and the
//! committed set flattened into transfer-ready shared action groups.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use sync_engine::{
    ActionOperator, ActionTemplate, AtomicCondition, ComparisonProperty, ConditionMode,
    ConditionOperator, InMemoryActionRepository, RuleMatcher, SharedActionsComputer,
    SynchronizationRule, TargetedActionsManager, ValidationFailureReason,
};
use sync_inventory::{
    ComparisonItem, ComparisonItemBuilder, ContentIdentityCore, DataPart, FileDescription,
    FileSystemType, Inventory, LinkingKey,
};

fn file(part: &str, path: &str, content: &[u8]) -> FileDescription {
    let core = ContentIdentityCore::from_bytes(content);
    FileDescription {
        file_system_type: FileSystemType::File,
        inventory_part_code: part.to_string(),
        relative_path: path.to_string(),
        name: path.rsplit('/').next().unwrap().to_string(),
        size: core.size,
        last_write_time_utc: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        signature_hash: core.signature_hash,
        has_analysis_error: false,
        is_accessible: true,
    }
}

/// Two machines; file1 differs between them, file2 exists only on A
fn build_session() -> Vec<ComparisonItem> {
    let mut a = Inventory::new("A", "alpha");
    let part = a.add_part("/data");
    part.descriptions.push(file("A1", "file1.txt", b"contentA"));
    part.descriptions.push(file("A1", "file2.txt", b"only-on-a"));
    let mut b = Inventory::new("B", "beta");
    b.add_part("/backup")
        .descriptions
        .push(file("B1", "file1.txt", b"contentB_"));

    ComparisonItemBuilder::new(LinkingKey::RelativePath)
        .build(&[a, b])
        .unwrap()
}

#[test]
fn targeted_synchronize_flows_through_to_one_shared_group() {
    let items = build_session();
    let repository = InMemoryActionRepository::new();
    let manager = TargetedActionsManager::new(&repository);

    let file1 = items
        .iter()
        .find(|i| i.path_identity.linking_data == "file1.txt")
        .unwrap();
    let template = ActionTemplate {
        operator: ActionOperator::SynchronizeContentAndDate,
        source: Some(DataPart::inventory("A")),
        destination: Some(DataPart::inventory("B")),
    };
    let results = manager
        .add_targeted_action(&template, std::slice::from_ref(file1))
        .unwrap();
    assert!(results[0].is_ok());

    let groups = SharedActionsComputer::compute(&items, &repository).unwrap();
    assert_eq!(groups.len(), 1);

    let group = &groups[0];
    assert_eq!(group.operator, ActionOperator::SynchronizeContentAndDate);
    assert_eq!(group.path_identity.linking_data, "file1.txt");
    assert_eq!(
        group.source.as_ref().unwrap().signature_hash,
        ContentIdentityCore::from_bytes(b"contentA").signature_hash
    );
    assert_eq!(
        group.destination.as_ref().unwrap().signature_hash,
        ContentIdentityCore::from_bytes(b"contentB_").signature_hash
    );
}

#[test]
fn mirror_rule_run_then_flattening_covers_both_items() {
    let items = build_session();
    let repository = InMemoryActionRepository::new();

    // Mirror A onto B: anything missing or different on B gets copied
    let mut rule = SynchronizationRule::new(FileSystemType::File, ConditionMode::Any);
    rule.conditions.push(AtomicCondition::between(
        DataPart::inventory("A"),
        ComparisonProperty::Content,
        ConditionOperator::NotEquals,
        DataPart::inventory("B"),
    ));
    rule.conditions.push(AtomicCondition::between(
        DataPart::inventory("A"),
        ComparisonProperty::Presence,
        ConditionOperator::NotExistsOn,
        DataPart::inventory("B"),
    ));
    rule.actions.push(ActionTemplate {
        operator: ActionOperator::SynchronizeContentAndDate,
        source: Some(DataPart::inventory("A")),
        destination: Some(DataPart::inventory("B")),
    });

    let matcher = RuleMatcher::new(&repository);
    let report = matcher.run(std::slice::from_ref(&rule), &items).unwrap();
    assert!(report.is_ok());
    assert_eq!(report.accepted_count(), 2);

    let groups = SharedActionsComputer::compute(&items, &repository).unwrap();
    assert_eq!(groups.len(), 2);

    // file2 does not exist on B yet: its target side resolves empty
    let file2_group = groups
        .iter()
        .find(|g| g.path_identity.linking_data == "file2.txt")
        .unwrap();
    assert_eq!(file2_group.destination.as_ref().unwrap().signature_hash, None);
    assert_eq!(
        file2_group.source.as_ref().unwrap().signature_hash,
        ContentIdentityCore::from_bytes(b"only-on-a").signature_hash
    );
}

#[test]
fn do_nothing_hold_survives_a_rule_run() {
    let items = build_session();
    let repository = InMemoryActionRepository::new();
    let manager = TargetedActionsManager::new(&repository);

    // The user holds file1 before rules run
    let file1 = items
        .iter()
        .find(|i| i.path_identity.linking_data == "file1.txt")
        .unwrap();
    manager
        .add_targeted_action(
            &ActionTemplate {
                operator: ActionOperator::DoNothing,
                source: None,
                destination: None,
            },
            std::slice::from_ref(file1),
        )
        .unwrap();

    let mut rule = SynchronizationRule::new(FileSystemType::File, ConditionMode::Any);
    rule.conditions.push(AtomicCondition::between(
        DataPart::inventory("A"),
        ComparisonProperty::Content,
        ConditionOperator::NotEquals,
        DataPart::inventory("B"),
    ));
    rule.actions.push(ActionTemplate {
        operator: ActionOperator::SynchronizeContentAndDate,
        source: Some(DataPart::inventory("A")),
        destination: Some(DataPart::inventory("B")),
    });

    let report = RuleMatcher::new(&repository)
        .run(std::slice::from_ref(&rule), &items)
        .unwrap();
    let summaries = report.failure_summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].reason, ValidationFailureReason::DoNothingIsExclusive);

    // Only the hold reaches the transfer stage
    let groups = SharedActionsComputer::compute(&items, &repository).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].operator, ActionOperator::DoNothing);
}

#[test]
fn missing_inventory_status_is_computed_per_item() {
    let items = build_session();
    let file2 = items
        .iter()
        .find(|i| i.path_identity.linking_data == "file2.txt")
        .unwrap();

    assert!(file2.content_repartition.missing_inventories.contains("B"));
    assert!(file2.content_repartition.missing_inventory_parts.contains("B1"));
    assert!(!file2.content_repartition.missing_inventories.contains("A"));

    let file1 = items
        .iter()
        .find(|i| i.path_identity.linking_data == "file1.txt")
        .unwrap();
    assert!(file1.content_repartition.missing_inventories.is_empty());
}
