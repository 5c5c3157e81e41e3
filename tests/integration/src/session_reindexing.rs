//! Session re-indexing across inventory generations
//!
//! When inventories are rebuilt between comparisons, the addressable
//! data parts can change shape: the session switches between addressing
//! by inventory code and by inventory-part code, and stored rules and
//! targeted actions must be re-linked to the new generation.

use pretty_assertions::assert_eq;

use sync_engine::{
    ActionOperator, ActionRepository, ActionTemplate, AtomicCondition, ComparisonProperty,
    ConditionMode,
    ConditionOperator, DataPartIndex, InMemoryActionRepository, RuleMatcher, SynchronizationRule,
    TargetedActionsManager,
};
use sync_inventory::{
    ComparisonItem, ComparisonItemBuilder, ContentIdentityCore, DataPart, DataPartBacking,
    FileDescription, FileSystemType, Inventory, LinkingKey,
};

fn file(part: &str, path: &str, content: &[u8]) -> FileDescription {
    let core = ContentIdentityCore::from_bytes(content);
    FileDescription {
        file_system_type: FileSystemType::File,
        inventory_part_code: part.to_string(),
        relative_path: path.to_string(),
        name: path.to_string(),
        size: core.size,
        last_write_time_utc: None,
        signature_hash: core.signature_hash,
        has_analysis_error: false,
        is_accessible: true,
    }
}

/// First generation: one part per inventory
fn first_generation() -> Vec<Inventory> {
    let mut a = Inventory::new("A", "alpha");
    a.add_part("/data")
        .descriptions
        .push(file("A1", "file1.txt", b"contentA"));
    let mut b = Inventory::new("B", "beta");
    b.add_part("/backup")
        .descriptions
        .push(file("B1", "file1.txt", b"contentB_"));
    vec![a, b]
}

/// Second generation: B gained a second scanned root
fn second_generation() -> Vec<Inventory> {
    let mut session = first_generation();
    session[1]
        .add_part("/archive")
        .descriptions
        .push(file("B2", "file1.txt", b"contentB_"));
    session
}

fn items(session: &[Inventory]) -> Vec<ComparisonItem> {
    ComparisonItemBuilder::new(LinkingKey::RelativePath)
        .build(session)
        .unwrap()
}

fn mirror_rule() -> SynchronizationRule {
    let mut rule = SynchronizationRule::new(FileSystemType::File, ConditionMode::All);
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
    rule
}

#[test]
fn addressing_switches_when_any_inventory_grows_a_part() {
    let index = DataPartIndex::build(&first_generation());
    assert_eq!(index.get("A"), Some(&DataPart::inventory("A")));
    assert_eq!(index.get("B"), Some(&DataPart::inventory("B")));
    assert_eq!(index.all().count(), 2);

    let index = DataPartIndex::build(&second_generation());
    assert_eq!(index.get("B"), None);
    assert_eq!(index.get("A1"), Some(&DataPart::inventory_part("A", "A1")));
    assert_eq!(index.get("B2"), Some(&DataPart::inventory_part("B", "B2")));
    assert_eq!(index.all().count(), 3);
}

#[test]
fn rule_survives_regime_switch_only_after_remapping_back() {
    let mut rules = vec![mirror_rule()];

    // The second generation invalidates inventory-code addressing; the
    // rule is flagged, never silently dropped.
    let index = DataPartIndex::build(&second_generation());
    index.remap_rules(&mut rules);
    assert!(!rules[0].is_applicable);

    let repository = InMemoryActionRepository::new();
    let report = RuleMatcher::new(&repository)
        .run(&rules, &items(&second_generation()))
        .unwrap();
    assert_eq!(report.accepted_count(), 0);

    // A rescan back to single parts restores the rule as-is.
    let index = DataPartIndex::build(&first_generation());
    index.remap_rules(&mut rules);
    assert!(rules[0].is_applicable);
    assert!(matches!(
        rules[0].actions[0].source.as_ref().unwrap().backing,
        DataPartBacking::Inventory(ref code) if code == "A"
    ));

    let report = RuleMatcher::new(&repository)
        .run(&rules, &items(&first_generation()))
        .unwrap();
    assert_eq!(report.accepted_count(), 1);
}

#[test]
fn targeted_actions_with_vanished_endpoints_are_dropped_on_reindex() {
    let first = items(&first_generation());
    let repository = InMemoryActionRepository::new();
    let manager = TargetedActionsManager::new(&repository);

    // One hold (endpoint-free) and one transfer addressed by inventory code
    manager
        .add_targeted_action(
            &ActionTemplate {
                operator: ActionOperator::DoNothing,
                source: None,
                destination: None,
            },
            &first[..1],
        )
        .unwrap();
    let mut stored = repository.all().unwrap();
    stored.push(sync_engine::AtomicAction::new(
        ActionOperator::SynchronizeContentAndDate,
        Some(DataPart::inventory("A")),
        Some(DataPart::inventory("B")),
        first[0].path_identity.clone(),
        None,
    ));

    let index = DataPartIndex::build(&second_generation());
    index.remap_actions(&mut stored);

    // The transfer lost both endpoints; the hold has none to lose
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].operator, ActionOperator::DoNothing);
}

#[test]
fn remapped_rule_rebinds_to_part_codes() {
    let mut rule = mirror_rule();
    rule.conditions[0].source = DataPart::inventory_part("A", "A1");
    rule.conditions[0].destination = DataPart::inventory_part("B", "B1");
    rule.actions[0].source = Some(DataPart::inventory_part("A", "A1"));
    rule.actions[0].destination = Some(DataPart::inventory_part("B", "B1"));
    let mut rules = vec![rule];

    let index = DataPartIndex::build(&second_generation());
    index.remap_rules(&mut rules);
    assert!(rules[0].is_applicable);

    // The rule now runs against the multi-part snapshot
    let repository = InMemoryActionRepository::new();
    let report = RuleMatcher::new(&repository)
        .run(&rules, &items(&second_generation()))
        .unwrap();
    assert_eq!(report.accepted_count(), 1);

    let committed = repository.all().unwrap();
    assert!(matches!(
        committed[0].destination.as_ref().unwrap().backing,
        DataPartBacking::InventoryPart { ref part, .. } if part == "B1"
    ));
}
