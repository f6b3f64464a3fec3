//! Save/load of skill sheets: only base and shared are stored

use skill_sheet::core::error::SkillError;
use skill_sheet::core::types::SkillId;
use skill_sheet::skills::{Skill, SkillSheet, SkillTable, StoredSheet};

fn table(entries: &[(u32, u32)]) -> SkillTable {
    entries
        .iter()
        .map(|&(id, level)| Skill::new(SkillId(id), level))
        .collect()
}

#[test]
fn test_sheet_round_trip_rebuilds_combined() {
    let mut sheet = SkillSheet::with_base(table(&[(1, 2), (5, 4)]));
    sheet.learn_shared_skills(&table(&[(1, 6)]), &[SkillId(1)][..]);
    assert_eq!(sheet.level_of(SkillId(1)), 4);

    let json = serde_json::to_string(&sheet).unwrap();
    assert!(!json.contains("combined"));

    let loaded: SkillSheet = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded.combined(), sheet.combined());
    assert_eq!(loaded.level_of(SkillId(1)), 4);
    assert_eq!(loaded.level_of(SkillId(5)), 4);
}

#[test]
fn test_missing_tables_load_as_empty() {
    let loaded: SkillSheet = serde_json::from_str(r#"{"base":[{"id":3,"level":1}]}"#).unwrap();
    assert!(loaded.shared().is_empty());
    assert_eq!(loaded.combined(), &table(&[(3, 1)]));

    let blank: SkillSheet = serde_json::from_str("{}").unwrap();
    assert_eq!(blank, SkillSheet::new());
}

#[test]
fn test_stored_zero_levels_are_dropped() {
    let loaded: SkillTable =
        serde_json::from_str(r#"[{"id":1,"level":0},{"id":2,"level":3},{"id":2,"level":5}]"#).unwrap();
    assert_eq!(loaded, table(&[(2, 5)]));
}

#[test]
fn test_stored_sheet_into_sheet() {
    let stored = StoredSheet {
        base: table(&[(1, 3), (2, 5)]),
        shared: table(&[(1, 4)]),
    };
    let sheet = SkillSheet::from(stored);
    assert_eq!(sheet.combined(), &table(&[(1, 4), (2, 5)]));
}

#[test]
fn test_malformed_save_is_serde_error() {
    let result: Result<SkillSheet, SkillError> =
        serde_json::from_str(r#"{"base":"nope"}"#).map_err(SkillError::from);
    assert!(matches!(result, Err(SkillError::SerdeError(_))));
}
