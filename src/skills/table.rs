//! Sparse per-actor skill table
//!
//! Most actors never train anything, so the backing map is only allocated on
//! the first insert and released again when the last skill is removed.

use crate::core::error::{Result, SkillError};
use crate::core::types::{Level, SkillId};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Initial map capacity once a table receives its first skill
const INITIAL_CAPACITY: usize = 3;

/// A single skill at a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub level: Level,
}

impl Skill {
    pub fn new(id: SkillId, level: Level) -> Self {
        Self { id, level }
    }
}

/// Mapping from skill id to level
///
/// Stored levels are always positive. A level that reaches zero removes the
/// entry, and a table emptied that way is indistinguishable from one that
/// never held anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Skill>", from = "Vec<Skill>")]
pub struct SkillTable {
    /// `None` until the first skill is added
    entries: Option<AHashMap<SkillId, Level>>,
}

impl SkillTable {
    pub fn new() -> Self {
        Self { entries: None }
    }

    /// Build a table from starting skills, upserting repeated ids
    pub fn from_skills<I>(skills: I) -> Self
    where
        I: IntoIterator<Item = Skill>,
    {
        let mut table = Self::new();
        for skill in skills {
            table.add(skill);
        }
        table
    }

    /// Get a skill if present
    pub fn get(&self, id: SkillId) -> Option<Skill> {
        self.entries
            .as_ref()
            .and_then(|map| map.get(&id))
            .map(|&level| Skill::new(id, level))
    }

    /// Level of a skill, 0 when absent
    pub fn level_of(&self, id: SkillId) -> Level {
        self.get(id).map_or(0, |skill| skill.level)
    }

    pub fn contains(&self, id: SkillId) -> bool {
        self.entries.as_ref().is_some_and(|map| map.contains_key(&id))
    }

    /// Ids of all present skills in ascending order
    pub fn skill_ids(&self) -> Vec<SkillId> {
        let mut ids: Vec<SkillId> = self
            .entries
            .as_ref()
            .map(|map| map.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Present skills in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = Skill> + '_ {
        self.skill_ids()
            .into_iter()
            .map(move |id| Skill::new(id, self.level_of(id)))
    }

    /// Number of present skills
    pub fn count(&self) -> usize {
        self.entries.as_ref().map_or(0, |map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Sum of all levels (0 for an empty table)
    ///
    /// Widened to `u64` so tables of large levels can't overflow.
    pub fn total_levels(&self) -> u64 {
        self.entries
            .as_ref()
            .map_or(0, |map| map.values().map(|&level| u64::from(level)).sum())
    }

    /// Insert or overwrite a skill
    ///
    /// An existing id takes the new level. A level of 0 removes the skill.
    pub fn add(&mut self, skill: Skill) {
        if self.contains(skill.id) {
            self.set_level(skill.id, skill.level);
            return;
        }
        if skill.level > 0 {
            self.map_mut().insert(skill.id, skill.level);
        }
    }

    /// Insert a skill whose id must not be present yet
    ///
    /// Fails with `DuplicateEntry` and leaves the table unchanged otherwise.
    pub fn try_insert(&mut self, skill: Skill) -> Result<()> {
        if self.contains(skill.id) {
            return Err(SkillError::DuplicateEntry(skill.id));
        }
        if skill.level > 0 {
            self.map_mut().insert(skill.id, skill.level);
        }
        Ok(())
    }

    /// Overwrite the level of a skill already in the table
    ///
    /// The caller must have added the id first. A missing id is reported as
    /// `NotFound` and the table is left untouched. A level of 0 removes it.
    pub fn update(&mut self, id: SkillId, level: Level) -> Result<()> {
        if !self.contains(id) {
            return Err(SkillError::NotFound(id));
        }
        self.set_level(id, level);
        Ok(())
    }

    /// Train a skill: create at level 1 or raise by one
    pub fn increment_or_create(&mut self, id: SkillId) {
        let level = self.map_mut().entry(id).or_insert(0);
        *level = level.saturating_add(1);
    }

    /// Lose a level in a skill, dropping it at zero. No-op if absent.
    pub fn decrement_or_remove(&mut self, id: SkillId) {
        let level = self.level_of(id);
        if level > 0 {
            self.set_level(id, level - 1);
        }
    }

    /// Remove a skill outright
    pub fn remove(&mut self, id: SkillId) -> Option<Skill> {
        let map = self.entries.as_mut()?;
        let level = map.remove(&id)?;
        if map.is_empty() {
            self.entries = None;
        }
        Some(Skill::new(id, level))
    }

    /// Set the level of a present skill, removing it at 0
    fn set_level(&mut self, id: SkillId, level: Level) {
        if level == 0 {
            self.remove(id);
        } else if let Some(map) = self.entries.as_mut() {
            map.insert(id, level);
        }
    }

    fn map_mut(&mut self) -> &mut AHashMap<SkillId, Level> {
        self.entries
            .get_or_insert_with(|| AHashMap::with_capacity(INITIAL_CAPACITY))
    }
}

impl PartialEq for SkillTable {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count() && self.iter().all(|s| other.level_of(s.id) == s.level)
    }
}

impl Eq for SkillTable {}

impl From<Vec<Skill>> for SkillTable {
    fn from(skills: Vec<Skill>) -> Self {
        Self::from_skills(skills)
    }
}

impl From<SkillTable> for Vec<Skill> {
    fn from(table: SkillTable) -> Self {
        table.iter().collect()
    }
}

impl FromIterator<Skill> for SkillTable {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        Self::from_skills(iter)
    }
}

impl fmt::Display for SkillTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, skill) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", skill.id, skill.level)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(u32, Level)]) -> SkillTable {
        entries
            .iter()
            .map(|&(id, level)| Skill::new(SkillId(id), level))
            .collect()
    }

    #[test]
    fn test_empty_table_defaults() {
        let t = SkillTable::new();
        assert!(t.get(SkillId(1)).is_none());
        assert_eq!(t.level_of(SkillId(1)), 0);
        assert!(t.skill_ids().is_empty());
        assert_eq!(t.count(), 0);
        assert_eq!(t.total_levels(), 0);
        assert!(t.entries.is_none());
    }

    #[test]
    fn test_increment_creates_then_raises() {
        let mut t = SkillTable::new();
        t.increment_or_create(SkillId(4));
        assert_eq!(t.level_of(SkillId(4)), 1);
        t.increment_or_create(SkillId(4));
        assert_eq!(t.level_of(SkillId(4)), 2);
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_decrement_level_one_removes() {
        let mut t = table(&[(1, 1), (2, 3)]);
        t.decrement_or_remove(SkillId(1));
        assert_eq!(t.level_of(SkillId(1)), 0);
        assert!(t.get(SkillId(1)).is_none());
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let mut t = table(&[(2, 3)]);
        t.decrement_or_remove(SkillId(9));
        assert_eq!(t, table(&[(2, 3)]));

        let mut empty = SkillTable::new();
        empty.decrement_or_remove(SkillId(9));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_emptied_table_equals_fresh() {
        let mut t = SkillTable::new();
        t.increment_or_create(SkillId(5));
        t.decrement_or_remove(SkillId(5));
        assert_eq!(t, SkillTable::new());
        assert!(t.entries.is_none());
        assert_eq!(t.total_levels(), 0);
        assert_eq!(t.to_string(), "{}");
    }

    #[test]
    fn test_add_twice_upserts() {
        let mut t = SkillTable::new();
        t.add(Skill::new(SkillId(3), 2));
        t.add(Skill::new(SkillId(3), 5));
        assert_eq!(t.count(), 1);
        assert_eq!(t.level_of(SkillId(3)), 5);
    }

    #[test]
    fn test_add_zero_level_is_not_stored() {
        let mut t = SkillTable::new();
        t.add(Skill::new(SkillId(3), 0));
        assert!(t.is_empty());

        t.add(Skill::new(SkillId(3), 2));
        t.add(Skill::new(SkillId(3), 0));
        assert!(t.is_empty());
    }

    #[test]
    fn test_try_insert_rejects_duplicate_key() {
        let mut t = table(&[(1, 2)]);
        let err = t.try_insert(Skill::new(SkillId(1), 4)).unwrap_err();
        assert!(matches!(err, SkillError::DuplicateEntry(SkillId(1))));
        assert_eq!(t.level_of(SkillId(1)), 2);

        t.try_insert(Skill::new(SkillId(2), 4)).unwrap();
        assert_eq!(t.level_of(SkillId(2)), 4);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut t = SkillTable::new();
        let err = t.update(SkillId(8), 3).unwrap_err();
        assert!(matches!(err, SkillError::NotFound(SkillId(8))));
        assert!(t.is_empty());
    }

    #[test]
    fn test_update_overwrites_and_zero_removes() {
        let mut t = table(&[(1, 2)]);
        t.update(SkillId(1), 6).unwrap();
        assert_eq!(t.level_of(SkillId(1)), 6);
        t.update(SkillId(1), 0).unwrap();
        assert!(!t.contains(SkillId(1)));
    }

    #[test]
    fn test_bulk_queries() {
        let t = table(&[(7, 1), (2, 4), (5, 3)]);
        assert_eq!(t.skill_ids(), vec![SkillId(2), SkillId(5), SkillId(7)]);
        assert_eq!(t.total_levels(), 8);
        assert_eq!(t.count(), 3);
        assert_eq!(t.to_string(), "{2:4, 5:3, 7:1}");
    }

    #[test]
    fn test_total_levels_of_max_levels() {
        let t = table(&[(1, Level::MAX), (2, Level::MAX), (3, 1)]);
        assert_eq!(t.total_levels(), 2 * u64::from(Level::MAX) + 1);
    }

    #[test]
    fn test_remove_returns_skill() {
        let mut t = table(&[(1, 2)]);
        assert_eq!(t.remove(SkillId(1)), Some(Skill::new(SkillId(1), 2)));
        assert_eq!(t.remove(SkillId(1)), None);
        assert!(t.entries.is_none());
    }

    #[test]
    fn test_serde_emits_sorted_skills() {
        let t = table(&[(9, 1), (3, 2)]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[{"id":3,"level":2},{"id":9,"level":1}]"#);

        let back: SkillTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);

        let empty: SkillTable = serde_json::from_str("[]").unwrap();
        assert_eq!(empty, SkillTable::new());
    }
}
