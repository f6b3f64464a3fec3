//! Per-actor skill sheet: base, shared and combined tables

use crate::core::types::{Level, SkillId};
use crate::skills::sharing::{derive_shared_table, merge_tables, ShareableSkills};
use crate::skills::table::SkillTable;
use serde::{Deserialize, Serialize};

/// Base and shared tables as they are persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredSheet {
    #[serde(default)]
    pub base: SkillTable,
    #[serde(default)]
    pub shared: SkillTable,
}

/// The three skill tables owned by one actor
///
/// `combined` is rebuilt from `base` and `shared` after every change to
/// either, so it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StoredSheet", from = "StoredSheet")]
pub struct SkillSheet {
    base: SkillTable,
    shared: SkillTable,
    combined: SkillTable,
}

impl SkillSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet starting with the given trained skills
    pub fn with_base(base: SkillTable) -> Self {
        Self::from_tables(base, SkillTable::new())
    }

    /// Rebuild a sheet from persisted base and shared tables
    pub fn from_tables(base: SkillTable, shared: SkillTable) -> Self {
        let mut sheet = Self {
            base,
            shared,
            combined: SkillTable::new(),
        };
        sheet.recompute_combined();
        sheet
    }

    /// Independent copy of another actor's base and shared skills
    pub fn copy_from(other: &SkillSheet) -> Self {
        Self::from_tables(other.base.clone(), other.shared.clone())
    }

    /// Skills the actor trained itself
    pub fn base(&self) -> &SkillTable {
        &self.base
    }

    /// Skills currently borrowed from a leader
    pub fn shared(&self) -> &SkillTable {
        &self.shared
    }

    /// Effective skills used by gameplay
    pub fn combined(&self) -> &SkillTable {
        &self.combined
    }

    /// Effective level of a skill
    pub fn level_of(&self, id: SkillId) -> Level {
        self.combined.level_of(id)
    }

    /// Mutate the base table, recomputing the combined view afterwards
    pub fn modify_base<R>(&mut self, f: impl FnOnce(&mut SkillTable) -> R) -> R {
        let result = f(&mut self.base);
        self.recompute_combined();
        result
    }

    /// Train a base skill by one level
    pub fn train(&mut self, id: SkillId) {
        self.modify_base(|base| base.increment_or_create(id));
    }

    /// Lose one base level in a skill
    pub fn untrain(&mut self, id: SkillId) {
        self.modify_base(|base| base.decrement_or_remove(id));
    }

    /// Rebuild `combined` from `base` and `shared`
    pub fn recompute_combined(&mut self) {
        self.combined = merge_tables(&self.base, &self.shared);
        tracing::trace!(
            base = self.base.count(),
            shared = self.shared.count(),
            combined = self.combined.count(),
            "Recomputed combined skills"
        );
    }

    /// Replace shared skills with those derived from a leader's table
    ///
    /// Previously shared skills that no longer qualify are dropped.
    pub fn learn_shared_skills<S>(&mut self, leader: &SkillTable, shareable: &S)
    where
        S: ShareableSkills + ?Sized,
    {
        self.shared = derive_shared_table(leader, &self.base, shareable);
        tracing::debug!(
            leader_skills = leader.count(),
            shared = self.shared.count(),
            "Learned shared skills"
        );
        self.recompute_combined();
    }

    /// Drop all shared skills, e.g. when leaving a party
    pub fn forget_shared_skills(&mut self) {
        if !self.shared.is_empty() {
            tracing::debug!(shared = self.shared.count(), "Forgot shared skills");
        }
        self.shared = SkillTable::new();
        self.recompute_combined();
    }
}

impl From<StoredSheet> for SkillSheet {
    fn from(stored: StoredSheet) -> Self {
        Self::from_tables(stored.base, stored.shared)
    }
}

impl From<SkillSheet> for StoredSheet {
    fn from(sheet: SkillSheet) -> Self {
        Self {
            base: sheet.base,
            shared: sheet.shared,
        }
    }
}
