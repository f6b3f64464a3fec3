//! Party skill sharing rules
//!
//! A follower borrows skills from its leader: for each shareable skill the
//! leader is better at, the follower works at the average of both levels,
//! rounded up.

use crate::core::types::{Level, SkillId};
use crate::skills::table::{Skill, SkillTable};
use ahash::AHashSet;
use std::collections::{BTreeSet, HashSet};

/// Membership test for skills that may be shared within a party
pub trait ShareableSkills {
    fn is_shareable(&self, id: SkillId) -> bool;
}

impl ShareableSkills for AHashSet<SkillId> {
    fn is_shareable(&self, id: SkillId) -> bool {
        self.contains(&id)
    }
}

impl ShareableSkills for HashSet<SkillId> {
    fn is_shareable(&self, id: SkillId) -> bool {
        self.contains(&id)
    }
}

impl ShareableSkills for BTreeSet<SkillId> {
    fn is_shareable(&self, id: SkillId) -> bool {
        self.contains(&id)
    }
}

impl ShareableSkills for [SkillId] {
    fn is_shareable(&self, id: SkillId) -> bool {
        self.contains(&id)
    }
}

impl<T: ShareableSkills + ?Sized> ShareableSkills for &T {
    fn is_shareable(&self, id: SkillId) -> bool {
        (**self).is_shareable(id)
    }
}

/// Level a follower works at when sharing a leader's skill
///
/// `ceil((leader + follower) / 2)`. Returns `None` when the follower is
/// already at or above the leader, since nothing would be gained.
pub fn shared_level(leader: Level, follower: Level) -> Option<Level> {
    if leader <= follower {
        return None;
    }
    // u64 so two large levels can't overflow before halving
    let level = (u64::from(leader) + u64::from(follower)).div_ceil(2);
    Some(level as Level)
}

/// Derive a fresh shared table for a follower from its leader's skills
pub fn derive_shared_table<S>(leader: &SkillTable, follower: &SkillTable, shareable: &S) -> SkillTable
where
    S: ShareableSkills + ?Sized,
{
    leader
        .iter()
        .filter(|skill| shareable.is_shareable(skill.id))
        .filter_map(|skill| {
            shared_level(skill.level, follower.level_of(skill.id)).map(|level| Skill::new(skill.id, level))
        })
        .collect()
}

/// Combine base and shared skills, shared taking precedence
///
/// Shared levels are never below the matching base level, so base entries
/// only fill in ids without a shared boost.
pub fn merge_tables(base: &SkillTable, shared: &SkillTable) -> SkillTable {
    let mut combined = SkillTable::new();
    for skill in shared.iter() {
        // Fresh table and unique shared ids: a duplicate here is a bookkeeping bug
        if let Err(err) = combined.try_insert(skill) {
            tracing::error!(%err, "Duplicate shared skill while merging");
        }
    }
    for skill in base.iter() {
        if !combined.contains(skill.id) {
            combined.add(skill);
        }
    }
    combined
}
