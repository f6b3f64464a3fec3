//! Roster of actor skill sheets

use crate::core::error::{Result, SkillError};
use crate::core::types::ActorId;
use crate::party::Party;
use crate::skills::{ShareableSkills, SkillSheet, SkillTable};
use ahash::AHashMap;

/// All actors' skill sheets, in spawn order
#[derive(Debug, Clone, Default)]
pub struct Roster {
    sheets: AHashMap<ActorId, SkillSheet>,
    order: Vec<ActorId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new actor with the given sheet
    pub fn spawn(&mut self, sheet: SkillSheet) -> ActorId {
        let actor = ActorId::new();
        self.sheets.insert(actor, sheet);
        self.order.push(actor);
        actor
    }

    pub fn get(&self, actor: ActorId) -> Option<&SkillSheet> {
        self.sheets.get(&actor)
    }

    pub fn get_mut(&mut self, actor: ActorId) -> Option<&mut SkillSheet> {
        self.sheets.get_mut(&actor)
    }

    /// Actor ids in spawn order
    pub fn actors(&self) -> &[ActorId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn sheet(&self, actor: ActorId) -> Result<&SkillSheet> {
        self.sheets
            .get(&actor)
            .ok_or_else(|| SkillError::InvalidArgument(format!("unknown actor {:?}", actor)))
    }

    /// Re-derive every follower's shared skills from the leader's base skills
    ///
    /// All members are checked before any sheet changes.
    pub fn refresh_party<S>(&mut self, party: &Party, shareable: &S) -> Result<()>
    where
        S: ShareableSkills + ?Sized,
    {
        for actor in party.members() {
            self.sheet(actor)?;
        }

        let leader_skills: SkillTable = self.sheet(party.leader())?.base().clone();
        for &follower in party.followers() {
            if let Some(sheet) = self.sheets.get_mut(&follower) {
                sheet.learn_shared_skills(&leader_skills, shareable);
            }
        }

        tracing::debug!(
            leader = ?party.leader(),
            followers = party.followers().len(),
            "Refreshed party skills"
        );
        Ok(())
    }

    /// Remove a follower from the party and drop its shared skills
    pub fn leave_party(&mut self, party: &mut Party, actor: ActorId) -> Result<()> {
        if actor == party.leader() {
            return Err(SkillError::InvalidArgument(format!(
                "{:?} leads the party; disband it instead",
                actor
            )));
        }
        self.sheet(actor)?;
        if !party.remove_follower(actor) {
            return Err(SkillError::InvalidArgument(format!(
                "{:?} is not in the party",
                actor
            )));
        }
        if let Some(sheet) = self.sheets.get_mut(&actor) {
            sheet.forget_shared_skills();
        }
        Ok(())
    }

    /// Dissolve a party, dropping every follower's shared skills
    pub fn disband(&mut self, party: Party) {
        for follower in party.followers() {
            if let Some(sheet) = self.sheets.get_mut(follower) {
                sheet.forget_shared_skills();
            }
        }
        tracing::debug!(leader = ?party.leader(), "Disbanded party");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SkillId;
    use crate::skills::Skill;

    const BOWS: SkillId = SkillId(2);
    const MEDIC: SkillId = SkillId(14);

    fn shareable() -> Vec<SkillId> {
        vec![BOWS, MEDIC]
    }

    fn sheet(entries: &[(SkillId, u32)]) -> SkillSheet {
        SkillSheet::with_base(entries.iter().map(|&(id, lvl)| Skill::new(id, lvl)).collect())
    }

    #[test]
    fn test_refresh_shares_leader_skills() {
        let mut roster = Roster::new();
        let leader = roster.spawn(sheet(&[(BOWS, 5), (MEDIC, 2)]));
        let follower = roster.spawn(sheet(&[(BOWS, 1)]));

        let mut party = Party::new(leader);
        party.add_follower(follower).unwrap();
        roster.refresh_party(&party, shareable().as_slice()).unwrap();

        let f = roster.get(follower).unwrap();
        assert_eq!(f.level_of(BOWS), 3);
        assert_eq!(f.level_of(MEDIC), 1);
        // Leader is never changed by sharing
        assert!(roster.get(leader).unwrap().shared().is_empty());
    }

    #[test]
    fn test_unknown_member_changes_nothing() {
        let mut roster = Roster::new();
        let leader = roster.spawn(sheet(&[(BOWS, 5)]));
        let follower = roster.spawn(SkillSheet::new());

        let mut party = Party::new(leader);
        party.add_follower(follower).unwrap();
        party.add_follower(ActorId::new()).unwrap();

        let result = roster.refresh_party(&party, shareable().as_slice());
        assert!(matches!(result, Err(SkillError::InvalidArgument(_))));
        assert!(roster.get(follower).unwrap().shared().is_empty());
    }

    #[test]
    fn test_leave_party_forgets_shared() {
        let mut roster = Roster::new();
        let leader = roster.spawn(sheet(&[(MEDIC, 4)]));
        let follower = roster.spawn(SkillSheet::new());

        let mut party = Party::new(leader);
        party.add_follower(follower).unwrap();
        roster.refresh_party(&party, shareable().as_slice()).unwrap();
        assert_eq!(roster.get(follower).unwrap().level_of(MEDIC), 2);

        roster.leave_party(&mut party, follower).unwrap();
        assert_eq!(roster.get(follower).unwrap().level_of(MEDIC), 0);
        assert!(!party.contains(follower));

        assert!(roster.leave_party(&mut party, follower).is_err());
        assert!(roster.leave_party(&mut party, leader).is_err());
    }

    #[test]
    fn test_disband_forgets_all() {
        let mut roster = Roster::new();
        let leader = roster.spawn(sheet(&[(BOWS, 3)]));
        let a = roster.spawn(SkillSheet::new());
        let b = roster.spawn(SkillSheet::new());

        let mut party = Party::new(leader);
        party.add_follower(a).unwrap();
        party.add_follower(b).unwrap();
        roster.refresh_party(&party, shareable().as_slice()).unwrap();
        roster.disband(party);

        for actor in [a, b] {
            assert!(roster.get(actor).unwrap().combined().is_empty());
        }
        assert_eq!(roster.actors(), &[leader, a, b]);
    }
}
