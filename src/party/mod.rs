//! Parties and the roster of actor skill sheets
//!
//! A party is a leader plus followers. Whenever membership or the leader's
//! skills change, followers re-derive their shared skills from the leader.

pub mod roster;

pub use roster::Roster;

use crate::core::error::{Result, SkillError};
use crate::core::types::ActorId;
use serde::{Deserialize, Serialize};

/// A leader and the actors following it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    leader: ActorId,
    followers: Vec<ActorId>,
}

impl Party {
    pub fn new(leader: ActorId) -> Self {
        Self {
            leader,
            followers: Vec::new(),
        }
    }

    pub fn leader(&self) -> ActorId {
        self.leader
    }

    pub fn followers(&self) -> &[ActorId] {
        &self.followers
    }

    /// Leader first, then followers in join order
    pub fn members(&self) -> impl Iterator<Item = ActorId> + '_ {
        std::iter::once(self.leader).chain(self.followers.iter().copied())
    }

    pub fn contains(&self, actor: ActorId) -> bool {
        self.leader == actor || self.followers.contains(&actor)
    }

    /// Member count, leader included
    pub fn size(&self) -> usize {
        1 + self.followers.len()
    }

    /// Add a follower. Joining twice, or the leader following itself, is rejected.
    pub fn add_follower(&mut self, actor: ActorId) -> Result<()> {
        if actor == self.leader {
            return Err(SkillError::InvalidArgument(format!(
                "{:?} cannot follow itself",
                actor
            )));
        }
        if self.followers.contains(&actor) {
            return Err(SkillError::InvalidArgument(format!(
                "{:?} is already in the party",
                actor
            )));
        }
        self.followers.push(actor);
        Ok(())
    }

    /// Remove a follower, returning whether it was in the party
    pub fn remove_follower(&mut self, actor: ActorId) -> bool {
        let before = self.followers.len();
        self.followers.retain(|&id| id != actor);
        self.followers.len() != before
    }
}
