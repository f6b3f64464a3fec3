//! Skill Sheet - per-actor skill tables with party skill sharing

pub mod core;
pub mod party;
pub mod skills;
