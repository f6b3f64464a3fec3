//! Actor skill bookkeeping
//!
//! Each actor keeps the skills it trained itself (base), skills borrowed from
//! a party leader (shared), and the combined view gameplay reads. Shared
//! levels win over base levels for the same skill.

pub mod catalog;
pub mod sharing;
pub mod sheet;
pub mod table;

pub use catalog::{SkillCatalog, SkillDef};
pub use sharing::{derive_shared_table, merge_tables, shared_level, ShareableSkills};
pub use sheet::{SkillSheet, StoredSheet};
pub use table::{Skill, SkillTable};
