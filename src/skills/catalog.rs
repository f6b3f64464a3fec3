//! Skill catalog loaded from TOML
//!
//! The catalog names each skill id and marks which skills a party leader can
//! share with followers. It is passed explicitly wherever shareability is
//! needed.

use crate::core::error::{Result, SkillError};
use crate::core::types::SkillId;
use crate::skills::sharing::ShareableSkills;
use ahash::AHashMap;
use serde::Deserialize;
use std::path::Path;

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    /// Whether a leader can share this skill with its party
    #[serde(default)]
    pub shareable: bool,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "skill")]
    skills: Vec<SkillDef>,
}

/// All known skills, indexed by id
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    defs: Vec<SkillDef>,
    by_id: AHashMap<SkillId, usize>,
}

impl SkillCatalog {
    /// Build a catalog, rejecting duplicate ids and blank names
    pub fn new(defs: Vec<SkillDef>) -> Result<Self> {
        let mut by_id = AHashMap::with_capacity(defs.len());
        for (idx, def) in defs.iter().enumerate() {
            if def.name.trim().is_empty() {
                return Err(SkillError::InvalidArgument(format!(
                    "skill {} has an empty name",
                    def.id
                )));
            }
            if by_id.insert(def.id, idx).is_some() {
                return Err(SkillError::InvalidArgument(format!(
                    "skill id {} listed more than once",
                    def.id
                )));
            }
        }
        Ok(Self { defs, by_id })
    }

    /// Parse a catalog from TOML `[[skill]]` entries
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.skills)
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            skills = catalog.len(),
            shareable = catalog.shareable_ids().len(),
            "Loaded skill catalog from {}",
            path.display()
        );
        Ok(catalog)
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillDef> {
        self.by_id.get(&id).map(|&idx| &self.defs[idx])
    }

    /// Case-insensitive lookup by name
    pub fn find_by_name(&self, name: &str) -> Option<&SkillDef> {
        self.defs.iter().find(|def| def.name.eq_ignore_ascii_case(name))
    }

    /// Display name for an id, falling back to the number
    pub fn name_of(&self, id: SkillId) -> String {
        self.get(id)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    /// Ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.defs.iter().map(|def| def.id)
    }

    pub fn shareable_ids(&self) -> Vec<SkillId> {
        self.defs.iter().filter(|def| def.shareable).map(|def| def.id).collect()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl ShareableSkills for SkillCatalog {
    fn is_shareable(&self, id: SkillId) -> bool {
        self.get(id).is_some_and(|def| def.shareable)
    }
}
