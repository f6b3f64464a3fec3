//! Party simulation configuration with documented constants
//!
//! The skill tables themselves have no tunables. Everything here drives the
//! training simulation that exercises them, and is collected in one place so
//! runs can be reproduced from a TOML file.

use crate::core::error::{Result, SkillError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration for the party training simulation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === POPULATION ===
    /// Number of actors spawned at the start of a run
    pub actors: usize,

    /// Number of actors in the party, leader included
    ///
    /// Must be at least 1 and no larger than `actors`. The first actor
    /// spawned leads; the next `party_size - 1` follow.
    pub party_size: usize,

    // === TRAINING ===
    /// Number of simulation ticks to run
    pub ticks: u64,

    /// Chance per tick that an actor trains one random skill
    ///
    /// At 0.3 an actor gains roughly one level every three ticks, so a
    /// 100-tick run produces tables with a total of around 30 levels.
    pub train_chance: f32,

    /// Chance per tick that an actor loses a level in one trained skill
    ///
    /// Kept well below `train_chance` so tables grow over a run. Decay is
    /// what exercises the zero-level removal path.
    pub decay_chance: f32,

    // === REPRODUCIBILITY ===
    /// Seed for the simulation RNG (random if unset)
    pub seed: Option<u64>,

    /// Skill catalog to draw skill ids and shareability from
    pub catalog_path: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            actors: 6,
            party_size: 4,
            ticks: 100,
            train_chance: 0.3,
            decay_chance: 0.05,
            seed: None,
            catalog_path: PathBuf::from("data/skills.toml"),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML, filling missing fields with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.actors == 0 {
            return Err(SkillError::InvalidArgument("actors must be positive".into()));
        }

        if self.party_size == 0 || self.party_size > self.actors {
            return Err(SkillError::InvalidArgument(format!(
                "party_size ({}) should be between 1 and actors ({})",
                self.party_size, self.actors
            )));
        }

        for (name, chance) in [("train_chance", self.train_chance), ("decay_chance", self.decay_chance)] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(SkillError::InvalidArgument(format!(
                    "{} ({}) must be within 0.0..=1.0",
                    name, chance
                )));
            }
        }

        Ok(())
    }
}
