// config.rs - Automaton settings, the `[life]` table of the settings file

use crate::error::{LifeError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the heart automaton. Every field has a serde default so a
/// partial (or empty) table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeConfig {
    /// Side of one cell in surface pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Probability that a heart cell starts alive.
    #[serde(default = "default_seed_density")]
    pub seed_density: f64,
    /// Apply one generation every this many frames.
    #[serde(default = "default_steps_every")]
    pub steps_every: u32,
    /// Pause after (re)seeding before the simulation starts.
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
    /// Raw label text; normalized by [`crate::Label`].
    #[serde(default = "default_label")]
    pub label: String,
}

fn default_cell_size() -> u32 {
    10
}
fn default_seed_density() -> f64 {
    0.55
}
fn default_steps_every() -> u32 {
    10
}
fn default_grace_ms() -> u64 {
    2000
}
fn default_label() -> String {
    "B + S".to_string()
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            seed_density: default_seed_density(),
            steps_every: default_steps_every(),
            grace_ms: default_grace_ms(),
            label: default_label(),
        }
    }
}

impl LifeConfig {
    /// Parse a standalone `LifeConfig` from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LifeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(LifeError::InvalidConfig {
                field: "cell_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.steps_every == 0 {
            return Err(LifeError::InvalidConfig {
                field: "steps_every",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.seed_density) {
            return Err(LifeError::InvalidConfig {
                field: "seed_density",
                reason: format!("must be between 0 and 1, got {}", self.seed_density),
            });
        }
        Ok(())
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}
