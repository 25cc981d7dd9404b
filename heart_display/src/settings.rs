// settings.rs - Application settings file (TOML)

use anyhow::{Context, Result};
use heart_conway::LifeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_title() -> String {
    "Heart Life".to_string()
}
fn default_width() -> f32 {
    900.0
}
fn default_height() -> f32 {
    760.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Text of the first two scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionConfig {
    #[serde(default = "default_question")]
    pub question: String,
    #[serde(default = "default_yes")]
    pub yes: String,
    #[serde(default = "default_no")]
    pub no: String,
    #[serde(default = "default_celebration")]
    pub celebration: String,
}

fn default_question() -> String {
    "Will you be my Valentine?".to_string()
}
fn default_yes() -> String {
    "Yes".to_string()
}
fn default_no() -> String {
    "No".to_string()
}
fn default_celebration() -> String {
    "Yay! ♥".to_string()
}

impl Default for QuestionConfig {
    fn default() -> Self {
        Self {
            question: default_question(),
            yes: default_yes(),
            no: default_no(),
            celebration: default_celebration(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub question: QuestionConfig,
    #[serde(default)]
    pub life: LifeConfig,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).context("parsing settings")?;
        config.life.validate().context("validating [life]")?;
        Ok(config)
    }

    /// Settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }
}
