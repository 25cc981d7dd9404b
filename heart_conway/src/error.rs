// error.rs - Error types for heart_conway

use thiserror::Error;

/// Errors raised while loading or validating settings.
///
/// Nothing in the per-frame path returns these; the frame loop treats
/// not-ready surfaces as no-ops.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid label: {0}")]
    InvalidLabel(String),
}

/// Result type alias for heart_conway operations
pub type Result<T> = std::result::Result<T, LifeError>;

impl From<toml::de::Error> for LifeError {
    fn from(err: toml::de::Error) -> Self {
        LifeError::TomlParse(err.to_string())
    }
}
