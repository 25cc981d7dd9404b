// label.rs - Display label shown inside the heart, e.g. "B + S"

use crate::error::{LifeError, Result};

/// Shown when the configured label can't be normalized.
pub const PLACEHOLDER: &str = "? + ?";

/// A validated two-initial label in `"A + B"` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
}

impl Label {
    /// Normalize free-form input into `"A + B"`.
    ///
    /// Accepts anything that contains exactly two ASCII letters or digits once
    /// separators (`+`, `&`, whitespace, `-`, `.`) are stripped: `"bs"`,
    /// `"B+S"`, `"b & s"` all become `"B + S"`.
    pub fn parse(input: &str) -> Result<Self> {
        let mut initials = Vec::with_capacity(2);
        for ch in input.trim().chars() {
            if ch.is_ascii_alphanumeric() {
                initials.push(ch.to_ascii_uppercase());
            } else if !matches!(ch, '+' | '&' | '-' | '.') && !ch.is_whitespace() {
                return Err(LifeError::InvalidLabel(format!(
                    "unexpected character {ch:?} in {input:?}"
                )));
            }
        }

        match initials.as_slice() {
            [a, b] => Ok(Self {
                text: format!("{a} + {b}"),
            }),
            [] => Err(LifeError::InvalidLabel("label is empty".to_string())),
            other => Err(LifeError::InvalidLabel(format!(
                "expected two initials, found {} in {input:?}",
                other.len()
            ))),
        }
    }

    /// Like [`Label::parse`], but falls back to [`PLACEHOLDER`] with a warning.
    pub fn parse_or_placeholder(input: &str) -> Self {
        match Self::parse(input) {
            Ok(label) => label,
            Err(err) => {
                log::warn!("{err}; using placeholder label {PLACEHOLDER:?}");
                Self::placeholder()
            }
        }
    }

    pub fn placeholder() -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
