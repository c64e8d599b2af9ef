//! Warp-name validation for storage safety and menu readability.

use thiserror::Error;

/// Warp name validation errors with player-facing messages
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WarpNameError {
    #[error("warp name is empty")]
    Empty,

    #[error("warp name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("warp name cannot start or end with whitespace")]
    InvalidWhitespace,

    #[error("warp name contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },
}

/// Warp name validation rules configuration
#[derive(Debug, Clone)]
pub struct WarpNameRules {
    pub max_length: usize,
    pub allow_spaces: bool,
}

impl Default for WarpNameRules {
    fn default() -> Self {
        Self {
            max_length: 24,
            allow_spaces: true,
        }
    }
}

impl WarpNameRules {
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Validate a player-supplied warp name against these rules.
    ///
    /// Names are kept to printable characters so they render cleanly in
    /// menus and chat; control characters and non-ASCII symbols are
    /// rejected rather than silently stripped.
    pub fn validate(&self, name: &str) -> Result<(), WarpNameError> {
        if name.is_empty() {
            return Err(WarpNameError::Empty);
        }
        if name.chars().count() > self.max_length {
            return Err(WarpNameError::TooLong {
                max: self.max_length,
            });
        }
        if name != name.trim() {
            return Err(WarpNameError::InvalidWhitespace);
        }

        let bad: String = name
            .chars()
            .filter(|c| !self.is_allowed_char(*c))
            .collect();
        if !bad.is_empty() {
            return Err(WarpNameError::InvalidCharacters { chars: bad });
        }

        Ok(())
    }

    fn is_allowed_char(&self, c: char) -> bool {
        if c == ' ' {
            return self.allow_spaces;
        }
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '\'')
    }
}
