//! Supported completion models.

use std::fmt;
use std::str::FromStr;

use super::error::TranslateError;

/// Model tier used for the completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Model {
    /// Fast, inexpensive tier.
    #[default]
    Gpt35Turbo,
    /// Higher quality tier.
    Gpt4,
}

impl Model {
    pub const ALL: [Self; 2] = [Self::Gpt35Turbo, Self::Gpt4];

    /// The model identifier sent to the API.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4 => "gpt-4",
        }
    }
}

impl FromStr for Model {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TranslateError::UnsupportedModel(s.to_string()))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
