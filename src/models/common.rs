use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of the subject the sketch covers.
///
/// Parsing never fails: anything other than `face` is treated as `full_body`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SubjectScope {
    #[default]
    Face,
    FullBody,
}

impl SubjectScope {
    pub const ALL: [SubjectScope; 2] = [SubjectScope::Face, SubjectScope::FullBody];

    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "face" => SubjectScope::Face,
            "full_body" => SubjectScope::FullBody,
            other => {
                log::debug!("Unrecognized subject scope '{}', using full_body", other);
                SubjectScope::FullBody
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectScope::Face => "face",
            SubjectScope::FullBody => "full_body",
        }
    }
}

impl From<&str> for SubjectScope {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl From<String> for SubjectScope {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl fmt::Display for SubjectScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering style. Anything other than `realistic` is treated as `cartoon`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ArtStyle {
    #[default]
    Realistic,
    Cartoon,
}

impl ArtStyle {
    pub const ALL: [ArtStyle; 2] = [ArtStyle::Realistic, ArtStyle::Cartoon];

    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "realistic" => ArtStyle::Realistic,
            "cartoon" => ArtStyle::Cartoon,
            other => {
                log::debug!("Unrecognized art style '{}', using cartoon", other);
                ArtStyle::Cartoon
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtStyle::Realistic => "realistic",
            ArtStyle::Cartoon => "cartoon",
        }
    }
}

impl From<&str> for ArtStyle {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl From<String> for ArtStyle {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort reading of who the prompt describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderHint {
    Male,
    Female,
    Neutral,
}

/// Final positive/negative pair handed to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedPrompt {
    pub positive: String,
    pub negative: String,
}
