use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Maximum length of a participant name in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Validated participant name extracted from a document.
///
/// A name is trimmed of surrounding whitespace, 1–100 characters long, and
/// contains only letters, digits, and spaces. Validation happens exactly
/// once, at construction: any `ParticipantName` in circulation is valid.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Validate and construct a participant name.
    ///
    /// Trims surrounding whitespace, then rejects empty input, input longer
    /// than [`MAX_NAME_LEN`] characters, and any character that is not a
    /// letter, digit, or space.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidName("name is empty".into()));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(TypeError::InvalidName(format!(
                "name exceeds {MAX_NAME_LEN} characters"
            )));
        }
        if let Some(bad) = trimmed.chars().find(|c| !c.is_alphanumeric() && *c != ' ') {
            return Err(TypeError::InvalidName(format!(
                "character {bad:?} is not a letter, digit, or space"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The validated name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticipantName({:?})", self.0)
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ParticipantName> for String {
    fn from(name: ParticipantName) -> Self {
        name.0
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_name() {
        let name = ParticipantName::parse("Jane Doe").unwrap();
        assert_eq!(name.as_str(), "Jane Doe");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let name = ParticipantName::parse("  Jane Doe \n").unwrap();
        assert_eq!(name.as_str(), "Jane Doe");
    }

    #[test]
    fn accepts_digits() {
        assert!(ParticipantName::parse("Agent 47").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            ParticipantName::parse(""),
            Err(TypeError::InvalidName(_))
        ));
        assert!(matches!(
            ParticipantName::parse("   "),
            Err(TypeError::InvalidName(_))
        ));
    }

    #[test]
    fn rejects_over_long() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(ParticipantName::parse(&long).is_err());
        let max = "a".repeat(MAX_NAME_LEN);
        assert!(ParticipantName::parse(&max).is_ok());
    }

    #[test]
    fn rejects_punctuation() {
        assert!(ParticipantName::parse("Jane O'Brien").is_err());
        assert!(ParticipantName::parse("jane@example.com").is_err());
        assert!(ParticipantName::parse("Jane-Doe").is_err());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: ParticipantName = serde_json::from_str("\"Jane Doe\"").unwrap();
        assert_eq!(ok.as_str(), "Jane Doe");
        let bad: Result<ParticipantName, _> = serde_json::from_str("\"<script>\"");
        assert!(bad.is_err());
    }
}
