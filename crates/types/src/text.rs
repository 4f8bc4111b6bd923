//! Validated text primitives.
//!
//! Record boundaries accept raw user input; these wrappers guarantee the
//! invariant once and let the rest of the system stop re-checking it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace.
    #[error("Text cannot be empty")]
    Empty,
    /// The input was not a valid 10-digit phone number.
    #[error("Phone number must be exactly 10 digits")]
    InvalidPhone,
    /// The input did not name a known enumeration variant.
    #[error("unknown {what}: {value}")]
    UnknownVariant { what: &'static str, value: String },
}

/// A string guaranteed to hold at least one non-whitespace character.
///
/// Input is trimmed on construction; the stored form is the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trim the input and reject it if nothing remains.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the trimmed inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A mobile number: exactly ten ASCII digits.
///
/// Surrounding whitespace is trimmed; anything else (spaces, `+91` prefixes,
/// separators) is rejected rather than normalised, so callers see the same
/// digits the user entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if !Self::is_valid(trimmed) {
            return Err(TextError::InvalidPhone);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Whether a candidate string is a valid 10-digit number.
    pub fn is_valid(candidate: &str) -> bool {
        candidate.len() == 10 && candidate.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Phone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Phone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Phone::new(&s).map_err(serde::de::Error::custom)
    }
}
