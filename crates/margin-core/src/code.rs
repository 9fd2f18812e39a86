use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;
use std::str::FromStr;

/// Symbols a share code may contain.
///
/// Digits `2-9` and uppercase letters, without the visually confusable
/// `0`, `1`, `O`, `I` and `L`.
pub const ALPHABET: &[u8; 31] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZ";

/// Number of symbols in every share code.
pub const CODE_LENGTH: usize = 6;

/// A validated, human-typeable share code.
///
/// Codes are always stored in their normalized (uppercase) form, so two
/// codes compare equal exactly when they address the same share.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ShareCode(SmolStr);

/// Trims surrounding whitespace and uppercases the input.
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Returns `true` if `input` normalizes to a well-formed share code.
pub fn is_valid(input: &str) -> bool {
    is_well_formed(&normalize(input))
}

fn is_well_formed(normalized: &str) -> bool {
    normalized.len() == CODE_LENGTH && normalized.bytes().all(|b| ALPHABET.contains(&b))
}

impl ShareCode {
    /// Parses user input into a `ShareCode`.
    ///
    /// The input is normalized first, so `" abc234 "` parses to `ABC234`.
    ///
    /// # Examples
    ///
    /// ```
    /// use margin_core::ShareCode;
    ///
    /// let code = ShareCode::parse(" abc234 ").unwrap();
    /// assert_eq!(code.as_str(), "ABC234");
    /// assert!(ShareCode::parse("ABC10O").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let normalized = normalize(input);
        Self::validate(&normalized)?;
        Ok(Self(SmolStr::new(normalized)))
    }

    /// Creates a `ShareCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that draw from [`ALPHABET`]).
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code))
    }

    /// Builds the retrieval URL for this code under the given frontend origin.
    pub fn to_url(&self, frontend_url: &str) -> String {
        format!("{}/?code={}", frontend_url.trim_end_matches('/'), self)
    }

    /// Returns the share code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(normalized: &str) -> Result<(), CoreError> {
        if normalized.chars().count() != CODE_LENGTH {
            return Err(CoreError::InvalidShareCode(format!(
                "length must be {}, got {}",
                CODE_LENGTH,
                normalized.chars().count()
            )));
        }

        if !is_well_formed(normalized) {
            return Err(CoreError::InvalidShareCode(format!(
                "must contain only digits 2-9 and letters other than I, L and O: '{}'",
                normalized
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ShareCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShareCode").field(&self.0).finish()
    }
}

impl Display for ShareCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShareCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ShareCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShareCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
