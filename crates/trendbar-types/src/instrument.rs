//! Traded instrument identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::InstrumentParseError;

/// Identifier of a traded instrument (e.g. `EURJPY`, `BTCUSD`).
///
/// Identifiers are normalised to upper case, so `eurjpy` and `EURJPY` name the
/// same instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instrument(String);

impl Instrument {
    /// Creates an instrument identifier, normalising it to upper case.
    ///
    /// No validation is applied; use [`str::parse`] for untrusted input.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_uppercase())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Instrument {
    type Err = InstrumentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InstrumentParseError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(InstrumentParseError::Whitespace(s.to_string()));
        }
        Ok(Self::new(trimmed))
    }
}

impl TryFrom<String> for Instrument {
    type Error = InstrumentParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<&str> for Instrument {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Instrument> for String {
    fn from(value: Instrument) -> Self {
        value.0
    }
}
