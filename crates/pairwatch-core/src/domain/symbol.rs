//! Ticker identifiers as Yahoo spells them.
//!
//! A pair leg may be an equity (`KO`), a share class (`BRK-B`, `BF.B`), an
//! index (`^GSPC`) or a currency cross (`EURUSD=X`), so ratios such as a stock
//! against its benchmark index can be monitored. Input is trimmed and
//! upper-cased before validation; the normalized form is what reaches the
//! chart URL, the result record and every error message.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized ticker of one pair leg.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

/// `^` marks an index, `=` a currency or futures suffix, `.` and `-` a share
/// class.
fn is_symbol_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '=' | '^')
}

impl Symbol {
    /// Trims, upper-cases and validates a ticker.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        let Some(first) = normalized.chars().next() else {
            return Err(ValidationError::EmptySymbol);
        };
        if !(first.is_ascii_alphabetic() || first == '^') {
            return Err(ValidationError::SymbolInvalidStart { ch: first });
        }

        let invalid = normalized
            .chars()
            .enumerate()
            .find(|(_, ch)| !is_symbol_char(*ch));
        if let Some((index, ch)) = invalid {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
