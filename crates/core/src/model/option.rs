use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── OPTION CODE ───────────────────────────────────────────────────────────────
//

/// Letter identifying one multiple-choice answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionCode {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid option code: {0:?}")]
pub struct ParseOptionCodeError(pub String);

impl OptionCode {
    /// Every code in display order.
    pub const ALL: [OptionCode; 4] = [OptionCode::A, OptionCode::B, OptionCode::C, OptionCode::D];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionCode::A => "A",
            OptionCode::B => "B",
            OptionCode::C => "C",
            OptionCode::D => "D",
        }
    }

    /// Zero-based slot of this code inside `ALL`.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            OptionCode::A => 0,
            OptionCode::B => 1,
            OptionCode::C => 2,
            OptionCode::D => 3,
        }
    }

    /// Interprets raw form input as a selection.
    ///
    /// Blank input means "nothing selected" and yields `None`, as does any
    /// value outside the alphabet.
    #[must_use]
    pub fn parse_selection(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionCode {
    type Err = ParseOptionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(OptionCode::A),
            "B" => Ok(OptionCode::B),
            "C" => Ok(OptionCode::C),
            "D" => Ok(OptionCode::D),
            _ => Err(ParseOptionCodeError(s.to_string())),
        }
    }
}

//
// ─── ANSWER OPTION ─────────────────────────────────────────────────────────────
//

/// One selectable answer: its code plus the text shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub code: OptionCode,
    pub text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(code: OptionCode, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }
}
