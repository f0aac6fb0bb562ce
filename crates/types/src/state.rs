use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Appearance mode applied uniformly to every slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    #[default]
    Normal,
    Success,
    Error,
}

impl VisualState {
    pub const ALL: [VisualState; 3] = [VisualState::Normal, VisualState::Success, VisualState::Error];

    pub const fn as_str(&self) -> &'static str {
        match self {
            VisualState::Normal => "normal",
            VisualState::Success => "success",
            VisualState::Error => "error",
        }
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for VisualState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(VisualState::Normal),
            "success" => Ok(VisualState::Success),
            "error" => Ok(VisualState::Error),
            other => Err(ParseEnumError {
                kind: "visual state",
                value: other.to_string(),
                expected: "normal, success, error",
            }),
        }
    }
}

/// Which characters a slot accepts and how they are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// ASCII digits only.
    #[default]
    #[serde(alias = "numeric")]
    Number,
    /// Any printable character, masked on screen.
    Password,
    /// Any printable character.
    Text,
    /// Digits plus the usual dialer punctuation.
    Phone,
}

/// Mask glyph used for password slots.
pub const PASSWORD_MASK: char = '•';

const PHONE_EXTRA_CHARS: &[char] = &['+', '*', '#', ',', ';', '(', ')', '-', '.', '/', 'N', ' '];

impl InputMode {
    /// Returns whether `c` may be entered in a slot using this mode.
    pub fn accepts(&self, c: char) -> bool {
        match self {
            InputMode::Number => c.is_ascii_digit(),
            InputMode::Phone => c.is_ascii_digit() || PHONE_EXTRA_CHARS.contains(&c),
            InputMode::Text | InputMode::Password => !c.is_control(),
        }
    }

    /// The glyph shown for a stored character.
    pub fn display(&self, c: char) -> char {
        match self {
            InputMode::Password => PASSWORD_MASK,
            _ => c,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            InputMode::Number => "number",
            InputMode::Password => "password",
            InputMode::Text => "text",
            InputMode::Phone => "phone",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" | "numeric" => Ok(InputMode::Number),
            "password" => Ok(InputMode::Password),
            "text" => Ok(InputMode::Text),
            "phone" => Ok(InputMode::Phone),
            other => Err(ParseEnumError {
                kind: "input mode",
                value: other.to_string(),
                expected: "number, password, text, phone",
            }),
        }
    }
}
