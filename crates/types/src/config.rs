//! Construction-time configuration for an OTP field.
//!
//! All options are fixed once the field is built; there is no runtime
//! reconfiguration. Every field has a serde default so partial JSON documents
//! deserialize cleanly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{InputMode, VisualState};

/// Number of slots when none is configured.
pub const DEFAULT_SLOT_COUNT: usize = 6;

/// Largest accepted slot count.
pub const MAX_SLOT_COUNT: usize = 64;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("slot count must be at least 1 (got {0})")]
    InvalidCount(usize),

    #[error("slot count must be at most {max} (got {value})")]
    CountTooLarge { max: usize, value: usize },

    #[error("{field} must be at least {min} (got {value})")]
    InvalidDimension { field: &'static str, min: u16, value: u16 },
}

/// Colors used to draw slots while a visual state is active.
///
/// Colors are host-interpreted strings (for the terminal host, anything
/// `ratatui::style::Color` parses: names, `#rrggbb`, or a 256-color index).
/// `None` means "use the host theme's color for this state".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub border: Option<String>,
    pub background: Option<String>,
}

impl Appearance {
    pub fn with_border(border: impl Into<String>) -> Self {
        Self {
            border: Some(border.into()),
            background: None,
        }
    }
}

/// Per-state appearances. A state whose entry is `None` cannot be entered
/// through `set_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearances {
    pub normal: Option<Appearance>,
    pub success: Option<Appearance>,
    pub error: Option<Appearance>,
}

impl Default for Appearances {
    fn default() -> Self {
        Self {
            normal: Some(Appearance::default()),
            success: Some(Appearance::default()),
            error: Some(Appearance::default()),
        }
    }
}

impl Appearances {
    /// No appearance configured for any state.
    pub fn none() -> Self {
        Self {
            normal: None,
            success: None,
            error: None,
        }
    }

    pub fn get(&self, state: VisualState) -> Option<&Appearance> {
        match state {
            VisualState::Normal => self.normal.as_ref(),
            VisualState::Success => self.success.as_ref(),
            VisualState::Error => self.error.as_ref(),
        }
    }

    pub fn is_configured(&self, state: VisualState) -> bool {
        self.get(state).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of slots.
    pub count: usize,
    /// Slot box width in terminal cells.
    pub slot_width: u16,
    /// Slot box height in terminal cells.
    pub slot_height: u16,
    /// Gap between slots in terminal cells.
    pub spacing: u16,
    /// Stretch the spacing so the row fills the available width.
    pub fill_width: bool,
    pub input_mode: InputMode,
    pub text_color: Option<String>,
    pub bold: bool,
    pub appearance: Appearances,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SLOT_COUNT,
            slot_width: 5,
            slot_height: 3,
            spacing: 1,
            fill_width: false,
            input_mode: InputMode::default(),
            text_color: None,
            bold: true,
            appearance: Appearances::default(),
        }
    }
}

impl OtpConfig {
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Checks the values a field cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidCount(self.count));
        }
        if self.count > MAX_SLOT_COUNT {
            return Err(ConfigError::CountTooLarge {
                max: MAX_SLOT_COUNT,
                value: self.count,
            });
        }
        if self.slot_width == 0 {
            return Err(ConfigError::InvalidDimension {
                field: "slot_width",
                min: 1,
                value: self.slot_width,
            });
        }
        if self.slot_height == 0 {
            return Err(ConfigError::InvalidDimension {
                field: "slot_height",
                min: 1,
                value: self.slot_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: OtpConfig = serde_json::from_str(r#"{ "count": 4, "input_mode": "phone" }"#).unwrap();
        assert_eq!(config.count, 4);
        assert_eq!(config.input_mode, InputMode::Phone);
        assert_eq!(config.slot_width, OtpConfig::default().slot_width);
        assert!(config.appearance.is_configured(VisualState::Error));
    }

    #[test]
    fn null_appearance_disables_state() {
        let config: OtpConfig = serde_json::from_str(r#"{ "appearance": { "error": null, "success": { "border": "green" } } }"#).unwrap();
        assert!(!config.appearance.is_configured(VisualState::Error));
        assert_eq!(
            config.appearance.get(VisualState::Success),
            Some(&Appearance::with_border("green"))
        );
        assert!(config.appearance.is_configured(VisualState::Normal));
    }

    #[test]
    fn zero_count_is_rejected() {
        assert_eq!(OtpConfig::with_count(0).validate(), Err(ConfigError::InvalidCount(0)));
        assert!(OtpConfig::with_count(1).validate().is_ok());
    }

    #[test]
    fn oversized_count_is_rejected() {
        assert!(OtpConfig::with_count(MAX_SLOT_COUNT).validate().is_ok());
        let config: OtpConfig = serde_json::from_str(r#"{ "count": 1000000000000 }"#).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::CountTooLarge {
                max: MAX_SLOT_COUNT,
                value: 1_000_000_000_000
            })
        );
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let config = OtpConfig {
            slot_height: 0,
            ..OtpConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension { field: "slot_height", .. })
        ));
    }
}
