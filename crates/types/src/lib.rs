//! Shared types for the OtpView workspace.
//!
//! Everything here is plain data: the construction-time configuration of an
//! OTP field, the visual state and input mode enums, and the events/effects
//! exchanged between a host and the focus coordinator in `otpview-engine`.

pub mod config;
pub mod event;
pub mod state;

pub use config::{Appearance, Appearances, ConfigError, DEFAULT_SLOT_COUNT, MAX_SLOT_COUNT, OtpConfig};
pub use event::{OtpEffect, OtpEvent};
pub use state::{InputMode, PASSWORD_MASK, ParseEnumError, VisualState};
