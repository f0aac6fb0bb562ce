//! # OtpView Engine
//!
//! The focus/input coordinator behind a one-time-password field: a row of
//! single-character slots that behave as one logical input.
//!
//! The coordinator is host independent. [`OtpState`] is plain data and the
//! functions in [`transition`] are the only way it changes; each returns the
//! [`OtpEffect`]s the host should react to. [`OtpField`] bundles a state with
//! its configuration and an optional completion listener, which is what a UI
//! host normally holds on to.
//!
//! ## Usage
//!
//! ```rust
//! use otpview_engine::OtpField;
//! use otpview_types::{OtpConfig, OtpEvent};
//!
//! let mut field = OtpField::new(OtpConfig::with_count(4))?;
//! field.set_on_complete_listener(|code| println!("entered {code}"));
//! for c in "1234".chars() {
//!     field.handle(OtpEvent::Char(c));
//! }
//! assert_eq!(field.state().code(), "1234");
//! # Ok::<(), otpview_types::ConfigError>(())
//! ```

pub mod field;
pub mod state;
pub mod transition;

pub use field::OtpField;
pub use otpview_types::{OtpEffect, OtpEvent, VisualState};
pub use state::{OtpState, SlotView};
