//! Small, stateless UI widgets used across components.

pub mod otp;

pub use otp::{OtpWidget, cursor_position};
