//! # OtpView terminal host
//!
//! A ratatui front end for the OTP field engine. It renders the slot row with
//! [`OtpWidget`], maps terminal input (keys, mouse clicks, bracketed paste) to
//! [`otpview_types::OtpEvent`]s, and hosts a two-screen demo: a home screen
//! with an "OTP View" button and an OTP screen that verifies the entered code.
//!
//! The widget and layout helpers are public so other ratatui hosts can draw
//! an [`otpview_engine::OtpField`] without the demo application.

mod app;
mod ui;

use anyhow::Result;

pub use app::TuiOptions;
pub use ui::layout::{row_size, slot_rects, slot_spacing};
pub use ui::theme::{THEME_DEFINITIONS, Theme, ThemeDefinition, ThemeRoles};
pub use ui::widgets::{OtpWidget, cursor_position};

/// Runs the terminal host until the user quits.
///
/// # Errors
///
/// Fails when the configuration cannot build a field or the terminal cannot
/// be set up or restored.
pub async fn run(options: TuiOptions) -> Result<()> {
    ui::runtime::run_app(options).await
}
