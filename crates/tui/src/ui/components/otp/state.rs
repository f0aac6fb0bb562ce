//! State behind the OTP demo screen.
//!
//! Owns the [`OtpField`], the focus flags of the screen, and the outcome of
//! the last verification. Field effects are applied here so the component only
//! translates terminal input into [`OtpEvent`]s.

use otpview_engine::OtpField;
use otpview_types::{ConfigError, OtpConfig, OtpEffect, OtpEvent, VisualState};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info, trace};

/// Result of comparing a completed code against the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Accepted,
    Rejected,
}

/// Buttons below the field, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpAction {
    Reset,
    Back,
}

impl OtpAction {
    pub fn label(self) -> &'static str {
        match self {
            OtpAction::Reset => "Reset",
            OtpAction::Back => "Back",
        }
    }
}

#[derive(Debug)]
pub struct OtpViewState {
    container_focus: FocusFlag,
    pub f_field: FocusFlag,
    pub f_reset: FocusFlag,
    pub f_back: FocusFlag,
    field: OtpField,
    expected_code: String,
    /// Set when the field asks the host to show its keyboard.
    pub keyboard_visible: bool,
    pub last_verification: Option<Verification>,
    /// Areas from the last render, used for mouse hit testing.
    pub field_area: Rect,
    /// Bounding box of the slot row; a click anywhere inside it is a tap.
    pub row_area: Rect,
    pub button_areas: Vec<Rect>,
}

impl OtpViewState {
    pub fn new(config: OtpConfig, expected_code: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            container_focus: FocusFlag::named("otp"),
            f_field: FocusFlag::named("otp.field"),
            f_reset: FocusFlag::named("otp.reset"),
            f_back: FocusFlag::named("otp.back"),
            field: OtpField::new(config)?,
            expected_code: expected_code.into(),
            keyboard_visible: false,
            last_verification: None,
            field_area: Rect::default(),
            row_area: Rect::default(),
            button_areas: Vec::new(),
        })
    }

    pub fn field(&self) -> &OtpField {
        &self.field
    }

    pub fn actions(&self) -> [(OtpAction, &FocusFlag); 2] {
        [(OtpAction::Reset, &self.f_reset), (OtpAction::Back, &self.f_back)]
    }

    pub fn focused_action(&self) -> Option<OtpAction> {
        self.actions().into_iter().find(|(_, flag)| flag.get()).map(|(action, _)| action)
    }

    /// Feeds an input event to the field and applies what it produced.
    pub fn dispatch(&mut self, event: OtpEvent) -> Vec<OtpEffect> {
        trace!(?event, "otp input");
        let effects = self.field.handle(event);
        self.apply_effects(&effects);
        effects
    }

    /// Clears the field and any verification outcome.
    pub fn reset(&mut self) {
        let effects = self.field.reset();
        self.apply_effects(&effects);
    }

    fn apply_effects(&mut self, effects: &[OtpEffect]) {
        for effect in effects {
            match effect {
                OtpEffect::Completed { code } => self.verify(code),
                OtpEffect::ShowKeyboard => self.keyboard_visible = true,
                OtpEffect::Reset => self.last_verification = None,
                OtpEffect::StateChanged { from, to } => debug!(%from, %to, "otp visual state changed"),
                OtpEffect::FocusMoved { .. } | OtpEffect::FocusSlot { .. } => {}
            }
        }
    }

    fn verify(&mut self, code: &str) {
        let (verification, target) = if code == self.expected_code {
            (Verification::Accepted, VisualState::Success)
        } else {
            (Verification::Rejected, VisualState::Error)
        };
        info!(?verification, "otp code verified");
        self.last_verification = Some(verification);
        let effects = self.field.set_state(target);
        self.apply_effects(&effects);
    }
}

impl HasFocus for OtpViewState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_field);
        builder.leaf_widget(&self.f_reset);
        builder.leaf_widget(&self.f_back);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.field_area
    }
}
