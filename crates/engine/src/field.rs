//! The host-facing OTP field: configuration + state + completion listener.

use std::fmt;

use otpview_types::{Appearance, ConfigError, OtpConfig, OtpEffect, OtpEvent, VisualState};
use tracing::debug;

use crate::state::{OtpState, SlotView};
use crate::transition;

/// Callback invoked with the entered code each time the field completes.
pub type CompleteListener = Box<dyn FnMut(&str)>;

/// An OTP field as a host holds it.
///
/// Hosts forward input through [`OtpField::handle`] and react to the returned
/// effects; the completion listener, when set, is called before `handle`
/// returns.
pub struct OtpField {
    config: OtpConfig,
    state: OtpState,
    on_complete: Option<CompleteListener>,
}

impl fmt::Debug for OtpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpField")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("has_listener", &self.on_complete.is_some())
            .finish()
    }
}

impl OtpField {
    pub fn new(config: OtpConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = OtpState::new(config.count);
        Ok(Self {
            config,
            state,
            on_complete: None,
        })
    }

    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    pub fn state(&self) -> &OtpState {
        &self.state
    }

    /// Applies one input event.
    pub fn handle(&mut self, event: OtpEvent) -> Vec<OtpEffect> {
        let effects = match event {
            OtpEvent::Char(c) => transition::enter_char(&mut self.state, &self.config, c),
            OtpEvent::Delete => transition::delete(&mut self.state, &self.config),
            OtpEvent::Paste(text) => transition::paste(&mut self.state, &self.config, &text),
            OtpEvent::Tap => transition::tap(&mut self.state, &self.config),
        };
        self.notify(&effects);
        effects
    }

    /// Clears the field and returns it to its initial state.
    pub fn reset(&mut self) -> Vec<OtpEffect> {
        transition::reset(&mut self.state, &self.config)
    }

    /// Requests a visual state; see [`transition::set_state`].
    pub fn set_state(&mut self, target: VisualState) -> Vec<OtpEffect> {
        transition::set_state(&mut self.state, &self.config, target)
    }

    pub fn set_on_complete_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.on_complete = Some(Box::new(listener));
    }

    pub fn clear_on_complete_listener(&mut self) {
        self.on_complete = None;
    }

    pub fn slots(&self) -> Vec<SlotView> {
        self.state.slot_views(self.config.input_mode)
    }

    /// Appearance for the current visual state, if configured.
    pub fn appearance(&self) -> Option<&Appearance> {
        self.config.appearance.get(self.state.visual_state())
    }

    /// Hands the render-ready view of the field to `render`.
    pub fn render_with<R>(&self, render: impl FnOnce(&[SlotView], VisualState, Option<&Appearance>) -> R) -> R {
        render(&self.slots(), self.state.visual_state(), self.appearance())
    }

    fn notify(&mut self, effects: &[OtpEffect]) {
        for effect in effects {
            if let OtpEffect::Completed { code } = effect {
                debug!(len = code.chars().count(), "otp entry completed");
                if let Some(listener) = self.on_complete.as_mut() {
                    listener(code);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn collecting_field(count: usize) -> (OtpField, Rc<RefCell<Vec<String>>>) {
        let mut field = OtpField::new(OtpConfig::with_count(count)).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        field.set_on_complete_listener(move |code| sink.borrow_mut().push(code.to_string()));
        (field, seen)
    }

    #[test]
    fn rejects_invalid_config() {
        let err = OtpField::new(OtpConfig::with_count(0)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidCount(0));
    }

    #[test]
    fn listener_fires_only_on_completion() {
        let (mut field, seen) = collecting_field(5);
        for c in "1234".chars() {
            field.handle(OtpEvent::Char(c));
        }
        assert!(seen.borrow().is_empty());
        assert_eq!(field.state().visual_state(), VisualState::Normal);

        field.handle(OtpEvent::Char('5'));
        assert_eq!(*seen.borrow(), vec!["12345".to_string()]);
    }

    #[test]
    fn listener_fires_again_after_correction() {
        let (mut field, seen) = collecting_field(2);
        field.handle(OtpEvent::Paste("12".into()));
        field.handle(OtpEvent::Delete);
        field.handle(OtpEvent::Char('3'));
        assert_eq!(*seen.borrow(), vec!["12".to_string(), "13".to_string()]);
    }

    #[test]
    fn cleared_listener_is_not_called() {
        let (mut field, seen) = collecting_field(1);
        field.clear_on_complete_listener();
        let effects = field.handle(OtpEvent::Char('1'));
        assert!(seen.borrow().is_empty());
        assert!(effects.contains(&OtpEffect::Completed { code: "1".into() }));
    }

    #[test]
    fn render_with_exposes_current_appearance() {
        let mut field = OtpField::new(OtpConfig::with_count(3)).unwrap();
        field.set_state(VisualState::Success);
        let (editable, state, configured) = field.render_with(|slots, state, appearance| {
            (
                slots.iter().filter(|slot| slot.editable).count(),
                state,
                appearance.is_some(),
            )
        });
        assert_eq!(editable, 1);
        assert_eq!(state, VisualState::Success);
        assert!(configured);
    }
}
