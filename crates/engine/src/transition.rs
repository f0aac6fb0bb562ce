//! Transition functions for [`OtpState`].
//!
//! Each function applies one event to the state and returns the effects it
//! produced, in order. None of them fail: requests that make no sense in the
//! current state (typing into a filled slot, deleting from an empty first
//! slot, an empty paste) leave the state untouched and return no effects.
//!
//! Invariant kept by every function: only the active slot is editable, every
//! slot before it is filled, every slot after it is empty.

use std::ops::Range;

use otpview_types::{OtpConfig, OtpEffect, VisualState};
use tracing::debug;

use crate::state::OtpState;

/// A character was typed into the active slot.
///
/// The slot holds one character, so input into a filled active slot is
/// dropped, as are characters the input mode does not accept.
pub fn enter_char(state: &mut OtpState, config: &OtpConfig, c: char) -> Vec<OtpEffect> {
    let mut effects = Vec::new();
    if !config.input_mode.accepts(c) {
        debug!(char = ?c, mode = %config.input_mode, "rejected character");
        return effects;
    }
    let index = state.active;
    if state.slots[index].is_some() {
        return effects;
    }
    state.slots[index] = Some(c);
    forward_focus(state, &mut effects);
    check_complete(state, config, &mut effects);
    effects
}

/// The delete key was pressed in the active slot.
pub fn delete(state: &mut OtpState, config: &OtpConfig) -> Vec<OtpEffect> {
    let mut effects = Vec::new();
    let index = state.active;
    if state.slots[index].is_some() {
        state.slots[index] = None;
    } else if index > 0 {
        state.slots[index - 1] = None;
        state.active = index - 1;
        effects.push(OtpEffect::FocusMoved { from: index, to: index - 1 });
    } else {
        return effects;
    }
    check_complete(state, config, &mut effects);
    effects
}

/// Text was pasted into the active slot.
///
/// Characters the input mode rejects are dropped first. A single remaining
/// character behaves like typing it. Longer payloads are handled the way a
/// text box with a one-character limit sees them: the first character lands
/// in the active slot and focus advances, then [`distribute_paste`] spreads
/// the payload from the slot before the (new) active index. Focus settles on
/// the slot after the last one written and completion is evaluated once.
pub fn paste(state: &mut OtpState, config: &OtpConfig, text: &str) -> Vec<OtpEffect> {
    let accepted: String = text.chars().filter(|c| config.input_mode.accepts(*c)).collect();
    let mut chars = accepted.chars();
    let (Some(first), Some(_)) = (chars.next(), chars.next()) else {
        return match accepted.chars().next() {
            Some(only) => enter_char(state, config, only),
            None => Vec::new(),
        };
    };

    let mut effects = Vec::new();
    let origin = state.active;
    if state.slots[origin].is_some() {
        return effects;
    }
    state.slots[origin] = Some(first);
    if origin == state.last_index() {
        check_complete(state, config, &mut effects);
        return effects;
    }
    state.active = origin + 1;

    let written = distribute_paste(state, &accepted);
    debug!(start = written.start, end = written.end, "distributed paste");
    state.active = written.end.min(state.last_index());
    effects.push(OtpEffect::FocusMoved {
        from: origin,
        to: state.active,
    });
    check_complete(state, config, &mut effects);
    effects
}

/// Writes `text` one character per slot, starting at the slot immediately
/// before the active index (slot 0 when the first slot is active), and stops
/// at the last slot or when the text runs out.
///
/// Returns the range of slots written. The active index is not touched; the
/// caller re-establishes it afterwards.
pub fn distribute_paste(state: &mut OtpState, text: &str) -> Range<usize> {
    let start = state.active.saturating_sub(1);
    let mut end = start;
    for (slot, c) in state.slots[start..].iter_mut().zip(text.chars()) {
        *slot = Some(c);
        end += 1;
    }
    start..end
}

/// The widget was tapped: clear a rejected entry, then ask the host to focus
/// the active slot and bring up its keyboard.
pub fn tap(state: &mut OtpState, config: &OtpConfig) -> Vec<OtpEffect> {
    let mut effects = Vec::new();
    if state.visual == VisualState::Error {
        effects.extend(reset(state, config));
    }
    effects.push(OtpEffect::FocusSlot { index: state.active });
    effects.push(OtpEffect::ShowKeyboard);
    effects
}

/// Clears every slot, makes the first slot the only editable one and returns
/// to the Normal state.
pub fn reset(state: &mut OtpState, _config: &OtpConfig) -> Vec<OtpEffect> {
    let mut effects = vec![OtpEffect::Reset];
    state.slots.iter_mut().for_each(|slot| *slot = None);
    state.active = 0;
    if state.visual != VisualState::Normal {
        effects.push(OtpEffect::StateChanged {
            from: state.visual,
            to: VisualState::Normal,
        });
        state.visual = VisualState::Normal;
    }
    effects
}

/// Switches the visual state.
///
/// Does nothing when already in `target`, and refuses states whose
/// appearance is not configured.
pub fn set_state(state: &mut OtpState, config: &OtpConfig, target: VisualState) -> Vec<OtpEffect> {
    let mut effects = Vec::new();
    apply_state(state, config, target, &mut effects);
    effects
}

fn apply_state(state: &mut OtpState, config: &OtpConfig, target: VisualState, effects: &mut Vec<OtpEffect>) {
    if state.visual == target {
        return;
    }
    if !config.appearance.is_configured(target) {
        debug!(state = %target, "no appearance configured; keeping {}", state.visual);
        return;
    }
    effects.push(OtpEffect::StateChanged {
        from: state.visual,
        to: target,
    });
    state.visual = target;
}

fn forward_focus(state: &mut OtpState, effects: &mut Vec<OtpEffect>) {
    if state.active < state.last_index() {
        let from = state.active;
        state.active += 1;
        effects.push(OtpEffect::FocusMoved { from, to: state.active });
    }
}

fn check_complete(state: &mut OtpState, config: &OtpConfig, effects: &mut Vec<OtpEffect>) {
    if state.is_complete() {
        effects.push(OtpEffect::Completed { code: state.code() });
    } else {
        apply_state(state, config, VisualState::Normal, effects);
    }
}
