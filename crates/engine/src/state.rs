//! Plain-data state of an OTP field.
//!
//! `OtpState` is only mutated through the functions in
//! [`transition`](crate::transition); everything public here is read-only.

use otpview_types::{InputMode, VisualState};
use serde::Serialize;

/// Slot contents, active index and visual state of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpState {
    pub(crate) slots: Vec<Option<char>>,
    pub(crate) active: usize,
    pub(crate) visual: VisualState,
}

impl OtpState {
    /// Builds an empty state with `count` slots (at least one).
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count.max(1)],
            active: 0,
            visual: VisualState::Normal,
        }
    }

    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn last_index(&self) -> usize {
        self.slots.len() - 1
    }

    /// Index of the only editable slot.
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn visual_state(&self) -> VisualState {
        self.visual
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn is_editable(&self, index: usize) -> bool {
        index == self.active
    }

    /// Concatenation of every filled slot, in order.
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// True when the last slot is active and filled.
    pub fn is_complete(&self) -> bool {
        self.active == self.last_index() && self.slots[self.active].is_some()
    }

    /// Render-ready snapshot of every slot.
    pub fn slot_views(&self, input_mode: InputMode) -> Vec<SlotView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, value)| SlotView {
                index,
                value: *value,
                display: value.map(|c| input_mode.display(c)),
                editable: index == self.active,
            })
            .collect()
    }
}

/// What a host needs to draw one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub index: usize,
    /// Stored character.
    pub value: Option<char>,
    /// Character to show (masked in password mode).
    pub display: Option<char>,
    pub editable: bool,
}
