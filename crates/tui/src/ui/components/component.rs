//! Component system for the terminal host.
//!
//! Components are self-contained UI elements that handle their own events and
//! rendering while integrating with the application through a consistent
//! interface: they mutate their slice of [`App`] state and report anything
//! that crosses component boundaries back as [`Effect`]s.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::{App, Effect};

/// A UI component with its own behavior.
///
/// Rendering should be free of side effects apart from drawing, cursor
/// placement, and caching the areas used for mouse hit testing.
pub(crate) trait Component {
    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a bracketed paste delivered by the terminal as one event.
    fn handle_paste(&mut self, _app: &mut App, _text: &str) -> Vec<Effect> {
        Vec::new()
    }

    /// Called when the route showing this component becomes active.
    fn on_route_enter(&mut self, _app: &mut App) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while this component is active.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }
}
