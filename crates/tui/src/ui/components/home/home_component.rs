use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::Span,
    widgets::Paragraph,
};

use super::state::HomeAction;
use crate::app::{App, Effect, Route};
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::theme_helpers as th;

/// Landing screen with a button that opens the OTP demo.
#[derive(Debug, Default)]
pub struct HomeComponent;

impl HomeComponent {
    fn activate(action: HomeAction) -> Vec<Effect> {
        match action {
            HomeAction::OpenOtp => vec![Effect::SwitchTo(Route::Otp)],
        }
    }
}

impl Component for HomeComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => {
                app.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => {
                app.focus.prev();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(action) = app.home.focused_action() {
                    return Self::activate(action);
                }
            }
            KeyCode::Char('o') => return Self::activate(HomeAction::OpenOtp),
            KeyCode::Char('q') => return vec![Effect::Quit],
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let Some(index) = find_target_index_by_mouse_position(&app.home.button_areas, mouse.column, mouse.row) else {
            return Vec::new();
        };
        let Some((action, flag)) = app.home.actions().get(index).map(|(action, flag)| (*action, (*flag).clone())) else {
            return Vec::new();
        };
        app.focus.focus(&flag);
        Self::activate(action)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Home"), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [intro, buttons] = Layout::vertical([Constraint::Length(2), Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(inner);
        frame.render_widget(
            Paragraph::new("One-time password entry demo").centered().style(theme.text_muted_style()),
            intro,
        );

        let button_areas = Layout::horizontal([Constraint::Length(14)]).flex(Flex::Center).split(buttons);
        for ((action, flag), button_area) in app.home.actions().iter().zip(button_areas.iter()) {
            th::render_button(frame, *button_area, action.label(), flag.get(), theme);
        }
        app.home.button_areas = button_areas.to_vec();
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[("Enter", " open "), ("Tab", " next "), ("q", " quit ")])
    }
}
