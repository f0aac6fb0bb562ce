use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use otpview_types::OtpEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::state::{OtpAction, Verification};
use crate::app::{App, Effect, Route};
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::layout::{row_size, slot_rects};
use crate::ui::theme::theme_helpers as th;
use crate::ui::widgets::{OtpWidget, cursor_position};

/// Screen hosting the OTP field plus reset/back buttons.
#[derive(Debug, Default)]
pub struct OtpComponent;

impl OtpComponent {
    fn activate(app: &mut App, action: OtpAction) -> Vec<Effect> {
        match action {
            OtpAction::Reset => {
                app.otp.reset();
                app.focus.focus(&app.otp.f_field);
                Vec::new()
            }
            OtpAction::Back => vec![Effect::SwitchTo(Route::Home)],
        }
    }

    fn handle_field_key(app: &mut App, key: KeyEvent) {
        let event = match key.code {
            KeyCode::Backspace | KeyCode::Delete => OtpEvent::Delete,
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => OtpEvent::Char(c),
            _ => return,
        };
        app.otp.dispatch(event);
    }

    fn status_line<'a>(app: &'a App) -> Line<'a> {
        let theme = &*app.ctx.theme;
        match app.otp.last_verification {
            Some(Verification::Accepted) => Line::styled("Code accepted", theme.status_success()),
            Some(Verification::Rejected) => Line::styled("Code rejected, click the field to retry", theme.status_error()),
            None => {
                let count = app.otp.field().config().count;
                let mode = app.otp.field().config().input_mode;
                Line::styled(format!("Enter the {count}-character code ({mode})"), theme.text_muted_style())
            }
        }
    }
}

impl Component for OtpComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            return Self::activate(app, OtpAction::Reset);
        }
        match key.code {
            KeyCode::Esc => return vec![Effect::SwitchTo(Route::Home)],
            KeyCode::Tab => {
                app.focus.next();
            }
            KeyCode::BackTab => {
                app.focus.prev();
            }
            _ if app.otp.f_field.get() => Self::handle_field_key(app, key),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(action) = app.otp.focused_action() {
                    return Self::activate(app, action);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        if app.otp.row_area.contains(Position::new(mouse.column, mouse.row)) {
            app.focus.focus(&app.otp.f_field);
            app.otp.dispatch(OtpEvent::Tap);
            return Vec::new();
        }
        let hit = find_target_index_by_mouse_position(&app.otp.button_areas, mouse.column, mouse.row)
            .and_then(|index| app.otp.actions().get(index).map(|(action, flag)| (*action, (*flag).clone())));
        match hit {
            Some((action, flag)) => {
                app.focus.focus(&flag);
                Self::activate(app, action)
            }
            None => Vec::new(),
        }
    }

    fn handle_paste(&mut self, app: &mut App, text: &str) -> Vec<Effect> {
        if app.otp.f_field.get() {
            app.otp.dispatch(OtpEvent::Paste(text.to_string()));
        }
        Vec::new()
    }

    fn on_route_enter(&mut self, app: &mut App) -> Vec<Effect> {
        app.otp.reset();
        app.otp.keyboard_visible = false;
        app.focus.focus(&app.otp.f_field);
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let field_focused = app.otp.f_field.get();
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("OTP View"), field_focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let config = app.otp.field().config();
        let row = row_size(config, config.spacing);
        let [field_area, status_area, buttons_area] =
            Layout::vertical([Constraint::Length(row.height), Constraint::Length(2), Constraint::Length(3)])
                .flex(Flex::Center)
                .spacing(1)
                .areas(inner);

        let field = app.otp.field();
        field.render_with(|slots, visual, appearance| {
            let widget = OtpWidget::new(field.config(), slots, visual, appearance, theme).focused(field_focused);
            frame.render_widget(widget, field_area);
        });
        if field_focused && app.otp.keyboard_visible {
            let active = field.state().active_index();
            if let Some(position) = cursor_position(field.config(), field_area, active) {
                frame.set_cursor_position(position);
            }
        }
        let slot_areas = slot_rects(field.config(), field_area);
        let row_area = match (slot_areas.first(), slot_areas.last()) {
            (Some(first), Some(last)) => first.union(*last),
            _ => Rect::default(),
        };

        frame.render_widget(Paragraph::new(Self::status_line(app)).centered(), status_area);

        let button_areas = Layout::horizontal([Constraint::Length(12), Constraint::Length(12)])
            .flex(Flex::Center)
            .spacing(2)
            .split(buttons_area);
        for ((action, flag), button_area) in app.otp.actions().iter().zip(button_areas.iter()) {
            th::render_button(frame, *button_area, action.label(), flag.get(), theme);
        }

        app.otp.field_area = field_area;
        app.otp.row_area = row_area;
        app.otp.button_areas = button_areas.to_vec();
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hints = vec![("Esc", " back "), ("Tab", " next "), ("Ctrl+R", " reset ")];
        if app.otp.f_field.get() {
            hints.push(("Bksp", " delete "));
        }
        th::build_hint_spans(&*app.ctx.theme, &hints)
    }
}
