use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use super::components::{Component, HomeComponent, OtpComponent};
use super::layout::main_layout;
use super::theme::theme_helpers as th;
use crate::app::{App, Effect, Route};

/// Root view: title bar, the component for the current route, and hints.
pub struct MainView {
    content_view: Box<dyn Component>,
}

impl std::fmt::Debug for MainView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainView").finish_non_exhaustive()
    }
}

impl Default for MainView {
    fn default() -> Self {
        Self {
            content_view: Box::new(HomeComponent),
        }
    }
}

impl MainView {
    /// Swaps the content component and rebuilds focus for the new route.
    /// Use `Effect::SwitchTo` rather than calling this directly.
    pub fn set_current_route(&mut self, app: &mut App, route: Route) -> Vec<Effect> {
        self.content_view = match route {
            Route::Home => Box::new(HomeComponent),
            Route::Otp => Box::new(OtpComponent),
        };
        app.route = route;
        app.rebuild_focus();
        app.focus.first();
        self.content_view.on_route_enter(app)
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        self.content_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        self.content_view.handle_mouse_events(app, mouse)
    }

    fn handle_paste(&mut self, app: &mut App, text: &str) -> Vec<Effect> {
        self.content_view.handle_paste(app, text)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the background so themes render consistently.
        frame.render_widget(Block::default().style(Style::default().bg(app.ctx.theme.roles().background)), area);

        let [title, body, hints] = main_layout(area);
        let heading = match app.route {
            Route::Home => "otpview",
            Route::Otp => "otpview / OTP View",
        };
        frame.render_widget(Paragraph::new(heading).style(app.ctx.theme.accent_emphasis_style()), title);

        self.content_view.render(frame, body, app);

        let hint_spans = self.get_hint_spans(app);
        frame.render_widget(Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style()), hints);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut spans = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        spans.extend(self.content_view.get_hint_spans(app));
        spans.extend(th::build_hint_spans(&*app.ctx.theme, &[("Ctrl+C", " quit")]));
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TuiOptions;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
    use otpview_types::{OtpConfig, VisualState};
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        app_with(OtpConfig::with_count(5))
    }

    fn app_with(config: OtpConfig) -> App {
        temp_env::with_vars([("TUI_COLOR_MODE", Some("truecolor")), ("TUI_THEME", None)], || {
            App::new(TuiOptions {
                config,
                expected_code: "12345".into(),
                theme: None,
            })
            .unwrap()
        })
    }

    fn click(view: &mut MainView, app: &mut App, column: u16, row: u16) {
        view.handle_mouse_events(
            app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn press(view: &mut MainView, app: &mut App, code: KeyCode) -> Vec<Effect> {
        view.handle_key_events(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn draw(view: &mut MainView, app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, app);
            })
            .unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn enter_on_home_opens_otp_screen() {
        let mut app = app();
        let mut view = MainView::default();
        assert!(draw(&mut view, &mut app).contains("OTP View"));

        let effects = press(&mut view, &mut app, KeyCode::Enter);
        assert_eq!(effects, vec![Effect::SwitchTo(Route::Otp)]);
        view.set_current_route(&mut app, Route::Otp);
        assert_eq!(app.route, Route::Otp);
        assert!(app.otp.f_field.get());
    }

    #[test]
    fn typing_the_expected_code_succeeds() {
        let mut app = app();
        let mut view = MainView::default();
        view.set_current_route(&mut app, Route::Otp);
        for c in "12345".chars() {
            press(&mut view, &mut app, KeyCode::Char(c));
        }
        assert_eq!(app.otp.field().state().visual_state(), VisualState::Success);
        assert!(draw(&mut view, &mut app).contains("Code accepted"));
    }

    #[test]
    fn paste_reaches_the_field_and_esc_goes_home() {
        let mut app = app();
        let mut view = MainView::default();
        view.set_current_route(&mut app, Route::Otp);
        press(&mut view, &mut app, KeyCode::Char('9'));
        view.handle_paste(&mut app, "9999");
        assert_eq!(app.otp.field().state().visual_state(), VisualState::Error);

        let effects = press(&mut view, &mut app, KeyCode::Esc);
        assert_eq!(effects, vec![Effect::SwitchTo(Route::Home)]);
    }

    #[test]
    fn ctrl_r_resets_the_field() {
        let mut app = app();
        let mut view = MainView::default();
        view.set_current_route(&mut app, Route::Otp);
        press(&mut view, &mut app, KeyCode::Char('1'));
        view.handle_key_events(&mut app, KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.otp.field().state().code(), "");
        assert_eq!(app.otp.field().state().active_index(), 0);
    }

    #[test]
    fn keys_do_not_reach_the_field_when_a_button_is_focused() {
        let mut app = app();
        let mut view = MainView::default();
        view.set_current_route(&mut app, Route::Otp);
        press(&mut view, &mut app, KeyCode::Tab);
        assert!(app.otp.f_reset.get());
        press(&mut view, &mut app, KeyCode::Char('1'));
        assert_eq!(app.otp.field().state().code(), "");
    }

    #[test]
    fn click_between_slots_clears_a_rejected_code() {
        let mut app = app_with(OtpConfig {
            fill_width: true,
            ..OtpConfig::with_count(3)
        });
        let mut view = MainView::default();
        view.set_current_route(&mut app, Route::Otp);
        for c in "999".chars() {
            press(&mut view, &mut app, KeyCode::Char(c));
        }
        assert_eq!(app.otp.field().state().visual_state(), VisualState::Error);
        draw(&mut view, &mut app);

        let row = app.otp.row_area;
        let slot_width = app.otp.field().config().slot_width;
        let gap_x = row.x + slot_width + 1;
        assert!(row.width > slot_width * 3 + 2, "fill width should leave wide gaps");
        click(&mut view, &mut app, gap_x, row.y + 1);

        assert_eq!(app.otp.field().state().visual_state(), VisualState::Normal);
        assert_eq!(app.otp.field().state().code(), "");
        assert!(app.otp.keyboard_visible);
        assert!(app.otp.f_field.get());
    }

    #[test]
    fn click_outside_the_slot_row_is_not_a_tap() {
        let mut app = app();
        let mut view = MainView::default();
        view.set_current_route(&mut app, Route::Otp);
        draw(&mut view, &mut app);
        let row = app.otp.row_area;
        click(&mut view, &mut app, row.x, row.y.saturating_sub(2));
        assert!(!app.otp.keyboard_visible);
    }
}
