//! Runtime: terminal lifecycle, the input producer, and the event loop.
//!
//! A dedicated blocking task reads `crossterm` events and forwards them over a
//! Tokio channel; the loop owns `App`, routes input to the current component,
//! applies returned `Effect`s and redraws after every handled event.
//! Bracketed paste is enabled so a paste arrives as one `Event::Paste`.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rat_focus::FocusBuilder;
use ratatui::{Terminal, prelude::*};
use tokio::{signal, sync::mpsc};
use tracing::{debug, info, warn};

use crate::app::{App, Effect, TuiOptions};
use crate::ui::components::Component;
use crate::ui::main_component::MainView;

type Backend = CrosstermBackend<Stdout>;

/// Spawns the blocking input reader and returns the receiving end.
///
/// `poll` and `read` stay on the same thread; mouse moves are throttled to one
/// every 16 ms.
fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    tokio::task::spawn_blocking(move || {
        let sixteen_ms = Duration::from_millis(16);
        let mut last_mouse_move = Instant::now();
        loop {
            match event::poll(sixteen_ms) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                    continue;
                }
                Ok(true) => {}
                Err(error) => {
                    warn!("Failed to poll terminal events: {error}");
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read terminal event: {error}");
                    break;
                }
            }
        }
    });
    receiver
}

/// Puts the terminal into raw mode and enters the alternate screen.
fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restores terminal settings and leaves the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<Backend>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    // Rebuild focus before drawing so structure changes are reflected.
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = FocusBuilder::rebuild_for(app, Some(old_focus));
    if app.focus.focused().is_none() {
        app.focus.first();
    }
    terminal.draw(|frame| {
        let area = frame.area();
        main_view.render(frame, area, app);
    })?;
    Ok(())
}

/// Routes one terminal event to the view.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Paste(text) => main_view.handle_paste(app, &text),
        Event::Key(_) | Event::Resize(..) | Event::FocusGained | Event::FocusLost => Vec::new(),
    }
}

/// Applies effects; returns `false` once the app should exit.
fn process_effects(app: &mut App, main_view: &mut MainView, mut effects: Vec<Effect>) -> bool {
    while !effects.is_empty() {
        let mut follow_up = Vec::new();
        for effect in effects {
            match effect {
                Effect::SwitchTo(route) => {
                    debug!(?route, "switching route");
                    follow_up.extend(main_view.set_current_route(app, route));
                }
                Effect::Quit => return false,
            }
        }
        effects = follow_up;
    }
    true
}

/// Runs the terminal host until the user quits.
pub async fn run_app(options: TuiOptions) -> Result<()> {
    let mut app = App::new(options)?;
    let mut main_view = MainView::default();
    let mut input_receiver = spawn_input_task();
    let mut terminal = setup_terminal()?;
    info!("terminal host started");

    let outcome = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver).await;
    input_receiver.close();
    cleanup_terminal(&mut terminal)?;
    info!("terminal host stopped");
    outcome
}

async fn event_loop(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    render(terminal, app, main_view)?;
    loop {
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = &event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                let effects = handle_input_event(app, main_view, event);
                if !process_effects(app, main_view, effects) {
                    break;
                }
            }
            _ = signal::ctrl_c() => { break; }
        }
        render(terminal, app, main_view)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Route;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent};
    use otpview_types::OtpConfig;

    fn app() -> App {
        temp_env::with_vars([("TUI_COLOR_MODE", Some("truecolor")), ("TUI_THEME", None)], || {
            App::new(TuiOptions {
                config: OtpConfig::with_count(3),
                expected_code: "123".into(),
                theme: None,
            })
            .unwrap()
        })
    }

    #[test]
    fn quit_effect_stops_the_loop() {
        let mut app = app();
        let mut view = MainView::default();
        assert!(process_effects(&mut app, &mut view, vec![Effect::SwitchTo(Route::Otp)]));
        assert_eq!(app.route, Route::Otp);
        assert!(!process_effects(&mut app, &mut view, vec![Effect::Quit]));
    }

    #[test]
    fn paste_event_is_routed_to_the_field() {
        let mut app = app();
        let mut view = MainView::default();
        process_effects(&mut app, &mut view, vec![Effect::SwitchTo(Route::Otp)]);
        handle_input_event(&mut app, &mut view, Event::Paste("12".into()));
        assert_eq!(app.otp.field().state().code(), "12");
        assert_eq!(app.otp.field().state().active_index(), 2);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = app();
        let mut view = MainView::default();
        process_effects(&mut app, &mut view, vec![Effect::SwitchTo(Route::Otp)]);
        let mut release = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        handle_input_event(&mut app, &mut view, Event::Key(release));
        assert_eq!(app.otp.field().state().code(), "");
    }

    #[test]
    fn click_outside_any_target_does_nothing() {
        let mut app = app();
        let mut view = MainView::default();
        let effects = handle_input_event(
            &mut app,
            &mut view,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            }),
        );
        assert!(effects.is_empty());
        assert_eq!(app.route, Route::Home);
    }
}
