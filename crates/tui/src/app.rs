//! Application state for the OTP demo host.
//!
//! `App` owns every piece of UI state (the home and OTP screens, the theme,
//! and the rat-focus tree). Components mutate it in response to input and
//! return [`Effect`]s for anything the runtime has to act on.

use anyhow::{Context, Result};
use otpview_types::OtpConfig;
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::debug;

use crate::ui::components::home::HomeState;
use crate::ui::components::otp::OtpViewState;
use crate::ui::theme::{self, Theme};

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Otp,
}

/// Side effects components ask the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SwitchTo(Route),
    Quit,
}

/// Startup options for the terminal host.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub config: OtpConfig,
    /// Code the OTP screen accepts as correct.
    pub expected_code: String,
    /// Preferred theme id; falls back to `TUI_THEME` and capability detection.
    pub theme: Option<String>,
}

/// Cross-cutting context shared by every component.
#[derive(Debug)]
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
    pub active_theme_id: &'static str,
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub route: Route,
    pub home: HomeState,
    pub otp: OtpViewState,
    pub focus: Focus,
    container_focus: FocusFlag,
}

impl App {
    pub fn new(options: TuiOptions) -> Result<Self> {
        let loaded = theme::load(options.theme.as_deref());
        let otp = OtpViewState::new(options.config, options.expected_code).context("invalid OTP field configuration")?;
        let mut app = Self {
            ctx: SharedCtx {
                theme: loaded.theme,
                active_theme_id: loaded.definition.id,
            },
            route: Route::Home,
            home: HomeState::default(),
            otp,
            focus: Focus::default(),
            container_focus: FocusFlag::named("app"),
        };
        app.rebuild_focus();
        app.focus.first();
        debug!(theme = app.ctx.active_theme_id, "app initialized");
        Ok(app)
    }

    /// Rebuilds the focus tree for the current route.
    pub fn rebuild_focus(&mut self) {
        self.focus = FocusBuilder::build_for(self);
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        match self.route {
            Route::Home => builder.widget(&self.home),
            Route::Otp => builder.widget(&self.otp),
        };
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
