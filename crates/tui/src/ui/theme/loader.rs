//! Theme selection and terminal capability detection.

use std::env;

use tracing::debug;

use super::{Theme, ThemeDefinition, catalog};

/// Environment variable naming the theme to use.
pub const THEME_ENV: &str = "TUI_THEME";
/// Environment variable forcing the color capability (`truecolor` or `ansi256`).
pub const COLOR_MODE_ENV: &str = "TUI_COLOR_MODE";

/// Loaded theme plus the definition that produced it.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorCapability {
    Truecolor,
    Ansi256,
}

/// Selects a theme from terminal capability, the `TUI_THEME` override and the
/// caller's preference, in that order.
pub fn load(preferred_theme: Option<&str>) -> LoadedTheme {
    if detect_color_capability() == ColorCapability::Ansi256 {
        debug!("ANSI-only terminal detected; forcing fallback palette.");
        return LoadedTheme::from_definition(catalog::default_ansi());
    }

    if let Ok(theme_name) = env::var(THEME_ENV)
        && let Some(definition) = catalog::resolve(&theme_name)
    {
        return LoadedTheme::from_definition(definition);
    }

    if let Some(name) = preferred_theme {
        match catalog::resolve(name) {
            Some(definition) => return LoadedTheme::from_definition(definition),
            None => debug!(theme = name, known = %catalog::known_ids(), "unknown theme requested"),
        }
    }

    LoadedTheme::from_definition(catalog::default_truecolor())
}

fn detect_color_capability() -> ColorCapability {
    if let Some(mode) = env::var(COLOR_MODE_ENV).ok().and_then(|value| parse_color_mode(value.trim())) {
        return mode;
    }

    let color_term = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
    if color_term.contains("truecolor") || color_term.contains("24bit") {
        return ColorCapability::Truecolor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term.contains("truecolor") || term.contains("direct") {
        return ColorCapability::Truecolor;
    }

    ColorCapability::Ansi256
}

fn parse_color_mode(value: &str) -> Option<ColorCapability> {
    match value.to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" => Some(ColorCapability::Truecolor),
        "ansi256" | "256" | "8bit" => Some(ColorCapability::Ansi256),
        _ => None,
    }
}
