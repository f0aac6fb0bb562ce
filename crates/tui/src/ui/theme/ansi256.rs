//! ANSI 256-color fallback theme for terminals without truecolor support.
//!
//! Approximates the Dracula palette with indexed colors.

use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

#[derive(Debug, Clone)]
pub struct Ansi256Theme {
    roles: ThemeRoles,
}

impl Ansi256Theme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: Color::Indexed(236),
                surface: Color::Indexed(236),
                border: Color::Indexed(239),
                text: Color::Indexed(255),
                text_muted: Color::Indexed(247),
                accent: Color::Indexed(212),
                focus: Color::Indexed(117),
                success: Color::Indexed(84),
                error: Color::Indexed(203),
                selection_bg: Color::Indexed(239),
                selection_fg: Color::Indexed(255),
            },
        }
    }
}

impl Theme for Ansi256Theme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
