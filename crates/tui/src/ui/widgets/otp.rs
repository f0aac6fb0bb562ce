//! Ratatui widget drawing the slot row of an OTP field.
//!
//! The widget is a pure function of the field's slot snapshots, its visual
//! state and the appearance configured for that state. Colors in the
//! appearance are parsed with `ratatui::style::Color`'s `FromStr`; anything
//! missing or unparsable falls back to the theme's color for the state.

use otpview_engine::SlotView;
use otpview_types::{Appearance, OtpConfig, VisualState};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use tracing::debug;

use crate::ui::layout::slot_rects;
use crate::ui::theme::Theme;

/// Resolved colors for one visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotColors {
    border: Color,
    background: Option<Color>,
    text: Color,
}

pub struct OtpWidget<'a> {
    config: &'a OtpConfig,
    slots: &'a [SlotView],
    visual: VisualState,
    appearance: Option<&'a Appearance>,
    theme: &'a dyn Theme,
    focused: bool,
}

impl<'a> OtpWidget<'a> {
    pub fn new(
        config: &'a OtpConfig,
        slots: &'a [SlotView],
        visual: VisualState,
        appearance: Option<&'a Appearance>,
        theme: &'a dyn Theme,
    ) -> Self {
        Self {
            config,
            slots,
            visual,
            appearance,
            theme,
            focused: false,
        }
    }

    /// Highlights the editable slot as having keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn colors(&self) -> SlotColors {
        let roles = self.theme.roles();
        let state_default = match self.visual {
            VisualState::Normal => roles.border,
            VisualState::Success => roles.success,
            VisualState::Error => roles.error,
        };
        let appearance = self.appearance;
        SlotColors {
            border: parse_color(appearance.and_then(|a| a.border.as_deref())).unwrap_or(state_default),
            background: parse_color(appearance.and_then(|a| a.background.as_deref())),
            text: parse_color(self.config.text_color.as_deref()).unwrap_or(roles.text),
        }
    }

    fn render_slot(&self, slot: &SlotView, area: Rect, colors: SlotColors, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let highlighted = slot.editable && self.focused && self.visual == VisualState::Normal;
        let mut fill = Style::default();
        if let Some(background) = colors.background {
            fill = fill.bg(background);
        }
        let mut text_style = fill.fg(colors.text);
        if self.config.bold {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }

        let inner = if area.width >= 3 && area.height >= 3 {
            let border = if highlighted { self.theme.roles().focus } else { colors.border };
            let block = Block::bordered()
                .border_type(if highlighted { BorderType::Thick } else { BorderType::Plain })
                .border_style(Style::default().fg(border))
                .style(fill);
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            // Too small for a border: mark the slot with an underline instead.
            buf.set_style(area, fill);
            text_style = text_style.add_modifier(Modifier::UNDERLINED);
            area
        };

        let glyph = slot.display.map(String::from).unwrap_or_default();
        let line_area = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, inner.height.min(1));
        Paragraph::new(glyph).centered().style(text_style).render(line_area, buf);
    }
}

impl Widget for OtpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = self.colors();
        let rects = slot_rects(self.config, area);
        for (slot, rect) in self.slots.iter().zip(rects) {
            self.render_slot(slot, rect, colors, buf);
        }
    }
}

/// Terminal cursor position for the editable slot: the cell where its
/// character is drawn.
pub fn cursor_position(config: &OtpConfig, area: Rect, active: usize) -> Option<Position> {
    let rect = *slot_rects(config, area).get(active)?;
    if rect.is_empty() {
        return None;
    }
    let inner = if rect.width >= 3 && rect.height >= 3 { rect.inner(Margin::new(1, 1)) } else { rect };
    Some(Position::new(inner.x + inner.width.saturating_sub(1) / 2, inner.y + inner.height / 2))
}

fn parse_color(value: Option<&str>) -> Option<Color> {
    let value = value?.trim();
    match value.parse::<Color>() {
        Ok(color) => Some(color),
        Err(_) => {
            debug!(color = value, "unrecognized appearance color; using theme default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;
    use otpview_engine::OtpField;
    use otpview_types::{InputMode, OtpEvent};

    fn config(count: usize) -> OtpConfig {
        OtpConfig {
            spacing: 1,
            slot_width: 5,
            slot_height: 3,
            ..OtpConfig::with_count(count)
        }
    }

    fn draw(field: &OtpField, width: u16, focused: bool) -> Buffer {
        let theme = DraculaTheme::new();
        let area = Rect::new(0, 0, width, 3);
        let mut buf = Buffer::empty(area);
        field.render_with(|slots, visual, appearance| {
            OtpWidget::new(field.config(), slots, visual, appearance, &theme)
                .focused(focused)
                .render(area, &mut buf);
        });
        buf
    }

    #[test]
    fn draws_entered_characters_in_their_slots() {
        let mut field = OtpField::new(config(3)).unwrap();
        field.handle(OtpEvent::Char('4'));
        field.handle(OtpEvent::Char('2'));
        let buf = draw(&field, 17, false);
        assert_eq!(buf[(2, 1)].symbol(), "4");
        assert_eq!(buf[(8, 1)].symbol(), "2");
        assert_eq!(buf[(14, 1)].symbol(), " ");
        assert_eq!(buf[(0, 0)].symbol(), "┌");
    }

    #[test]
    fn password_mode_masks_characters() {
        let mut field = OtpField::new(OtpConfig {
            input_mode: InputMode::Password,
            ..config(2)
        })
        .unwrap();
        field.handle(OtpEvent::Char('9'));
        let buf = draw(&field, 11, false);
        assert_eq!(buf[(2, 1)].symbol(), "•");
    }

    #[test]
    fn border_follows_visual_state() {
        let theme = DraculaTheme::new();
        let mut field = OtpField::new(config(2)).unwrap();
        field.set_state(VisualState::Error);
        let buf = draw(&field, 11, false);
        assert_eq!(buf[(0, 0)].fg, theme.roles().error);

        field.set_state(VisualState::Success);
        let buf = draw(&field, 11, false);
        assert_eq!(buf[(6, 0)].fg, theme.roles().success);
    }

    #[test]
    fn configured_colors_override_theme() {
        let mut cfg = config(1);
        cfg.appearance.normal = Some(Appearance {
            border: Some("#102030".into()),
            background: Some("blue".into()),
        });
        let field = OtpField::new(cfg).unwrap();
        let buf = draw(&field, 5, false);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(buf[(2, 1)].bg, Color::Blue);
    }

    #[test]
    fn focused_editable_slot_uses_thick_focus_border() {
        let theme = DraculaTheme::new();
        let field = OtpField::new(config(2)).unwrap();
        let buf = draw(&field, 11, true);
        assert_eq!(buf[(0, 0)].symbol(), "┏");
        assert_eq!(buf[(0, 0)].fg, theme.roles().focus);
        assert_eq!(buf[(6, 0)].symbol(), "┌");
    }

    #[test]
    fn unparsable_color_falls_back() {
        assert_eq!(parse_color(Some("not-a-color")), None);
        assert_eq!(parse_color(Some(" red ")), Some(Color::Red));
        assert_eq!(parse_color(None), None);
    }

    #[test]
    fn cursor_sits_on_active_slot_glyph() {
        let cfg = config(3);
        let area = Rect::new(0, 0, 17, 3);
        assert_eq!(cursor_position(&cfg, area, 0), Some(Position::new(2, 1)));
        assert_eq!(cursor_position(&cfg, area, 2), Some(Position::new(14, 1)));
        assert_eq!(cursor_position(&cfg, area, 3), None);
    }
}
