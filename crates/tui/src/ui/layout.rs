//! Layout helpers: the main screen split and the geometry of the slot row.
use otpview_types::OtpConfig;
use ratatui::layout::Size;
use ratatui::prelude::*;

/// Splits the screen into title, content and hint bar areas.
pub(crate) fn main_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)]).areas(area)
}

/// Gap between slots, honoring `fill_width` for the available width.
///
/// In fill mode the row stretches to the full width: the space left after the
/// slots is shared between the `count - 1` gaps. A single slot, or a width too
/// small for the slots, falls back to the configured spacing.
pub fn slot_spacing(config: &OtpConfig, available_width: u16) -> u16 {
    if !config.fill_width || config.count < 2 {
        return config.spacing;
    }
    let slots_width = u32::from(config.slot_width) * config.count as u32;
    let free = u32::from(available_width).saturating_sub(slots_width);
    let gap = free / (config.count as u32 - 1);
    u16::try_from(gap).unwrap_or(u16::MAX)
}

/// Width and height of the whole row for a given spacing.
pub fn row_size(config: &OtpConfig, spacing: u16) -> Size {
    let count = config.count as u32;
    let width = u32::from(config.slot_width) * count + u32::from(spacing) * count.saturating_sub(1);
    Size::new(u16::try_from(width).unwrap_or(u16::MAX), config.slot_height)
}

/// Areas of every slot inside `area`, left to right.
///
/// Slot `i` starts at `i * (slot_width + spacing)` from the left edge of the
/// row; the row is centered horizontally when narrower than `area`. Slots
/// that do not fit are clipped to `area` (possibly to an empty rect).
pub fn slot_rects(config: &OtpConfig, area: Rect) -> Vec<Rect> {
    let spacing = slot_spacing(config, area.width);
    let row = row_size(config, spacing);
    let left = u32::from(area.x) + u32::from(area.width.saturating_sub(row.width) / 2);
    let height = config.slot_height.min(area.height);
    let step = u32::from(config.slot_width) + u32::from(spacing);

    (0..config.count as u32)
        .map(|index| {
            let x = left + index * step;
            let x = u16::try_from(x).unwrap_or(u16::MAX);
            Rect::new(x, area.y, config.slot_width, height).intersection(area)
        })
        .collect()
}
