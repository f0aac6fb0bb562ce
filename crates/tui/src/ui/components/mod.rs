pub mod component;
pub mod home;
pub mod otp;

pub(crate) use component::Component;
pub use home::HomeComponent;
pub use otp::OtpComponent;

use ratatui::layout::{Position, Rect};

/// Index of the first area containing the mouse position, if any.
pub fn find_target_index_by_mouse_position(areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = Position::new(x, y);
    areas.iter().position(|area| area.contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_hit_test_finds_containing_area() {
        let areas = [Rect::new(0, 0, 5, 3), Rect::new(6, 0, 5, 3)];
        assert_eq!(find_target_index_by_mouse_position(&areas, 7, 1), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&areas, 5, 1), None);
        assert_eq!(find_target_index_by_mouse_position(&areas, 0, 3), None);
    }
}
