//! Theme styling for the terminal host.
//!
//! Semantic roles, a small catalog of palettes (Dracula, Nord, and an ANSI
//! 256-color fallback), the loader that picks one, and helper builders for
//! ratatui widgets. Prefer these helpers over hard-coding colors.

pub mod ansi256;
pub mod catalog;
pub mod dracula;
pub mod loader;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use catalog::{THEME_DEFINITIONS, ThemeDefinition};
pub use dracula::DraculaTheme;
pub use loader::{LoadedTheme, load};
pub use nord::NordTheme;
pub use roles::{Theme, ThemeRoles};
