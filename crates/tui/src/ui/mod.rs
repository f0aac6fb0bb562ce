//! UI rendering for the terminal host: components, layout, theme, widgets,
//! and the runtime that drives them.

pub mod components;
pub mod layout;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod widgets;
