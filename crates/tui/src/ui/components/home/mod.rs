mod home_component;
mod state;

pub use home_component::HomeComponent;
pub use state::{HomeAction, HomeState};
