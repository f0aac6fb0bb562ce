mod otp_component;
mod state;

pub use otp_component::OtpComponent;
pub use state::{OtpAction, OtpViewState, Verification};
