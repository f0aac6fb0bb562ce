use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// Buttons offered on the home screen, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    OpenOtp,
}

impl HomeAction {
    pub fn label(self) -> &'static str {
        match self {
            HomeAction::OpenOtp => "OTP View",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HomeState {
    container_focus: FocusFlag,
    pub f_open: FocusFlag,
    /// Button areas from the last render, used for mouse hit testing.
    pub button_areas: Vec<Rect>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            container_focus: FocusFlag::named("home"),
            f_open: FocusFlag::named("home.open_otp"),
            button_areas: Vec::new(),
        }
    }
}

impl HomeState {
    pub fn actions(&self) -> [(HomeAction, &FocusFlag); 1] {
        [(HomeAction::OpenOtp, &self.f_open)]
    }

    pub fn focused_action(&self) -> Option<HomeAction> {
        self.actions().into_iter().find(|(_, flag)| flag.get()).map(|(action, _)| action)
    }
}

impl HasFocus for HomeState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.leaf_widget(&self.f_open);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}
