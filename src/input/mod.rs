//! Input adapters: each one turns a raw event from one modality into at most
//! one navigation request. They share the navigator through a
//! [`NavigatorHandle`] and the suppression policy through
//! [`Document::is_interactive_target`](crate::document::Document::is_interactive_target).

mod controls;
mod keyboard;
mod pointer;
mod touch;
mod window;

pub use controls::ControlAdapter;
pub use keyboard::KeyboardAdapter;
pub use pointer::PointerAdapter;
pub use touch::TouchAdapter;
pub use window::{ResizeAdapter, VisibilityAdapter};

use tracing::trace;

use crate::error::NavigationError;
use crate::navigator::{NavigatorHandle, SlideNavigator};
use crate::state::SlideChange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    First,
    Last,
    Jump(usize),
    Section(String),
}

impl NavAction {
    pub fn apply(&self, nav: &mut SlideNavigator) -> Result<SlideChange, NavigationError> {
        match self {
            NavAction::Next => nav.next(),
            NavAction::Previous => nav.previous(),
            NavAction::First => nav.first(),
            NavAction::Last => nav.last(),
            NavAction::Jump(target) => nav.jump_to_slide(*target),
            NavAction::Section(name) => nav.go_to_section(name),
        }
    }
}

// Rejections were already logged by the navigator
fn dispatch(nav: &NavigatorHandle, action: NavAction, source: &'static str) -> Option<SlideChange> {
    trace!(source, ?action, "dispatch");
    let result = action.apply(&mut nav.borrow_mut());
    result.ok()
}
