use raylib::prelude::Vector2;
use tracing::debug;

use crate::document::{ElementKind, ElementRole};
use crate::input::{dispatch, NavAction};
use crate::navigator::NavigatorHandle;
use crate::state::SlideChange;

/// Clicks on the chrome itself: the previous/next buttons and the jump field.
/// Also moves focus, since any click outside the field blurs it.
pub struct ControlAdapter {
    nav: NavigatorHandle,
}

impl ControlAdapter {
    pub fn new(nav: NavigatorHandle) -> Self {
        Self { nav }
    }

    pub fn translate(&mut self, point: Vector2) -> Option<NavAction> {
        let mut nav = self.nav.borrow_mut();
        let document = nav.document_mut();

        let Some(target) = document.hit_test(point) else {
            document.blur();
            return None;
        };

        if document.is_form_editable(target) {
            document.focus(target);
            return None;
        }
        document.blur();

        for element in document.ancestors(target) {
            match (&element.kind, element.role) {
                (_, Some(ElementRole::PreviousControl)) if !element.disabled => return Some(NavAction::Previous),
                (_, Some(ElementRole::NextControl)) if !element.disabled => return Some(NavAction::Next),
                (ElementKind::Link { href }, _) => {
                    debug!(href = href.as_deref().unwrap_or(""), "link activated");
                    return None;
                }
                _ => {}
            }
        }
        None
    }

    pub fn handle_click(&mut self, point: Vector2) -> Option<SlideChange> {
        let action = self.translate(point)?;
        dispatch(&self.nav, action, "controls")
    }
}
