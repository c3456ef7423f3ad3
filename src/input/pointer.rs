use raylib::prelude::Vector2;

use crate::input::{dispatch, NavAction};
use crate::navigator::NavigatorHandle;
use crate::state::SlideChange;

/// Click-to-advance: right half of the window goes forward, left half back.
pub struct PointerAdapter {
    nav: NavigatorHandle,
}

impl PointerAdapter {
    pub fn new(nav: NavigatorHandle) -> Self {
        Self { nav }
    }

    pub fn translate(&self, point: Vector2) -> Option<NavAction> {
        let nav = self.nav.borrow();
        let document = nav.document();

        let target = document.hit_test(point)?;
        if document.is_interactive_target(target) {
            return None;
        }

        if point.x > document.viewport().x / 2.0 {
            Some(NavAction::Next)
        } else {
            Some(NavAction::Previous)
        }
    }

    pub fn handle_click(&mut self, point: Vector2) -> Option<SlideChange> {
        let action = self.translate(point)?;
        dispatch(&self.nav, action, "pointer")
    }
}
