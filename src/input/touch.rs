use raylib::prelude::Vector2;
use tracing::trace;

use crate::input::{dispatch, NavAction};
use crate::navigator::NavigatorHandle;
use crate::state::SlideChange;

/// Horizontal swipes: finger moving left shows the next slide.
///
/// A gesture only counts when its horizontal travel beats both `min_distance`
/// and its vertical travel, so scrolling does not flip slides.
pub fn swipe_action(start: Vector2, end: Vector2, min_distance: f32) -> Option<NavAction> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    if dx.abs() > dy.abs() && dx.abs() > min_distance {
        if dx > 0.0 { Some(NavAction::Previous) } else { Some(NavAction::Next) }
    } else {
        None
    }
}

pub struct TouchAdapter {
    nav: NavigatorHandle,
    min_distance: f32,
    start: Option<Vector2>,
}

impl TouchAdapter {
    pub fn new(nav: NavigatorHandle, min_distance: f32) -> Self {
        Self {
            nav,
            min_distance,
            start: None,
        }
    }

    /// Gestures starting on an interactive element are left to that element.
    pub fn touch_start(&mut self, point: Vector2) {
        let nav = self.nav.borrow();
        let document = nav.document();
        self.start = match document.hit_test(point) {
            Some(target) if !document.is_interactive_target(target) => Some(point),
            _ => {
                trace!(x = point.x, y = point.y, "touch ignored on interactive target");
                None
            }
        };
    }

    pub fn touch_end(&mut self, point: Vector2) -> Option<SlideChange> {
        let start = self.start.take()?;
        let action = swipe_action(start, point, self.min_distance)?;
        dispatch(&self.nav, action, "touch")
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SWIPE_MIN_DISTANCE;
    use crate::document::ElementRole;
    use crate::navigator::test_navigator;

    fn adapter() -> TouchAdapter {
        TouchAdapter::new(test_navigator(10).into_handle(), SWIPE_MIN_DISTANCE)
    }

    fn swipe(adapter: &mut TouchAdapter, from: (f32, f32), to: (f32, f32)) -> Option<SlideChange> {
        adapter.touch_start(Vector2::new(from.0, from.1));
        adapter.touch_end(Vector2::new(to.0, to.1))
    }

    #[test]
    fn test_swipe_rules() {
        let origin = Vector2::new(400.0, 300.0);
        assert_eq!(swipe_action(origin, Vector2::new(320.0, 310.0), 50.0), Some(NavAction::Next));
        assert_eq!(swipe_action(origin, Vector2::new(480.0, 290.0), 50.0), Some(NavAction::Previous));
        // Too short
        assert_eq!(swipe_action(origin, Vector2::new(350.0, 300.0), 50.0), None);
        // Mostly vertical
        assert_eq!(swipe_action(origin, Vector2::new(300.0, 420.0), 50.0), None);
    }

    #[test]
    fn test_leftward_swipe_advances_once() {
        let mut adapter = adapter();
        let change = swipe(&mut adapter, (600.0, 300.0), (520.0, 310.0)).unwrap();
        assert_eq!((change.from, change.to), (1, 2));
        assert!(adapter.start.is_none());

        // A stray touch end without a start does nothing
        assert!(adapter.touch_end(Vector2::new(100.0, 300.0)).is_none());
        assert_eq!(adapter.nav.borrow().current_slide(), 2);
    }

    #[test]
    fn test_rightward_swipe_goes_back() {
        let mut adapter = adapter();
        adapter.nav.borrow_mut().go_to(5).unwrap();
        swipe(&mut adapter, (200.0, 300.0), (400.0, 250.0)).unwrap();
        assert_eq!(adapter.nav.borrow().current_slide(), 4);
    }

    #[test]
    fn test_swipe_from_controls_is_suppressed() {
        let mut adapter = adapter();
        let next = adapter.nav.borrow().document().by_role(ElementRole::NextControl).unwrap().bounds;
        let start = (next.x + 5.0, next.y + 5.0);

        assert!(swipe(&mut adapter, start, (start.0 - 200.0, start.1)).is_none());
        assert_eq!(adapter.nav.borrow().current_slide(), 1);
    }

    #[test]
    fn test_cancel_drops_gesture() {
        let mut adapter = adapter();
        adapter.touch_start(Vector2::new(600.0, 300.0));
        adapter.cancel();
        assert!(adapter.touch_end(Vector2::new(100.0, 300.0)).is_none());
    }
}
