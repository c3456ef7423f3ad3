use std::time::{Duration, Instant};

use tracing::debug;

use crate::navigator::NavigatorHandle;
use crate::schedule::ScheduledTask;

/// Window resizes update the viewport right away and refresh the chrome once
/// the resizing has settled.
pub struct ResizeAdapter {
    nav: NavigatorHandle,
    refresh: ScheduledTask,
}

impl ResizeAdapter {
    pub fn new(nav: NavigatorHandle, debounce: Duration) -> Self {
        Self {
            nav,
            refresh: ScheduledTask::new(debounce),
        }
    }

    /// Element geometry follows the new size at once so hit testing matches
    /// what is on screen. Progress, counter and controls wait for the debounce.
    pub fn on_resize(&mut self, width: f32, height: f32, now: Instant) {
        if !self.refresh.is_pending() {
            debug!(width, height, "resize started");
        }
        let mut nav = self.nav.borrow_mut();
        let document = nav.document_mut();
        document.set_viewport(width, height);
        document.layout();
        self.refresh.schedule(now);
    }

    /// Runs the pending refresh if it is due. Call once per frame.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.refresh.poll(now) {
            return false;
        }
        let mut nav = self.nav.borrow_mut();
        let viewport = nav.document().viewport();
        debug!(width = viewport.x, height = viewport.y, "resize settled, refreshing chrome");
        nav.refresh_chrome();
        true
    }
}

/// Refreshes the chrome when the window comes back from being hidden.
pub struct VisibilityAdapter {
    nav: NavigatorHandle,
    hidden: bool,
}

impl VisibilityAdapter {
    pub fn new(nav: NavigatorHandle) -> Self {
        Self { nav, hidden: false }
    }

    pub fn on_visibility(&mut self, hidden: bool) -> bool {
        let was_hidden = std::mem::replace(&mut self.hidden, hidden);
        if was_hidden && !hidden {
            debug!("window visible again, refreshing chrome");
            self.nav.borrow_mut().refresh_chrome();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CHROME_PADDING, RESIZE_DEBOUNCE_MS};
    use crate::document::ElementRole;
    use crate::input::{NavAction, PointerAdapter};
    use crate::navigator::test_navigator;
    use raylib::prelude::Vector2;

    fn next_right_edge(nav: &NavigatorHandle) -> f32 {
        let bounds = nav.borrow().document().by_role(ElementRole::NextControl).unwrap().bounds;
        bounds.x + bounds.width + CHROME_PADDING
    }

    #[test]
    fn test_resize_burst_refreshes_once() {
        let nav = test_navigator(8).into_handle();
        nav.borrow_mut().go_to(6).unwrap();
        let mut adapter = ResizeAdapter::new(nav.clone(), Duration::from_millis(RESIZE_DEBOUNCE_MS));
        let start = Instant::now();

        adapter.on_resize(900.0, 700.0, start);
        adapter.on_resize(800.0, 600.0, start + Duration::from_millis(100));
        assert_eq!(nav.borrow().document().viewport().x, 800.0);

        // Geometry follows the resize right away, the refresh waits
        assert_eq!(next_right_edge(&nav), 800.0);
        assert!(!adapter.poll(start + Duration::from_millis(300)));

        assert!(adapter.poll(start + Duration::from_millis(350)));
        assert_eq!(next_right_edge(&nav), 800.0);
        assert!(!adapter.poll(start + Duration::from_millis(1000)));

        assert_eq!(nav.borrow().current_slide(), 6);
    }

    #[test]
    fn test_grown_area_is_clickable_before_refresh() {
        let nav = test_navigator(8).into_handle();
        let mut adapter = ResizeAdapter::new(nav.clone(), Duration::from_millis(RESIZE_DEBOUNCE_MS));
        let mut pointer = PointerAdapter::new(nav.clone());
        let start = Instant::now();

        adapter.on_resize(1400.0, 800.0, start);
        assert!(!adapter.poll(start + Duration::from_millis(10)));

        let point = Vector2::new(1200.0, 300.0);
        let target = nav.borrow().document().hit_test(point);
        assert_eq!(target, nav.borrow().document().find(ElementRole::Slide(1)).ok());
        assert_eq!(pointer.translate(point), Some(NavAction::Next));
        assert_eq!(pointer.handle_click(point).unwrap().to, 2);
    }

    #[test]
    fn test_visibility_refreshes_on_return_only() {
        let nav = test_navigator(4).into_handle();
        let mut adapter = VisibilityAdapter::new(nav.clone());

        assert!(!adapter.on_visibility(false));
        assert!(!adapter.on_visibility(true));
        assert!(!adapter.on_visibility(true));

        nav.borrow_mut().document_mut().set_viewport(640.0, 480.0);
        assert!(adapter.on_visibility(false));
        assert_eq!(next_right_edge(&nav), 640.0);
        assert_eq!(nav.borrow().current_slide(), 1);
    }
}
