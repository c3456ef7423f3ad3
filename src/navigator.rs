use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::deck::Deck;
use crate::document::{Document, ElementRole};
use crate::error::NavigationError;
use crate::state::{announcement, progress_ratio, ControlState, SlideChange, SlideProgress};

/// Shared handle given to every input adapter. All adapters run on the one
/// event-loop thread, so a `RefCell` borrow never overlaps another.
pub type NavigatorHandle = Rc<RefCell<SlideNavigator>>;

type Observer = Box<dyn FnMut(&SlideChange)>;

/// Owns the current slide index and is the only thing allowed to change it.
///
/// Every navigation request, whatever its source, ends up in [`SlideNavigator::go_to`],
/// which either applies completely (slide visibility, progress, controls,
/// announcement, observers) or is rejected without touching anything.
pub struct SlideNavigator {
    deck: Deck,
    document: Document,
    current: usize,
    observers: Vec<Observer>,
}

impl SlideNavigator {
    pub fn new(deck: Deck, document: Document) -> Self {
        let mut navigator = Self {
            deck,
            document,
            current: 1,
            observers: Vec::new(),
        };

        let mut missing = Vec::new();
        for index in 1..=navigator.total_slides() {
            navigator.set_slide_visible(index, index == 1, &mut missing);
        }
        navigator.update_chrome(&mut missing);
        report_missing(&missing);

        navigator
    }

    pub fn into_handle(self) -> NavigatorHandle {
        Rc::new(RefCell::new(self))
    }

    /// Registers a callback run after each successful navigation.
    ///
    /// Observers run inside `go_to`, while the [`NavigatorHandle`] is mutably
    /// borrowed. An observer must not borrow the handle again (to read state or
    /// to navigate); doing so panics. Everything it needs is in the
    /// [`SlideChange`] it receives.
    pub fn subscribe(&mut self, observer: impl FnMut(&SlideChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn total_slides(&self) -> usize {
        self.deck.len()
    }

    pub fn slide_progress(&self) -> SlideProgress {
        SlideProgress::new(self.current, self.total_slides())
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn go_to(&mut self, target: usize) -> Result<SlideChange, NavigationError> {
        let total = self.total_slides();
        if target < 1 || target > total {
            let err = NavigationError::OutOfRange { target, total };
            debug!(current = self.current, "navigation ignored: {}", err);
            return Err(err);
        }
        if target == self.current {
            let err = NavigationError::AlreadyCurrent(target);
            debug!("navigation ignored: {}", err);
            return Err(err);
        }

        let from = self.current;
        let mut missing = Vec::new();

        self.set_slide_visible(from, false, &mut missing);
        self.current = target;
        self.set_slide_visible(target, true, &mut missing);
        self.update_chrome(&mut missing);

        let title = self
            .deck
            .slide(target)
            .map(|slide| slide.title.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let announcement = announcement(target, total, &title);
        match self.document.by_role_mut(ElementRole::Announcer) {
            Ok(announcer) => announcer.text = announcement.clone(),
            Err(_) => missing.push(ElementRole::Announcer),
        }

        report_missing(&missing);
        debug!(from, to = target, total, "navigated");

        let change = SlideChange {
            from,
            to: target,
            total,
            title,
            announcement,
            progress: self.slide_progress(),
            missing,
        };
        for observer in self.observers.iter_mut() {
            observer(&change);
        }
        Ok(change)
    }

    pub fn next(&mut self) -> Result<SlideChange, NavigationError> {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> Result<SlideChange, NavigationError> {
        self.go_to(self.current - 1)
    }

    pub fn first(&mut self) -> Result<SlideChange, NavigationError> {
        self.go_to(1)
    }

    pub fn last(&mut self) -> Result<SlideChange, NavigationError> {
        self.go_to(self.total_slides())
    }

    pub fn jump_to_slide(&mut self, target: usize) -> Result<SlideChange, NavigationError> {
        self.go_to(target)
    }

    pub fn go_to_section(&mut self, name: &str) -> Result<SlideChange, NavigationError> {
        match self.deck.sections().lookup(name) {
            Some(index) => self.go_to(index),
            None => {
                let available: Vec<&str> = self.deck.sections().names().collect();
                debug!(?available, "unknown section '{}'", name);
                Err(NavigationError::UnknownSection(name.to_string()))
            }
        }
    }

    /// Re-lays-out the chrome and recomputes progress, counter and controls
    /// for the slide already shown. Never navigates.
    pub fn refresh_chrome(&mut self) -> Vec<ElementRole> {
        self.document.layout();
        let mut missing = Vec::new();
        self.update_chrome(&mut missing);
        report_missing(&missing);
        missing
    }

    /// Roles the navigator needs that the document does not provide.
    pub fn self_check(&self) -> Vec<ElementRole> {
        let chrome = [
            ElementRole::PreviousControl,
            ElementRole::NextControl,
            ElementRole::ProgressBar,
            ElementRole::Counter,
            ElementRole::Announcer,
        ];
        chrome
            .into_iter()
            .chain((1..=self.total_slides()).map(ElementRole::Slide))
            .filter(|role| self.document.find(*role).is_err())
            .collect()
    }

    fn set_slide_visible(&mut self, index: usize, visible: bool, missing: &mut Vec<ElementRole>) {
        match self.document.by_role_mut(ElementRole::Slide(index)) {
            Ok(slide) => slide.visible = visible,
            Err(_) => missing.push(ElementRole::Slide(index)),
        }
    }

    fn update_chrome(&mut self, missing: &mut Vec<ElementRole>) {
        let total = self.total_slides();
        let controls = ControlState::at(self.current, total);

        match self.document.by_role_mut(ElementRole::ProgressBar) {
            Ok(bar) => bar.value = progress_ratio(self.current, total) as f32,
            Err(_) => missing.push(ElementRole::ProgressBar),
        }
        match self.document.by_role_mut(ElementRole::Counter) {
            Ok(counter) => counter.text = format!("{} / {}", self.current, total),
            Err(_) => missing.push(ElementRole::Counter),
        }
        match self.document.by_role_mut(ElementRole::PreviousControl) {
            Ok(button) => {
                button.disabled = controls.previous_disabled;
                button.text = controls.previous_label.to_string();
            }
            Err(_) => missing.push(ElementRole::PreviousControl),
        }
        match self.document.by_role_mut(ElementRole::NextControl) {
            Ok(button) => {
                button.disabled = controls.next_disabled;
                button.text = controls.next_label.to_string();
            }
            Err(_) => missing.push(ElementRole::NextControl),
        }
    }
}

fn report_missing(missing: &[ElementRole]) {
    for role in missing {
        warn!(element = %role, "element not found, skipping its update");
    }
}

#[cfg(test)]
pub(crate) fn test_deck(total: usize) -> Deck {
    use crate::sections::SectionTable;
    use crate::slide::Slide;

    let slides = (1..=total)
        .map(|index| Slide {
            index,
            title: format!("Topic {}", index),
            image: None,
            regions: Vec::new(),
            missing: false,
        })
        .collect();
    Deck::new("test deck", slides, SectionTable::new()).unwrap()
}

#[cfg(test)]
pub(crate) fn test_navigator(total: usize) -> SlideNavigator {
    let deck = test_deck(total);
    let document = Document::for_deck(&deck, 1000.0, 800.0);
    SlideNavigator::new(deck, document)
}
