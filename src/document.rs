//! The host document the navigator renders into.
//!
//! Elements live in an arena indexed by [`ElementId`] with parent links, the
//! way a DOM would. The navigator only ever writes attributes (visibility,
//! disabled, text, value) of elements it finds by [`ElementRole`]; input
//! adapters hit-test the tree and ask [`Document::is_interactive_target`]
//! before turning a click or a touch into navigation.

use std::collections::HashMap;
use std::fmt;

use raylib::prelude::*;

use crate::constants::*;
use crate::deck::Deck;
use crate::error::NavigationError;
use crate::slide::RegionKind;

pub type ElementId = usize;

/// Well-known elements the navigator addresses directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    Slide(usize),
    NavigationBar,
    PreviousControl,
    NextControl,
    ProgressBar,
    Counter,
    JumpField,
    Announcer,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRole::Slide(index) => write!(f, "slide-{}", index),
            ElementRole::NavigationBar => f.write_str("navigation"),
            ElementRole::PreviousControl => f.write_str("prev-btn"),
            ElementRole::NextControl => f.write_str("next-btn"),
            ElementRole::ProgressBar => f.write_str("progress-fill"),
            ElementRole::Counter => f.write_str("current-slide"),
            ElementRole::JumpField => f.write_str("jump-field"),
            ElementRole::Announcer => f.write_str("slide-announcer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Root,
    Slide { index: usize },
    NavigationRegion,
    Button,
    Link { href: Option<String> },
    FormField,
    Inert, // Marked non-navigable
    ProgressBar,
    Counter,
    Announcer,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub role: Option<ElementRole>,
    pub parent: Option<ElementId>,
    pub bounds: Rectangle,

    // Placement relative to the slide area (0..1), resolved by `layout`
    pub anchor: Option<Rectangle>,

    pub visible: bool,
    pub disabled: bool,
    pub text: String,
    pub value: f32,
}

impl Element {
    fn new(kind: ElementKind, role: Option<ElementRole>, parent: Option<ElementId>) -> Self {
        Self {
            kind,
            role,
            parent,
            bounds: Rectangle::new(0.0, 0.0, 0.0, 0.0),
            anchor: None,
            visible: true,
            disabled: false,
            text: String::new(),
            value: 0.0,
        }
    }

    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.bounds.x
            && point.x < self.bounds.x + self.bounds.width
            && point.y >= self.bounds.y
            && point.y < self.bounds.y + self.bounds.height
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    roles: HashMap<ElementRole, ElementId>,
    focused: Option<ElementId>,
    viewport: Vector2,
}

impl Document {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            elements: vec![Element::new(ElementKind::Root, None, None)],
            roles: HashMap::new(),
            focused: None,
            viewport: Vector2::new(width, height),
        }
    }

    /// The full presentation document: one element per available slide (with
    /// its interactive regions) and the navigation chrome.
    pub fn for_deck(deck: &Deck, width: f32, height: f32) -> Self {
        let mut doc = Self::new(width, height);
        let root = doc.root();

        for slide in deck.slides() {
            if slide.missing {
                continue;
            }
            let slide_id = doc.append(root, ElementKind::Slide { index: slide.index }, Some(ElementRole::Slide(slide.index)));
            if let Some(element) = doc.element_mut(slide_id) {
                element.visible = false;
                element.text = slide.title.clone();
            }

            for region in &slide.regions {
                let kind = match region.kind {
                    RegionKind::Link => ElementKind::Link { href: region.href.clone() },
                    RegionKind::Button => ElementKind::Button,
                    RegionKind::Inert => ElementKind::Inert,
                };
                let id = doc.append(slide_id, kind, None);
                if let Some(element) = doc.element_mut(id) {
                    element.anchor = Some(region.rect);
                    element.text = region.label.clone().or_else(|| region.href.clone()).unwrap_or_default();
                }
            }
        }

        doc.append(root, ElementKind::ProgressBar, Some(ElementRole::ProgressBar));
        let nav = doc.append(root, ElementKind::NavigationRegion, Some(ElementRole::NavigationBar));
        doc.append(nav, ElementKind::Button, Some(ElementRole::PreviousControl));
        doc.append(nav, ElementKind::Counter, Some(ElementRole::Counter));
        doc.append(nav, ElementKind::FormField, Some(ElementRole::JumpField));
        doc.append(nav, ElementKind::Button, Some(ElementRole::NextControl));
        doc.append(root, ElementKind::Announcer, Some(ElementRole::Announcer));

        doc.layout();
        doc
    }

    pub fn root(&self) -> ElementId {
        0
    }

    pub fn append(&mut self, parent: ElementId, kind: ElementKind, role: Option<ElementRole>) -> ElementId {
        let id = self.elements.len();
        self.elements.push(Element::new(kind, role, Some(parent)));
        if let Some(role) = role {
            self.roles.insert(role, id);
        }
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter().enumerate()
    }

    pub fn find(&self, role: ElementRole) -> Result<ElementId, NavigationError> {
        self.roles.get(&role).copied().ok_or(NavigationError::MissingElement(role))
    }

    pub fn by_role(&self, role: ElementRole) -> Option<&Element> {
        self.roles.get(&role).and_then(|&id| self.elements.get(id))
    }

    pub fn by_role_mut(&mut self, role: ElementRole) -> Result<&mut Element, NavigationError> {
        let id = self.find(role)?;
        self.elements.get_mut(id).ok_or(NavigationError::MissingElement(role))
    }

    pub fn viewport(&self) -> Vector2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vector2::new(width.max(0.0), height.max(0.0));
    }

    /// Area above the chrome where slides are drawn.
    pub fn slide_area(&self) -> Rectangle {
        let chrome = PROGRESS_HEIGHT + NAV_BAR_HEIGHT + STATUS_HEIGHT;
        Rectangle::new(0.0, 0.0, self.viewport.x, (self.viewport.y - chrome).max(0.0))
    }

    /// Recomputes element bounds for the current viewport.
    pub fn layout(&mut self) {
        let width = self.viewport.x;
        let area = self.slide_area();

        let progress = Rectangle::new(0.0, area.height, width, PROGRESS_HEIGHT);
        let nav = Rectangle::new(0.0, progress.y + PROGRESS_HEIGHT, width, NAV_BAR_HEIGHT);
        let status = Rectangle::new(0.0, nav.y + NAV_BAR_HEIGHT, width, STATUS_HEIGHT);

        let control_y = nav.y + CHROME_PADDING;
        let control_h = NAV_BAR_HEIGHT - 2.0 * CHROME_PADDING;
        let counter_w = BUTTON_WIDTH - JUMP_FIELD_WIDTH / 2.0;
        let center = width / 2.0;

        for i in 0..self.elements.len() {
            let parent_is_slide = self.elements[i]
                .parent
                .and_then(|p| self.elements.get(p))
                .is_some_and(|p| matches!(p.kind, ElementKind::Slide { .. }));
            let element = &mut self.elements[i];

            element.bounds = match (&element.kind, element.role) {
                (ElementKind::Root, _) => Rectangle::new(0.0, 0.0, width, self.viewport.y),
                (ElementKind::Slide { .. }, _) => area,
                (_, Some(ElementRole::ProgressBar)) => progress,
                (_, Some(ElementRole::NavigationBar)) => nav,
                (_, Some(ElementRole::PreviousControl)) => {
                    Rectangle::new(CHROME_PADDING, control_y, BUTTON_WIDTH, control_h)
                }
                (_, Some(ElementRole::NextControl)) => {
                    Rectangle::new(width - CHROME_PADDING - BUTTON_WIDTH, control_y, BUTTON_WIDTH, control_h)
                }
                (_, Some(ElementRole::Counter)) => {
                    Rectangle::new(center - CHROME_PADDING / 2.0 - counter_w, control_y, counter_w, control_h)
                }
                (_, Some(ElementRole::JumpField)) => {
                    Rectangle::new(center + CHROME_PADDING / 2.0, control_y, JUMP_FIELD_WIDTH, control_h)
                }
                (_, Some(ElementRole::Announcer)) => status,
                _ => match element.anchor {
                    Some(anchor) if parent_is_slide => Rectangle::new(
                        area.x + anchor.x * area.width,
                        area.y + anchor.y * area.height,
                        anchor.width * area.width,
                        anchor.height * area.height,
                    ),
                    _ => element.bounds,
                },
            };
        }
    }

    /// An element is rendered when it and all of its ancestors are visible.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        self.ancestors(id).all(|element| element.visible)
    }

    /// The element itself, then each parent up to the root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = &Element> {
        std::iter::successors(self.elements.get(id), move |element| {
            element.parent.and_then(|p| self.elements.get(p))
        })
    }

    /// Topmost rendered element under `point`.
    pub fn hit_test(&self, point: Vector2) -> Option<ElementId> {
        (0..self.elements.len())
            .rev()
            .find(|&id| self.elements[id].contains(point) && self.is_rendered(id))
    }

    /// True when `id` is, or sits inside, a link, a button, a form field, the
    /// navigation controls, or a region marked non-navigable. Clicks and
    /// gestures on such targets belong to the element, not to slide navigation.
    pub fn is_interactive_target(&self, id: ElementId) -> bool {
        self.ancestors(id).any(|element| {
            matches!(
                element.kind,
                ElementKind::Link { .. }
                    | ElementKind::Button
                    | ElementKind::FormField
                    | ElementKind::NavigationRegion
                    | ElementKind::Inert
            )
        })
    }

    pub fn is_form_editable(&self, id: ElementId) -> bool {
        self.ancestors(id).any(|element| element.kind == ElementKind::FormField)
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn focus(&mut self, id: ElementId) {
        if id < self.elements.len() {
            self.focused = Some(id);
        }
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focus_is_editable(&self) -> bool {
        self.focused.is_some_and(|id| self.is_form_editable(id))
    }

    /// Indices of slides whose element is currently visible.
    pub fn visible_slides(&self) -> Vec<usize> {
        self.elements
            .iter()
            .filter(|element| element.visible)
            .filter_map(|element| match element.kind {
                ElementKind::Slide { index } => Some(index),
                _ => None,
            })
            .collect()
    }
}
