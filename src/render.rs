use raylib::prelude::*;
use tracing::warn;

use crate::constants::*;
use crate::deck::Deck;
use crate::document::{Document, Element, ElementKind};
use crate::texture_loader::load_texture_with_exif_rotation;

/// Draws the document: the visible slide and the chrome around it.
pub struct Renderer {
    textures: Vec<Option<Texture2D>>, // slot 0 is slide 1
}

impl Renderer {
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, deck: &Deck) -> Self {
        let textures = deck
            .slides()
            .iter()
            .map(|slide| {
                let path = slide.image.as_ref().filter(|_| !slide.missing)?;
                match load_texture_with_exif_rotation(rl, thread, path) {
                    Ok(texture) => Some(texture),
                    Err(e) => {
                        warn!(slide = slide.index, error = %e, "slide image unavailable, showing the title instead");
                        None
                    }
                }
            })
            .collect();
        Self { textures }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, document: &Document) {
        d.clear_background(BACKGROUND);

        for (id, element) in document.elements() {
            if !document.is_rendered(id) {
                continue;
            }
            let focused = document.focused() == Some(id);
            match &element.kind {
                ElementKind::Root => {}
                ElementKind::Slide { index } => self.draw_slide(d, element, *index),
                ElementKind::Button if element.role.is_some() => draw_button(d, element),
                ElementKind::Button | ElementKind::Link { .. } => draw_region(d, element),
                ElementKind::Inert => {}
                ElementKind::NavigationRegion => d.draw_rectangle_rec(element.bounds, CHROME_BACKGROUND),
                ElementKind::FormField => draw_field(d, element, focused),
                ElementKind::ProgressBar => draw_progress(d, element),
                ElementKind::Counter => draw_centered(d, &element.text, element.bounds, CHROME_FONT_SIZE, Color::WHITE),
                ElementKind::Announcer => {
                    let b = element.bounds;
                    d.draw_text(&element.text, (b.x + CHROME_PADDING) as i32, (b.y + 3.0) as i32, STATUS_FONT_SIZE, Color::LIGHTGRAY);
                }
            }
        }
    }

    fn draw_slide(&self, d: &mut RaylibDrawHandle, element: &Element, index: usize) {
        let area = element.bounds;
        let texture = index.checked_sub(1).and_then(|i| self.textures.get(i)).and_then(Option::as_ref);

        match texture {
            Some(texture) => {
                // Fit inside the slide area, never upscale past native size
                let tex_width = texture.width() as f32;
                let tex_height = texture.height() as f32;
                let scale = (area.width * SLIDE_FILL / tex_width)
                    .min(area.height * SLIDE_FILL / tex_height)
                    .min(1.0);

                let position = Vector2::new(
                    area.x + (area.width - tex_width * scale) * 0.5,
                    area.y + (area.height - tex_height * scale) * 0.5,
                );
                d.draw_texture_ex(texture, position, 0.0, scale, Color::WHITE);
            }
            None => draw_centered(d, &element.text, area, TITLE_FONT_SIZE, Color::WHITE),
        }
    }
}

fn draw_centered(d: &mut RaylibDrawHandle, text: &str, bounds: Rectangle, size: i32, color: Color) {
    let width = d.measure_text(text, size) as f32;
    let x = bounds.x + (bounds.width - width) * 0.5;
    let y = bounds.y + (bounds.height - size as f32) * 0.5;
    d.draw_text(text, x as i32, y as i32, size, color);
}

fn draw_region(d: &mut RaylibDrawHandle, element: &Element) {
    d.draw_rectangle_lines_ex(element.bounds, 2.0, REGION_OUTLINE);
    if !element.text.is_empty() {
        draw_centered(d, &element.text, element.bounds, STATUS_FONT_SIZE, REGION_OUTLINE);
    }
}

fn draw_button(d: &mut RaylibDrawHandle, element: &Element) {
    let (fill, text) = if element.disabled {
        (BUTTON_DISABLED, Color::GRAY)
    } else {
        (BUTTON_ENABLED, Color::WHITE)
    };
    d.draw_rectangle_rec(element.bounds, fill);
    draw_centered(d, &element.text, element.bounds, CHROME_FONT_SIZE, text);
}

fn draw_field(d: &mut RaylibDrawHandle, element: &Element, focused: bool) {
    let outline = if focused { FIELD_FOCUSED } else { FIELD_IDLE };
    d.draw_rectangle_lines_ex(element.bounds, 2.0, outline);

    let caption = match (element.text.is_empty(), focused) {
        (true, false) => "Go to".to_string(),
        (_, true) => format!("{}_", element.text),
        (false, false) => element.text.clone(),
    };
    draw_centered(d, &caption, element.bounds, CHROME_FONT_SIZE, outline);
}

fn draw_progress(d: &mut RaylibDrawHandle, element: &Element) {
    let b = element.bounds;
    d.draw_rectangle_rec(b, CHROME_BACKGROUND);
    let fill = Rectangle::new(b.x, b.y, b.width * element.value.clamp(0.0, 1.0), b.height);
    d.draw_rectangle_rec(fill, PROGRESS_FILL);
}
