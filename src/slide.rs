use std::path::{Path, PathBuf};

use raylib::prelude::*;
use serde::Deserialize;

use crate::manifest::{RegionEntry, SlideEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Link,
    Button,
    Inert, // Plain content the viewer must be able to click without changing slides
}

/// An interactive area of a slide. `rect` is relative to the slide area (0..1).
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub kind: RegionKind,
    pub rect: Rectangle,
    pub href: Option<String>,
    pub label: Option<String>,
}

impl From<&RegionEntry> for Region {
    fn from(entry: &RegionEntry) -> Self {
        let [x, y, w, h] = entry.rect;
        Self {
            kind: entry.kind,
            rect: Rectangle::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0), w.max(0.0), h.max(0.0)),
            href: entry.href.as_deref().map(display_text),
            label: entry.label.as_deref().map(display_text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub index: usize, // 1-based
    pub title: String,
    pub image: Option<PathBuf>,
    pub regions: Vec<Region>,

    // The manifest names an image that is not on disk
    pub missing: bool,
}

impl Slide {
    pub fn from_image(index: usize, path: PathBuf) -> Self {
        Self {
            index,
            title: title_from_path(&path).unwrap_or_else(|| format!("Slide {}", index)),
            image: Some(path),
            regions: Vec::new(),
            missing: false,
        }
    }

    pub fn from_entry(index: usize, entry: &SlideEntry, base_dir: &Path) -> Self {
        let image = entry.image.as_ref().map(|image| {
            if image.is_absolute() { image.clone() } else { base_dir.join(image) }
        });
        let missing = image.as_ref().is_some_and(|path| !path.is_file());

        let title = entry
            .title
            .as_deref()
            .map(display_text)
            .filter(|title| !title.trim().is_empty())
            .or_else(|| image.as_deref().and_then(title_from_path))
            .unwrap_or_else(|| format!("Slide {}", index));

        Self {
            index,
            title,
            image,
            regions: entry.regions.iter().map(Region::from).collect(),
            missing,
        }
    }
}

/// Manifest text made safe for the window title and text drawing, which
/// cannot carry NUL bytes.
pub fn display_text(text: &str) -> String {
    text.replace('\0', "")
}

/// "03-case_studies.png" becomes "Case studies".
pub fn title_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let words = stem
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '-' || c == '_' || c == ' ' || c == '.')
        .replace(['-', '_'], " ");
    let words = words.trim();

    let mut chars = words.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
