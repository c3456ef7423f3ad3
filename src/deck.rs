use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::DeckError;
use crate::manifest::{Manifest, Settings};
use crate::sections::SectionTable;
use crate::slide::{display_text, Slide};
use crate::texture_loader::load_sorted_image_paths;

/// The fixed, ordered set of slides for one session.
#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub settings: Settings,
    slides: Vec<Slide>,
    sections: SectionTable,
}

impl Deck {
    pub fn new(title: impl Into<String>, slides: Vec<Slide>, sections: SectionTable) -> Result<Self, DeckError> {
        let title = title.into();
        if slides.is_empty() {
            return Err(DeckError::Empty(title.into()));
        }
        Ok(Self {
            title,
            settings: Settings::default(),
            slides,
            sections,
        })
    }

    /// Builds the deck from the manifest's slide list, or from the sorted
    /// image files of `dir` when the manifest lists none.
    pub fn load(dir: &Path, manifest: Option<Manifest>) -> Result<Self, DeckError> {
        let manifest = manifest.unwrap_or_default();

        let slides: Vec<Slide> = if manifest.slides.is_empty() {
            load_sorted_image_paths(dir)?
                .into_iter()
                .enumerate()
                .map(|(i, path)| Slide::from_image(i + 1, path))
                .collect()
        } else {
            manifest
                .slides
                .iter()
                .enumerate()
                .map(|(i, entry)| Slide::from_entry(i + 1, entry, dir))
                .collect()
        };

        if slides.is_empty() {
            return Err(DeckError::Empty(dir.to_path_buf()));
        }

        for slide in slides.iter().filter(|slide| slide.missing) {
            warn!(slide = slide.index, image = ?slide.image, "slide image not found, slide will render empty");
        }

        let sections = SectionTable::from_manifest(&manifest.sections, &manifest.shortcuts, slides.len())?;

        let title = manifest
            .title
            .as_deref()
            .map(display_text)
            .filter(|title| !title.trim().is_empty())
            .or_else(|| dir.file_name().and_then(|name| name.to_str()).map(str::to_string))
            .unwrap_or_else(|| "Slide Deck".to_string());

        info!(title = %title, slides = slides.len(), sections = sections.len(), "deck loaded");
        for slide in &slides {
            debug!(slide = slide.index, title = %slide.title, "slide");
        }

        let mut deck = Self::new(title, slides, sections)?;
        deck.settings = manifest.settings;
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// 1-based lookup.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        index.checked_sub(1).and_then(|i| self.slides.get(i))
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }
}
