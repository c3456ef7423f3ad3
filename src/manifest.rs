use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::constants::*;
use crate::error::DeckError;
use crate::slide::RegionKind;

pub const MANIFEST_FILE_NAME: &str = "deck.toml";

/// Optional `deck.toml` describing the slides, named sections and input tuning.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub title: Option<String>,
    pub settings: Settings,
    pub slides: Vec<SlideEntry>,
    pub sections: BTreeMap<String, usize>,
    pub shortcuts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub swipe_min_distance: f32,
    pub resize_debounce_ms: u64,
    pub click_slop: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            swipe_min_distance: SWIPE_MIN_DISTANCE,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            click_slop: CLICK_SLOP,
        }
    }
}

impl Settings {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlideEntry {
    pub title: Option<String>,
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

/// Interactive area on a slide, `rect` is `[x, y, w, h]` in 0..1 slide-area units.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionEntry {
    pub kind: RegionKind,
    pub rect: [f32; 4],
    pub href: Option<String>,
    pub label: Option<String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let text = fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, DeckError> {
        toml::from_str(text).map_err(|source| DeckError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Looks for `deck.toml` next to the slides, `None` when the deck has no manifest.
    pub fn discover(deck_dir: &Path) -> Result<Option<Self>, DeckError> {
        let candidate = deck_dir.join(MANIFEST_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate).map(Some)
        } else {
            Ok(None)
        }
    }
}
