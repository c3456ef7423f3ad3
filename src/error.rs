use std::path::PathBuf;
use thiserror::Error;

use crate::document::ElementRole;

/// Reasons a navigation request was ignored or only partially rendered.
///
/// None of these are fatal: the navigator logs them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("slide {target} is outside the deck (1..={total})")]
    OutOfRange { target: usize, total: usize },

    #[error("already on slide {0}")]
    AlreadyCurrent(usize),

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("document has no {0} element")]
    MissingElement(ElementRole),
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no slides found in {0}")]
    Empty(PathBuf),

    #[error("section '{name}' points at slide {index}, deck has {total}")]
    SectionOutOfRange { name: String, index: usize, total: usize },

    #[error("shortcut '{0}' must be a single digit 1-9")]
    InvalidShortcut(String),

    #[error("shortcut '{key}' refers to unknown section '{section}'")]
    UnknownShortcutSection { key: String, section: String },
}

/// Why a slide image could not be turned into a texture. The slide still
/// exists and falls back to showing its title.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to upload texture for {path}: {reason}")]
    Upload { path: PathBuf, reason: String },
}
