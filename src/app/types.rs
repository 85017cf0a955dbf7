// src/app/types.rs
use std::path::PathBuf;

use eframe::egui::TextureHandle;

use super::cache::ImageKind;
use super::catalog::Catalog;
use super::settings::SiteSettings;

// ---- cross-thread messages ----
pub enum CatalogMsg {
    Loaded(Catalog),
    Failed(String),
}

pub enum SettingsMsg {
    Loaded(SiteSettings),
}

pub struct ThumbDone {
    pub kind: ImageKind,
    pub url: String,
    pub result: Result<PathBuf, String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbState {
    Pending, // queued or downloading
    Cached,  // file on disk, not yet uploaded
    Ready,   // texture uploaded
    Failed,
}

/// One card image as the UI sees it.
pub struct Thumb {
    pub state: ThumbState,
    pub path: Option<PathBuf>,
    pub tex: Option<TextureHandle>, // UI thread only
}

impl Thumb {
    pub const fn pending() -> Self {
        Self {
            state: ThumbState::Pending,
            path: None,
            tex: None,
        }
    }
}

// ---- UI controls ----
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    ReleaseDateAsc,
    ReleaseDateDesc,
    MetacriticAsc,
    MetacriticDesc,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::NameAsc,
        Self::NameDesc,
        Self::ReleaseDateDesc,
        Self::ReleaseDateAsc,
        Self::MetacriticDesc,
        Self::MetacriticAsc,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::ReleaseDateAsc => "release_date-asc",
            Self::ReleaseDateDesc => "release_date-desc",
            Self::MetacriticAsc => "metacritic-asc",
            Self::MetacriticDesc => "metacritic-desc",
        }
    }
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            "release_date-asc" => Some(Self::ReleaseDateAsc),
            "release_date-desc" => Some(Self::ReleaseDateDesc),
            "metacritic-asc" => Some(Self::MetacriticAsc),
            "metacritic-desc" => Some(Self::MetacriticDesc),
            _ => None,
        }
    }
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::ReleaseDateAsc => "Release Date (Oldest)",
            Self::ReleaseDateDesc => "Release Date (Newest)",
            Self::MetacriticAsc => "Metacritic (Lowest)",
            Self::MetacriticDesc => "Metacritic (Highest)",
        }
    }
}
