// src/app/settings.rs
use std::sync::mpsc::Sender;

use eframe::egui as eg;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::catalog::CatalogSource;
use super::featured::TOP_RATED;
use super::types::SettingsMsg;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CardSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CardSize {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
    pub const fn width(self) -> f32 {
        match self {
            Self::Small => 150.0,
            Self::Medium => 190.0,
            Self::Large => 240.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Visuals for this theme; `Auto` follows `system` and falls back to dark.
    pub fn visuals(self, system: Option<eframe::Theme>) -> eg::Visuals {
        match self {
            Self::Light => eg::Visuals::light(),
            Self::Dark => eg::Visuals::dark(),
            Self::Auto => system.unwrap_or(eframe::Theme::Dark).egui_visuals(),
        }
    }
}

/// Site-wide presentation settings from `settings.json`.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteSettings {
    pub site_message: String,
    pub card_size: CardSize,
    pub show_ratings: bool,
    pub featured_section: String,
    pub theme: Theme,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_message: String::new(),
            card_size: CardSize::default(),
            show_ratings: true,
            featured_section: TOP_RATED.to_string(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    site_message: Option<String>,
    card_size: Option<String>,
    show_ratings: Option<bool>,
    featured_section: Option<String>,
    theme: Option<String>,
}

impl SiteSettings {
    /// Merge recognised keys over the defaults. Unknown values keep the default.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: RawSettings = serde_json::from_str(raw)?;
        let mut s = Self::default();
        if let Some(msg) = parsed.site_message {
            s.site_message = msg;
        }
        if let Some(size) = parsed.card_size.as_deref().and_then(CardSize::from_str) {
            s.card_size = size;
        }
        if let Some(show) = parsed.show_ratings {
            s.show_ratings = show;
        }
        if let Some(section) = parsed.featured_section.filter(|v| !v.trim().is_empty()) {
            s.featured_section = section;
        }
        if let Some(theme) = parsed.theme.as_deref().and_then(Theme::from_str) {
            s.theme = theme;
        }
        Ok(s)
    }

    /// Read settings from `source`; every failure quietly yields defaults.
    pub fn load(source: &CatalogSource) -> Self {
        let bytes = match source.fetch() {
            Ok(b) => b,
            Err(e) => {
                debug!("No site settings from {} ({e}); using defaults", source.describe());
                return Self::default();
            }
        };
        match std::str::from_utf8(&bytes)
            .map_err(|e| e.to_string())
            .and_then(|txt| Self::from_json(txt).map_err(|e| e.to_string()))
        {
            Ok(s) => {
                info!("Loaded site settings from {}", source.describe());
                s
            }
            Err(e) => {
                warn!("Ignoring malformed settings {}: {e}", source.describe());
                Self::default()
            }
        }
    }
}

pub fn spawn_settings_load(source: CatalogSource, tx: Sender<SettingsMsg>) {
    std::thread::spawn(move || {
        let _ = tx.send(SettingsMsg::Loaded(SiteSettings::load(&source)));
    });
}
