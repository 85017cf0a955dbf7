use std::{env, fs, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::app::sort::MissingDatePolicy;
use crate::app::types::SortKey;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_CATALOG_SOURCE: &str = "data/games.json";
pub const DEFAULT_SETTINGS_SOURCE: &str = "data/settings.json";
pub const DEFAULT_CACHE_DIR: &str = ".gamelist_cache";

pub const DEFAULT_PAGE_SIZE: usize = 30;
pub const DEFAULT_FEATURED_LIMIT: usize = 15;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_THUMB_WORKERS: usize = 8;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog_source: String,
    pub settings_source: String,
    pub cache_dir: Option<String>,
    pub page_size: usize,
    pub featured_limit: usize,
    pub search_debounce_ms: u64,
    pub thumb_workers: usize,
    pub missing_release_dates: MissingDatePolicy,
    /// Sort applied on start and by "Clear Filters".
    pub default_sort: SortKey,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_source: DEFAULT_CATALOG_SOURCE.to_string(),
            settings_source: DEFAULT_SETTINGS_SOURCE.to_string(),
            cache_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
            featured_limit: DEFAULT_FEATURED_LIMIT,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            thumb_workers: DEFAULT_THUMB_WORKERS,
            missing_release_dates: MissingDatePolicy::default(),
            default_sort: SortKey::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "games_path")]
    catalog_source: Option<String>,
    settings_source: Option<String>,
    cache_dir: Option<String>,
    page_size: Option<usize>,
    featured_limit: Option<usize>,
    search_debounce_ms: Option<u64>,
    thumb_workers: Option<usize>,
    missing_release_dates: Option<String>,
    default_sort: Option<String>,
}

/// Path of the config file: `$GAMELIST_CONFIG`, else `config.json` in the working dir.
pub fn config_path() -> PathBuf {
    env::var_os("GAMELIST_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load_config() -> AppConfig {
    let cfg_path = config_path();
    match fs::read_to_string(&cfg_path) {
        Ok(raw) => match config_from_str(&raw) {
            Ok(cfg) => {
                info!("Loaded config from {}", cfg_path.display());
                cfg
            }
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Using defaults.",
                    cfg_path.display(),
                    err
                );
                AppConfig::default()
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
            AppConfig::default()
        }
    }
}

/// Parse a config document, applying defaults and clamps to every field.
pub fn config_from_str(raw: &str) -> Result<AppConfig, serde_json::Error> {
    let parsed: RawConfig = serde_json::from_str(raw)?;
    let mut cfg = AppConfig::default();

    if let Some(src) = parsed.catalog_source.filter(|s| !s.trim().is_empty()) {
        cfg.catalog_source = src;
    }
    if let Some(src) = parsed.settings_source.filter(|s| !s.trim().is_empty()) {
        cfg.settings_source = src;
    }
    if parsed.cache_dir.is_some() {
        cfg.cache_dir = parsed.cache_dir;
    }
    if let Some(n) = parsed.page_size {
        cfg.page_size = n.clamp(1, 500);
    }
    if let Some(n) = parsed.featured_limit {
        cfg.featured_limit = n.clamp(1, 100);
    }
    if let Some(ms) = parsed.search_debounce_ms {
        cfg.search_debounce_ms = ms.min(5_000);
    }
    if let Some(n) = parsed.thumb_workers {
        cfg.thumb_workers = n.clamp(1, 32);
    }
    if let Some(policy) = parsed.missing_release_dates {
        match MissingDatePolicy::from_str(&policy) {
            Some(p) => cfg.missing_release_dates = p,
            None => warn!(
                "Unknown missing_release_dates `{policy}` in config; falling back to `epoch`."
            ),
        }
    }

    if let Some(sort) = parsed.default_sort {
        match SortKey::from_str(sort.trim()) {
            Some(key) => cfg.default_sort = key,
            None => warn!("Unknown default_sort `{sort}` in config; falling back to `name-asc`."),
        }
    }

    Ok(cfg)
}

/// Resolve a relative path against the working directory.
pub fn resolve_relative_path(p: &str) -> PathBuf {
    let path = PathBuf::from(p);
    if path.is_absolute() {
        return path;
    }
    env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = config_from_str("{}").unwrap();
        assert_eq!(cfg.catalog_source, DEFAULT_CATALOG_SOURCE);
        assert_eq!(cfg.settings_source, DEFAULT_SETTINGS_SOURCE);
        assert_eq!(cfg.page_size, 30);
        assert_eq!(cfg.featured_limit, 15);
        assert_eq!(cfg.search_debounce_ms, 300);
        assert_eq!(cfg.missing_release_dates, MissingDatePolicy::Epoch);
    }

    #[test]
    fn overrides_and_clamps() {
        let cfg = config_from_str(
            r#"{
                "catalog_source": "https://example.org/games.json",
                "page_size": 0,
                "featured_limit": 1000,
                "search_debounce_ms": 60000,
                "thumb_workers": 64,
                "missing_release_dates": "last"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.catalog_source, "https://example.org/games.json");
        assert_eq!(cfg.page_size, 1);
        assert_eq!(cfg.featured_limit, 100);
        assert_eq!(cfg.search_debounce_ms, 5_000);
        assert_eq!(cfg.thumb_workers, 32);
        assert_eq!(cfg.missing_release_dates, MissingDatePolicy::Last);
    }

    #[test]
    fn legacy_games_path_alias() {
        let cfg = config_from_str(r#"{ "games_path": "local/games.json" }"#).unwrap();
        assert_eq!(cfg.catalog_source, "local/games.json");
    }

    #[test]
    fn unknown_policy_keeps_default() {
        let cfg = config_from_str(r#"{ "missing_release_dates": "first" }"#).unwrap();
        assert_eq!(cfg.missing_release_dates, MissingDatePolicy::Epoch);
    }

    #[test]
    fn default_sort_parses_or_keeps_name_order() {
        let cfg = config_from_str(r#"{ "default_sort": "metacritic-desc" }"#).unwrap();
        assert_eq!(cfg.default_sort, SortKey::MetacriticDesc);
        let cfg = config_from_str(r#"{ "default_sort": "rating" }"#).unwrap();
        assert_eq!(cfg.default_sort, SortKey::NameAsc);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(config_from_str("{ page_size: 3 ").is_err());
    }

    #[test]
    fn absolute_paths_are_kept() {
        let abs = if cfg!(windows) { "C:\\data" } else { "/data" };
        assert_eq!(resolve_relative_path(abs), PathBuf::from(abs));
    }
}
