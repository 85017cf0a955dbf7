// src/app/featured.rs
use std::cmp::Reverse;

use super::data::CatalogEntry;

pub const TOP_RATED: &str = "Top Rated";
pub const RECENTLY_ADDED: &str = "Recently Added";
pub const EMPTY_SECTION_MESSAGE: &str = "No games available in this section.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    TopRated,
    RecentlyAdded,
}

impl Section {
    pub const fn title(self) -> &'static str {
        match self {
            Self::TopRated => TOP_RATED,
            Self::RecentlyAdded => RECENTLY_ADDED,
        }
    }

    /// Display order, with `first` (a section title from settings) leading.
    pub fn ordered(first: &str) -> [Self; 2] {
        if first.trim().eq_ignore_ascii_case(RECENTLY_ADDED) {
            [Self::RecentlyAdded, Self::TopRated]
        } else {
            [Self::TopRated, Self::RecentlyAdded]
        }
    }

    pub fn select(self, entries: &[CatalogEntry], limit: usize) -> Vec<&CatalogEntry> {
        match self {
            Self::TopRated => top_rated(entries, limit),
            Self::RecentlyAdded => recently_added(entries, limit),
        }
    }
}

/// Highest metacritic first; unscored entries never qualify.
pub fn top_rated(entries: &[CatalogEntry], limit: usize) -> Vec<&CatalogEntry> {
    let mut scored: Vec<(i64, &CatalogEntry)> = entries
        .iter()
        .filter_map(|e| e.metacritic.map(|s| (s, e)))
        .collect();
    scored.sort_by_key(|(s, _)| Reverse(*s));
    scored.into_iter().take(limit).map(|(_, e)| e).collect()
}

/// Newest release first; entries without a parseable date never qualify.
pub fn recently_added(entries: &[CatalogEntry], limit: usize) -> Vec<&CatalogEntry> {
    let mut dated: Vec<(i64, &CatalogEntry)> = entries
        .iter()
        .filter_map(|e| e.release_timestamp_ms().map(|t| (t, e)))
        .collect();
    dated.sort_by_key(|(t, _)| Reverse(*t));
    dated.into_iter().take(limit).map(|(_, e)| e).collect()
}
