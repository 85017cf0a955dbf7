// src/app/paginate.rs
use tracing::debug;

use super::data::CatalogEntry;
use super::present::CardView;

pub const EMPTY_MESSAGE: &str =
    "No games found matching your criteria. Try adjusting your filters or search term.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Reset,
    Append,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridState {
    Loading,
    Ready,
    Empty,
    Failed(String),
}

/// Progress shown on the load-more control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadMore {
    pub rendered: usize,
    pub total: usize,
}

impl LoadMore {
    pub fn label(&self) -> String {
        format!("Load More Games ({} / {})", self.rendered, self.total)
    }
}

/// Owns the materialized cards for the current result set.
///
/// Callers hand in the full sorted result on every call; only the next page
/// is turned into cards.
pub struct GridRenderer {
    page_size: usize,
    hide_ratings: bool,
    cards: Vec<CardView>,
    total: usize,
    state: GridState,
}

impl GridRenderer {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            hide_ratings: false,
            cards: Vec::new(),
            total: 0,
            state: GridState::Loading,
        }
    }

    pub fn set_hide_ratings(&mut self, hide: bool) {
        self.hide_ratings = hide;
    }

    pub fn render(&mut self, entries: &[&CatalogEntry], mode: RenderMode) {
        match mode {
            RenderMode::Reset => {
                self.cards.clear();
                self.total = entries.len();
                if entries.is_empty() {
                    self.state = GridState::Empty;
                    return;
                }
                self.state = GridState::Ready;
            }
            RenderMode::Append => {
                if self.state != GridState::Ready {
                    return;
                }
                self.total = entries.len();
            }
        }

        let start = self.cards.len();
        let end = (start + self.page_size).min(entries.len());
        if start >= end {
            return;
        }
        let hide = self.hide_ratings;
        self.cards
            .extend(entries[start..end].iter().map(|e| CardView::from_entry(e, hide)));
        debug!("grid: {} / {} cards ({mode:?})", self.cards.len(), self.total);
    }

    pub fn fail(&mut self, msg: impl Into<String>) {
        self.cards.clear();
        self.total = 0;
        self.state = GridState::Failed(msg.into());
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub const fn state(&self) -> &GridState {
        &self.state
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    pub fn results_label(&self) -> String {
        match self.total {
            1 => "1 game found.".to_string(),
            n => format!("{n} games found."),
        }
    }

    pub fn load_more(&self) -> Option<LoadMore> {
        if self.state != GridState::Ready || self.cards.len() >= self.total {
            return None;
        }
        Some(LoadMore {
            rendered: self.cards.len(),
            total: self.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<CatalogEntry> {
        (0..n)
            .map(|i| CatalogEntry {
                id: i,
                name: format!("Game {i}"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn reset_renders_first_page() {
        let data = entries(75);
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let mut grid = GridRenderer::new(30);
        grid.render(&refs, RenderMode::Reset);
        assert_eq!(grid.cards().len(), 30);
        assert_eq!(grid.results_label(), "75 games found.");
        let more = grid.load_more().unwrap();
        assert_eq!(more.label(), "Load More Games (30 / 75)");
    }

    #[test]
    fn appends_until_exhausted() {
        let data = entries(75);
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let mut grid = GridRenderer::new(30);
        grid.render(&refs, RenderMode::Reset);
        grid.render(&refs, RenderMode::Append);
        assert_eq!(grid.cards().len(), 60);
        grid.render(&refs, RenderMode::Append);
        assert_eq!(grid.cards().len(), 75);
        assert_eq!(grid.load_more(), None);
        grid.render(&refs, RenderMode::Append);
        assert_eq!(grid.cards().len(), 75);
        let ids: Vec<usize> = grid.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, (0..75).collect::<Vec<_>>());
    }

    #[test]
    fn empty_result_set() {
        let mut grid = GridRenderer::new(30);
        grid.render(&[], RenderMode::Reset);
        assert_eq!(grid.state(), &GridState::Empty);
        assert_eq!(grid.results_label(), "0 games found.");
        assert_eq!(grid.load_more(), None);
    }

    #[test]
    fn singular_count() {
        let data = entries(1);
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let mut grid = GridRenderer::new(30);
        grid.render(&refs, RenderMode::Reset);
        assert_eq!(grid.results_label(), "1 game found.");
        assert_eq!(grid.load_more(), None);
    }

    #[test]
    fn reset_replaces_previous_cards() {
        let data = entries(40);
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let mut grid = GridRenderer::new(10);
        grid.render(&refs, RenderMode::Reset);
        grid.render(&refs, RenderMode::Append);
        let fewer: Vec<&CatalogEntry> = refs[35..].to_vec();
        grid.render(&fewer, RenderMode::Reset);
        assert_eq!(grid.cards().len(), 5);
        assert_eq!(grid.cards()[0].id, 35);
    }

    #[test]
    fn failure_hides_load_more() {
        let data = entries(40);
        let refs: Vec<&CatalogEntry> = data.iter().collect();
        let mut grid = GridRenderer::new(10);
        grid.render(&refs, RenderMode::Reset);
        grid.fail("HTTP error! status: 404");
        assert!(matches!(grid.state(), GridState::Failed(_)));
        assert!(grid.cards().is_empty());
        assert_eq!(grid.load_more(), None);
        grid.render(&refs, RenderMode::Append);
        assert!(grid.cards().is_empty());
    }
}
