// src/app/mod.rs

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use eframe::egui as eg;
use tracing::{debug, info, warn};

pub mod cache;
pub mod catalog;
pub mod data;
pub mod debounce;
pub mod detail;
pub mod featured;
pub mod filters;
pub mod gfx;
pub mod paginate;
mod prefetch;
pub mod present;
pub mod route;
pub mod settings;
pub mod sort;
pub mod types;
mod ui;
pub mod utils;

pub use catalog::{spawn_catalog_load, Catalog, CatalogError, CatalogSource, FilterOptions};
pub use data::CatalogEntry;
pub use debounce::Debouncer;
pub use detail::{lookup_entry, DetailError, DetailView, GalleryViewer};
pub use featured::{recently_added, top_rated, Section};
pub use filters::{filter_entries, FilterCriteria, SizeBucket};
pub use paginate::{GridRenderer, GridState, LoadMore, RenderMode};
pub use present::CardView;
pub use route::Route;
pub use settings::SiteSettings;
pub use sort::{sort_entries, MissingDatePolicy};
pub use types::{CatalogMsg, SortKey};

use crate::config::AppConfig;
use cache::ImageKind;
use types::{SettingsMsg, Thumb, ThumbDone};

// ---- Tunables ----
const MAX_DONE_PER_FRAME: usize = 12;
const MAX_UPLOADS_PER_FRAME: usize = 4;

/// Detail route state. Rebuilt whenever the route changes.
pub(crate) struct DetailPage {
    pub view: Result<DetailView, DetailError>,
    pub gallery: GalleryViewer,
    /// Frame the gallery was opened on; the opening click must not close it.
    pub gallery_opened_frame: u64,
}

pub struct GameListApp {
    cfg: AppConfig,
    route: Route,

    // data
    catalog: Catalog,
    catalog_loaded: bool,
    catalog_rx: Option<Receiver<CatalogMsg>>,
    settings: SiteSettings,
    settings_rx: Option<Receiver<SettingsMsg>>,
    options: FilterOptions,

    // catalog view
    criteria: FilterCriteria,
    search_input: String,
    search_debounce: Debouncer<String>,
    sort_key: SortKey,
    results: Vec<usize>,
    grid: GridRenderer,
    featured: Vec<(Section, Vec<CardView>)>,

    // detail view
    detail: Option<DetailPage>,

    // thumbnails
    thumbs: HashMap<String, Thumb>,
    full_images: HashMap<String, Thumb>,
    work_tx: Option<Sender<(ImageKind, String)>>,
    done_rx: Option<Receiver<ThumbDone>>,
    prefetch_started: bool,
    thumb_pool_failed: bool,

    did_init: bool,
    applied_visuals: Option<(settings::Theme, Option<eframe::Theme>)>,
}

impl GameListApp {
    pub fn new(cfg: AppConfig, route: Route) -> Self {
        let grid = GridRenderer::new(cfg.page_size);
        let search_debounce = Debouncer::new(Duration::from_millis(cfg.search_debounce_ms));
        let sort_key = cfg.default_sort;
        Self {
            cfg,
            route,
            catalog: Catalog::default(),
            catalog_loaded: false,
            catalog_rx: None,
            settings: SiteSettings::default(),
            settings_rx: None,
            options: FilterOptions::default(),
            criteria: FilterCriteria::default(),
            search_input: String::new(),
            search_debounce,
            sort_key,
            results: Vec::new(),
            grid,
            featured: Vec::new(),
            detail: None,
            thumbs: HashMap::new(),
            full_images: HashMap::new(),
            work_tx: None,
            done_rx: None,
            prefetch_started: false,
            thumb_pool_failed: false,
            did_init: false,
            applied_visuals: None,
        }
    }

    /// Kick off the one-shot catalog and settings loads.
    fn start_loading(&mut self) {
        let catalog_source = CatalogSource::parse(&self.cfg.catalog_source);
        info!("Loading games from {}", catalog_source.describe());
        let (tx, rx) = mpsc::channel();
        spawn_catalog_load(catalog_source, tx);
        self.catalog_rx = Some(rx);

        let settings_source = CatalogSource::parse(&self.cfg.settings_source);
        let (tx, rx) = mpsc::channel();
        settings::spawn_settings_load(settings_source, tx);
        self.settings_rx = Some(rx);
    }

    fn poll_loaders(&mut self, ctx: &eg::Context) {
        if let Some(rx) = &self.catalog_rx {
            match rx.try_recv() {
                Ok(msg) => {
                    self.catalog_rx = None;
                    self.on_catalog_msg(msg);
                    ctx.request_repaint();
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.catalog_rx = None;
                    self.on_catalog_msg(CatalogMsg::Failed("loader stopped".into()));
                }
            }
        }

        if let Some(rx) = &self.settings_rx {
            match rx.try_recv() {
                Ok(SettingsMsg::Loaded(settings)) => {
                    self.settings_rx = None;
                    self.on_settings_loaded(settings);
                    ctx.request_repaint();
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => self.settings_rx = None,
            }
        }
    }

    fn on_catalog_msg(&mut self, msg: CatalogMsg) {
        self.catalog_loaded = true;
        match msg {
            CatalogMsg::Loaded(catalog) => {
                self.catalog = catalog;
                self.options = self.catalog.filter_options();
                debug!(
                    "filter options: {} genres, {} platforms, {} years",
                    self.options.genres.len(),
                    self.options.platforms.len(),
                    self.options.years.len()
                );
                self.rebuild_featured();
                self.apply_filters_and_sort();
                self.detail = None;
                self.start_prefetch();
            }
            CatalogMsg::Failed(err) => {
                warn!("catalog unavailable: {err}");
                self.catalog = Catalog::default();
                self.results.clear();
                self.featured.clear();
                self.grid.fail(err);
            }
        }
    }

    fn on_settings_loaded(&mut self, settings: SiteSettings) {
        let reshape = settings.show_ratings != self.settings.show_ratings
            || settings.featured_section != self.settings.featured_section;
        self.grid.set_hide_ratings(!settings.show_ratings);
        self.settings = settings;
        if reshape && self.catalog_loaded && !self.catalog.is_empty() {
            self.rebuild_featured();
            self.apply_filters_and_sort();
        }
    }

    fn hide_ratings(&self) -> bool {
        !self.settings.show_ratings
    }

    /// Filter + sort the whole catalog and re-render the grid from page 1.
    pub(crate) fn apply_filters_and_sort(&mut self) {
        if !self.catalog_loaded || matches!(self.grid.state(), GridState::Failed(_)) {
            return;
        }
        let started = Instant::now();
        let filtered = filter_entries(&self.catalog.entries, &self.criteria);
        let sorted = sort_entries(&filtered, self.sort_key, self.cfg.missing_release_dates);
        self.results = sorted.iter().map(|e| e.id).collect();
        self.grid.render(&sorted, RenderMode::Reset);
        debug!(
            "filter/sort: {} of {} entries by {} in {:?}",
            self.results.len(),
            self.catalog.len(),
            self.sort_key.as_str(),
            started.elapsed()
        );
    }

    /// Append the next page of the current result set.
    pub(crate) fn load_more(&mut self) {
        let sorted: Vec<&CatalogEntry> = self
            .results
            .iter()
            .filter_map(|&id| self.catalog.get(id))
            .collect();
        self.grid.render(&sorted, RenderMode::Append);
    }

    pub(crate) fn rebuild_featured(&mut self) {
        let limit = self.cfg.featured_limit;
        let hide = self.hide_ratings();
        self.featured = Section::ordered(&self.settings.featured_section)
            .into_iter()
            .map(|section| {
                let cards = section
                    .select(&self.catalog.entries, limit)
                    .into_iter()
                    .map(|e| CardView::from_entry(e, hide))
                    .collect();
                (section, cards)
            })
            .collect();
    }

    pub(crate) fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.search_input.clear();
        self.search_debounce.cancel();
        self.sort_key = self.cfg.default_sort;
        self.apply_filters_and_sort();
    }

    pub(crate) fn on_search_edited(&mut self) {
        self.search_debounce
            .push(self.search_input.clone(), Instant::now());
    }

    /// Run the pending search once input has been quiet long enough.
    fn drive_search_debounce(&mut self, ctx: &eg::Context) {
        if !self.search_debounce.is_pending() {
            return;
        }
        let now = Instant::now();
        if let Some(term) = self.search_debounce.take_ready(now) {
            if term != self.criteria.search {
                self.criteria.search = term;
                self.apply_filters_and_sort();
            }
        } else if let Some(left) = self.search_debounce.remaining(now) {
            ctx.request_repaint_after(left);
        }
    }

    pub(crate) fn navigate(&mut self, route: Route) {
        debug!("navigate: {route:?}");
        self.route = route;
        self.detail = None;
    }

    /// Resolve the detail page once the catalog is available.
    fn ensure_detail_page(&mut self) {
        let Route::Detail { id } = &self.route else {
            return;
        };
        if self.detail.is_some() || !self.catalog_loaded {
            return;
        }
        let view = lookup_entry(&self.catalog, id.as_deref()).map(DetailView::from_entry);
        if let Err(e) = &view {
            info!("detail lookup failed for {id:?}: {e}");
        }
        let shots = view.as_ref().map(|v| v.screenshots.len()).unwrap_or(0);
        self.detail = Some(DetailPage {
            view,
            gallery: GalleryViewer::new(shots),
            gallery_opened_frame: 0,
        });
    }

    fn apply_theme(&mut self, ctx: &eg::Context, frame: &eframe::Frame) {
        let want = (self.settings.theme, frame.info().system_theme);
        if self.applied_visuals != Some(want) {
            ctx.set_visuals(want.0.visuals(want.1));
            self.applied_visuals = Some(want);
        }
    }
}

impl eframe::App for GameListApp {
    fn update(&mut self, ctx: &eg::Context, frame: &mut eframe::Frame) {
        // First frame
        if !self.did_init {
            self.did_init = true;
            self.start_loading();
        }

        self.poll_loaders(ctx);
        self.poll_prefetch_done(ctx);
        self.apply_theme(ctx, frame);

        // Keep polling while background work is outstanding.
        if self.catalog_rx.is_some() || self.settings_rx.is_some() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
        let pending = |t: &Thumb| t.state == types::ThumbState::Pending;
        if self.thumbs.values().any(pending) || self.full_images.values().any(pending) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        match self.route {
            Route::Catalog => {
                self.drive_search_debounce(ctx);
                self.ui_render_catalog(ctx);
            }
            Route::Detail { .. } => {
                self.ensure_detail_page();
                self.ui_render_detail(ctx);
            }
        }
    }
}
