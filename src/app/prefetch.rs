// src/app/prefetch.rs
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use eframe::egui::{self as eg, TextureHandle};
use tracing::{debug, info, warn};

use super::cache::{download_and_store_with_client, find_any_by_key, url_to_cache_key, ImageKind};
use super::types::{Thumb, ThumbDone, ThumbState};
use super::{GameListApp, MAX_DONE_PER_FRAME};

impl GameListApp {
    fn images_mut(&mut self, kind: ImageKind) -> &mut HashMap<String, Thumb> {
        match kind {
            ImageKind::Thumb => &mut self.thumbs,
            ImageKind::Full => &mut self.full_images,
        }
    }

    /// Spin up the download workers once; later calls are no-ops.
    fn ensure_thumb_pool(&mut self) -> bool {
        if self.work_tx.is_some() {
            return true;
        }
        if self.thumb_pool_failed {
            return false;
        }

        // One shared HTTP client.
        let client = match reqwest::blocking::Client::builder()
            .user_agent(concat!("gamelist/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(20))
            .pool_max_idle_per_host(16)
            .default_headers({
                use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
                let mut h = HeaderMap::new();
                h.insert(
                    ACCEPT,
                    HeaderValue::from_static("image/avif,image/webp,image/*;q=0.8,*/*;q=0.5"),
                );
                h
            })
            .build()
        {
            Ok(c) => Arc::new(c),
            Err(e) => {
                warn!("http client build failed: {e}; thumbnails disabled");
                self.thumb_pool_failed = true;
                return false;
            }
        };

        let (work_tx, work_rx) = mpsc::channel::<(ImageKind, String)>();
        let (done_tx, done_rx) = mpsc::channel::<ThumbDone>();
        let work_rx = Arc::new(Mutex::new(work_rx));

        for _ in 0..self.cfg.thumb_workers {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let client = Arc::clone(&client);

            std::thread::spawn(move || loop {
                let job = {
                    let Ok(rx) = work_rx.lock() else {
                        break;
                    };
                    rx.recv()
                };
                let Ok((kind, url)) = job else {
                    break;
                };
                let key = url_to_cache_key(&url);
                let result: Result<PathBuf, String> =
                    download_and_store_with_client(&client, &url, &key, kind);
                if done_tx.send(ThumbDone { kind, url, result }).is_err() {
                    break;
                }
            });
        }

        debug!("thumbnail pool: {} workers", self.cfg.thumb_workers);
        self.work_tx = Some(work_tx);
        self.done_rx = Some(done_rx);
        true
    }

    /// Queue `url` unless it is already known or on disk.
    pub(crate) fn request_image(&mut self, kind: ImageKind, url: &str) {
        if url.trim().is_empty() || self.images_mut(kind).contains_key(url) {
            return;
        }
        // Disk hit: skip the workers entirely.
        if let Some(path) = find_any_by_key(kind, &url_to_cache_key(url)) {
            self.images_mut(kind).insert(
                url.to_string(),
                Thumb {
                    state: ThumbState::Cached,
                    path: Some(path),
                    tex: None,
                },
            );
            return;
        }
        if !self.ensure_thumb_pool() {
            return;
        }
        self.images_mut(kind).insert(url.to_string(), Thumb::pending());
        if let Some(tx) = &self.work_tx {
            let _ = tx.send((kind, url.to_string()));
        }
    }

    /// Queue every card image up front: featured rows first, then the grid order.
    pub(crate) fn start_prefetch(&mut self) {
        if self.prefetch_started {
            return;
        }
        self.prefetch_started = true;

        if std::env::var_os("GAMELIST_DISABLE_PREFETCH").is_some() {
            info!("Prefetch disabled via GAMELIST_DISABLE_PREFETCH (thumbnails load on demand).");
            return;
        }

        let mut urls: Vec<String> = self
            .featured
            .iter()
            .flat_map(|(_, cards)| cards.iter())
            .filter_map(|c| c.image_url.clone())
            .collect();
        urls.extend(
            self.results
                .iter()
                .filter_map(|&id| self.catalog.get(id))
                .filter_map(|e| e.card_image().map(str::to_string)),
        );

        let before = self.thumbs.len();
        for url in urls {
            self.request_image(ImageKind::Thumb, &url);
        }
        info!("Queued {} thumbnails for prefetch", self.thumbs.len() - before);
    }

    /// Drain finished downloads; textures are uploaded lazily during paint.
    pub(crate) fn poll_prefetch_done(&mut self, ctx: &eg::Context) {
        let Some(rx) = &self.done_rx else {
            return;
        };
        let mut drained = 0usize;
        while drained < MAX_DONE_PER_FRAME {
            match rx.try_recv() {
                Ok(msg) => {
                    drained += 1;
                    let images = match msg.kind {
                        ImageKind::Thumb => &mut self.thumbs,
                        ImageKind::Full => &mut self.full_images,
                    };
                    let Some(thumb) = images.get_mut(&msg.url) else {
                        continue;
                    };
                    match msg.result {
                        Ok(path) => {
                            thumb.path = Some(path);
                            thumb.state = ThumbState::Cached;
                        }
                        Err(e) => {
                            warn!("{:?} image failed: {e}", msg.kind);
                            thumb.state = ThumbState::Failed;
                        }
                    }
                }
                Err(mpsc::TryRecvError::Empty) | Err(mpsc::TryRecvError::Disconnected) => break,
            }
        }
        if drained > 0 {
            ctx.request_repaint();
        }
    }

    pub(crate) fn thumb_texture(
        &mut self,
        ctx: &eg::Context,
        url: &str,
        uploads_left: &mut usize,
    ) -> Option<TextureHandle> {
        self.image_texture(ctx, ImageKind::Thumb, url, uploads_left)
    }

    /// Texture for `url` if ready; requests or uploads it otherwise.
    ///
    /// `uploads_left` caps GPU uploads per frame.
    pub(crate) fn image_texture(
        &mut self,
        ctx: &eg::Context,
        kind: ImageKind,
        url: &str,
        uploads_left: &mut usize,
    ) -> Option<TextureHandle> {
        if !self.images_mut(kind).contains_key(url) {
            self.request_image(kind, url);
            return None;
        }
        let thumb = self.images_mut(kind).get_mut(url)?;
        match thumb.state {
            ThumbState::Ready => thumb.tex.clone(),
            ThumbState::Cached if *uploads_left > 0 => {
                *uploads_left -= 1;
                let path = thumb.path.clone()?;
                let name = format!("{kind:?}-{}", url_to_cache_key(url));
                match super::gfx::load_texture_from_path(ctx, &path, &name) {
                    Ok(tex) => {
                        thumb.tex = Some(tex.clone());
                        thumb.state = ThumbState::Ready;
                        Some(tex)
                    }
                    Err(e) => {
                        warn!("texture upload failed for {}: {e}", path.display());
                        thumb.state = ThumbState::Failed;
                        None
                    }
                }
            }
            ThumbState::Cached => {
                // out of budget this frame
                ctx.request_repaint();
                None
            }
            ThumbState::Pending | ThumbState::Failed => None,
        }
    }
}
