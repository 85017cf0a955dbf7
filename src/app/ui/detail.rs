// src/app/ui/detail.rs
use eframe::egui::{self as eg, TextureHandle};

use super::ui_render_load_error;
use crate::app::cache::ImageKind;
use crate::app::detail::{DetailView, GalleryViewer, NO_REQUIREMENTS, NO_SCREENSHOTS};
use crate::app::gfx::cover_uv;
use crate::app::paginate::GridState;
use crate::app::{DetailPage, GameListApp, Route, MAX_UPLOADS_PER_FRAME};

const HEADER_H: f32 = 220.0;
const SIDE_THUMB_W: f32 = 260.0;
const SHOT_SIZE: eg::Vec2 = eg::vec2(160.0, 90.0);

/// Paint `tex` (or a grey placeholder) into a fixed-size slot.
fn image_slot(ui: &mut eg::Ui, size: eg::Vec2, tex: Option<&TextureHandle>, sense: eg::Sense) -> eg::Response {
    let (rect, resp) = ui.allocate_exact_size(size, sense);
    match tex {
        Some(tex) => {
            ui.painter()
                .image(tex.id(), rect, cover_uv(tex.size_vec2(), rect), eg::Color32::WHITE);
        }
        None => {
            ui.painter().rect_filled(rect, 4.0, eg::Color32::from_gray(40));
        }
    }
    resp
}

fn tag_row(ui: &mut eg::Ui, tags: &[String]) {
    ui.horizontal_wrapped(|ui| {
        for tag in tags {
            eg::Frame::none()
                .fill(ui.visuals().widgets.inactive.bg_fill)
                .rounding(eg::Rounding::same(8.0))
                .inner_margin(eg::Margin::symmetric(6.0, 2.0))
                .show(ui, |ui| ui.small(tag));
        }
    });
}

fn label_rows(ui: &mut eg::Ui, id: &str, rows: &[(&'static str, String)]) {
    eg::Grid::new(id).num_columns(2).spacing([12.0, 4.0]).show(ui, |ui| {
        for (label, value) in rows {
            ui.label(eg::RichText::new(*label).strong());
            ui.add(eg::Label::new(value.as_str()).wrap());
            ui.end_row();
        }
    });
}

impl GameListApp {
    pub(crate) fn ui_render_detail(&mut self, ctx: &eg::Context) {
        let mut go_home = false;
        let mut uploads_left = MAX_UPLOADS_PER_FRAME;

        eg::TopBottomPanel::top("detail_topbar").show(ctx, |ui| {
            ui.add_space(4.0);
            if ui.button("← Back to catalog").clicked() {
                go_home = true;
            }
            ui.add_space(4.0);
        });

        if let GridState::Failed(err) = self.grid.state().clone() {
            eg::CentralPanel::default().show(ctx, |ui| ui_render_load_error(ui, &err));
        } else if let Some(mut page) = self.detail.take() {
            let DetailPage { view, gallery, gallery_opened_frame } = &mut page;
            eg::CentralPanel::default().show(ctx, |ui| match &*view {
                Ok(view) => {
                    self.ui_render_detail_body(ui, ctx, view, gallery, gallery_opened_frame, &mut uploads_left);
                }
                Err(e) => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.heading(e.to_string());
                        ui.add_space(6.0);
                        if ui.link("Return to the home page").clicked() {
                            go_home = true;
                        }
                    });
                }
            });

            if let (Ok(view), true) = (&*view, gallery.is_open()) {
                self.ui_render_gallery(ctx, &view.screenshots, gallery, *gallery_opened_frame, &mut uploads_left);
            }
            self.detail = Some(page);
        } else {
            eg::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading("Loading game details…");
                    ui.add(eg::Spinner::new().size(18.0));
                });
            });
        }

        if go_home {
            self.navigate(Route::Catalog);
        }
    }

    fn ui_render_detail_body(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        view: &DetailView,
        gallery: &mut GalleryViewer,
        opened_frame: &mut u64,
        uploads_left: &mut usize,
    ) {
        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                // Header
                if let Some(url) = view.header_image.as_deref() {
                    let tex = self.thumb_texture(ctx, url, uploads_left);
                    let size = eg::vec2(ui.available_width(), HEADER_H);
                    image_slot(ui, size, tex.as_ref(), eg::Sense::hover());
                    ui.add_space(8.0);
                }
                ui.heading(eg::RichText::new(&view.title).size(26.0).strong());
                ui.add_space(8.0);

                ui.columns(2, |cols| {
                    // Left: thumbnail, info, requirements, tags
                    let left = &mut cols[0];
                    if let Some(url) = view.side_thumbnail.as_deref() {
                        let tex = self.thumb_texture(ctx, url, uploads_left);
                        let w = SIDE_THUMB_W.min(left.available_width());
                        image_slot(left, eg::vec2(w, w * 9.0 / 16.0), tex.as_ref(), eg::Sense::hover());
                        left.add_space(8.0);
                    }

                    left.heading("Game Info");
                    label_rows(left, "game_info", &view.info);
                    left.add_space(10.0);

                    left.heading("PC Requirements");
                    match &view.requirements {
                        Some(lines) => {
                            left.label(eg::RichText::new("Minimum:").strong());
                            for line in lines {
                                left.add(
                                    eg::Label::new(format!("{}: {}", line.key, line.value)).wrap(),
                                );
                            }
                        }
                        None => {
                            left.label(eg::RichText::new(NO_REQUIREMENTS).weak());
                        }
                    }
                    left.add_space(10.0);

                    if !view.genres.is_empty() {
                        left.label(eg::RichText::new("Genres").strong());
                        tag_row(left, &view.genres);
                    }
                    if !view.platforms.is_empty() {
                        left.label(eg::RichText::new("Platforms").strong());
                        tag_row(left, &view.platforms);
                    }

                    // Right: screenshots, description, torrent info
                    let right = &mut cols[1];
                    right.heading("Screenshots");
                    if view.screenshots.is_empty() {
                        right.label(eg::RichText::new(NO_SCREENSHOTS).weak());
                    } else {
                        right.horizontal_wrapped(|ui| {
                            for (i, url) in view.screenshots.iter().enumerate() {
                                let tex = self.thumb_texture(ctx, url, uploads_left);
                                let resp = image_slot(ui, SHOT_SIZE, tex.as_ref(), eg::Sense::click())
                                    .on_hover_cursor(eg::CursorIcon::PointingHand);
                                if resp.clicked() {
                                    gallery.open(i);
                                    *opened_frame = ctx.frame_nr();
                                }
                            }
                        });
                    }
                    right.add_space(10.0);

                    right.heading("Description");
                    right.add(eg::Label::new(view.description.as_str()).wrap());
                    right.add_space(10.0);

                    if !view.torrent.is_empty() || view.magnet.is_some() {
                        right.heading("Torrent Info");
                        label_rows(right, "torrent_info", &view.torrent);
                        if let Some(magnet) = &view.magnet {
                            right.add_space(6.0);
                            if right.button("🧲 Magnet Link").clicked() {
                                ctx.open_url(eg::OpenUrl::new_tab(magnet));
                            }
                        }
                    }
                });
            });
    }

    /// Modal screenshot viewer over a dimmed backdrop.
    fn ui_render_gallery(
        &mut self,
        ctx: &eg::Context,
        shots: &[String],
        gallery: &mut GalleryViewer,
        opened_frame: u64,
        uploads_left: &mut usize,
    ) {
        let Some(index) = gallery.current() else {
            return;
        };
        let Some(url) = shots.get(index) else {
            gallery.close();
            return;
        };
        let just_opened = ctx.frame_nr() == opened_frame;

        let (left, right, escape) = ctx.input(|i| {
            (
                i.key_pressed(eg::Key::ArrowLeft),
                i.key_pressed(eg::Key::ArrowRight),
                i.key_pressed(eg::Key::Escape),
            )
        });

        let screen = ctx.screen_rect();
        let backdrop = eg::Area::new(eg::Id::new("gallery_backdrop"))
            .order(eg::Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, eg::Color32::from_black_alpha(200));
                ui.allocate_rect(screen, eg::Sense::click())
            })
            .inner;

        // Full-size screenshot once downloaded; the strip thumbnail until then.
        let tex = self
            .image_texture(ctx, ImageKind::Full, url, uploads_left)
            .or_else(|| self.thumb_texture(ctx, url, uploads_left));
        let mut prev = left;
        let mut next = right;
        let mut close = escape;

        eg::Area::new(eg::Id::new("gallery_modal"))
            .order(eg::Order::Foreground)
            .anchor(eg::Align2::CENTER_CENTER, eg::Vec2::ZERO)
            .show(ctx, |ui| {
                eg::Frame::popup(ui.style()).show(ui, |ui| {
                    let max = screen.size() * 0.8;
                    let size = match &tex {
                        Some(t) => {
                            let ts = t.size_vec2();
                            let scale = (max.x / ts.x).min(max.y / ts.y);
                            ts * scale
                        }
                        None => eg::vec2(max.x.min(960.0), max.x.min(960.0) * 9.0 / 16.0),
                    };
                    match &tex {
                        Some(t) => {
                            ui.add(eg::Image::new((t.id(), size)));
                        }
                        None => {
                            let (rect, _) = ui.allocate_exact_size(size, eg::Sense::hover());
                            ui.painter().rect_filled(rect, 4.0, eg::Color32::from_gray(30));
                            ui.put(rect, eg::Spinner::new().size(24.0));
                        }
                    }
                    ui.horizontal(|ui| {
                        prev |= ui.button("◀").clicked();
                        ui.label(format!("{} / {}", index + 1, shots.len()));
                        next |= ui.button("▶").clicked();
                        ui.add_space(12.0);
                        close |= ui.button("✕ Close").clicked();
                    });
                });
            });

        if backdrop.clicked() && !just_opened {
            close = true;
        }

        if close {
            gallery.close();
        } else if prev {
            gallery.prev();
        } else if next {
            gallery.next();
        }
    }
}
