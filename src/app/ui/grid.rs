// src/app/ui/grid.rs
use eframe::egui::{self as eg, TextureHandle};

use crate::app::gfx::cover_uv;
use crate::app::paginate::{GridState, EMPTY_MESSAGE};
use crate::app::present::CardView;
use crate::app::{GameListApp, Route};

pub const H_SPACING: f32 = 12.0;
pub const V_SPACING: f32 = 14.0;

const IMAGE_AR: f32 = 9.0 / 16.0;
const TEXT_H: f32 = 100.0;

pub(crate) fn card_size(card_w: f32) -> eg::Vec2 {
    eg::vec2(card_w, card_w * IMAGE_AR + TEXT_H)
}

/// Draw one card; returns the click response for the whole card.
pub(crate) fn draw_card(
    ui: &mut eg::Ui,
    id_salt: &str,
    card: &CardView,
    card_w: f32,
    tex: Option<&TextureHandle>,
) -> eg::Response {
    let size = card_size(card_w);
    ui.allocate_ui_with_layout(size, eg::Layout::top_down(eg::Align::Min), |ui| {
        ui.set_min_size(size);
        let rect = ui.max_rect();
        let resp = ui
            .interact(rect, eg::Id::new((id_salt, card.id)), eg::Sense::click())
            .on_hover_cursor(eg::CursorIcon::PointingHand);

        let visuals = ui.visuals().clone();
        ui.painter()
            .rect_filled(rect, eg::Rounding::same(6.0), visuals.faint_bg_color);

        let image_rect = eg::Rect::from_min_size(rect.min, eg::vec2(card_w, card_w * IMAGE_AR));
        let text_rect = eg::Rect::from_min_max(
            eg::pos2(rect.min.x + 6.0, image_rect.max.y + 4.0),
            eg::pos2(rect.max.x - 6.0, rect.max.y),
        );

        match tex {
            Some(tex) => {
                ui.painter().image(
                    tex.id(),
                    image_rect,
                    cover_uv(tex.size_vec2(), image_rect),
                    eg::Color32::WHITE,
                );
            }
            None => {
                ui.painter()
                    .rect_filled(image_rect, 6.0, eg::Color32::from_gray(40));
                if card.image_url.is_none() {
                    ui.painter().text(
                        image_rect.center(),
                        eg::Align2::CENTER_CENTER,
                        "No Image",
                        eg::FontId::proportional(14.0),
                        eg::Color32::from_gray(170),
                    );
                }
            }
        }

        ui.allocate_ui_at_rect(text_rect, |ui| {
            ui.spacing_mut().item_spacing.y = 2.0;
            ui.add(eg::Label::new(eg::RichText::new(&card.title).strong().size(15.0)).truncate());
            for (label, value) in &card.lines {
                ui.add(
                    eg::Label::new(eg::RichText::new(format!("{label}: {value}")).size(12.0))
                        .truncate(),
                );
            }
        });

        // Same location the binary accepts as its start argument.
        resp.context_menu(|ui| {
            if ui.button("Copy link").clicked() {
                ui.ctx().copy_text(Route::detail_href(card.id));
                ui.close_menu();
            }
        });

        if resp.hovered() {
            ui.painter().rect_stroke(
                rect.shrink(1.0),
                6.0,
                eg::Stroke::new(2.0, visuals.selection.stroke.color),
            );
        }
        resp
    })
    .inner
}

impl GameListApp {
    pub(crate) fn card_width(&self) -> f32 {
        self.settings.card_size.width()
    }

    /// Results heading, cards, and the load-more control. Returns a clicked card id.
    pub(crate) fn ui_render_grid(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        uploads_left: &mut usize,
    ) -> Option<usize> {
        ui.horizontal(|ui| {
            ui.heading("All Games");
            ui.add_space(8.0);
            ui.label(eg::RichText::new(self.grid.results_label()).weak());
        });
        ui.add_space(6.0);

        if *self.grid.state() == GridState::Empty {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| ui.label(EMPTY_MESSAGE));
            return None;
        }

        let card_w = self.card_width();
        let cards: Vec<CardView> = self.grid.cards().to_vec();
        let mut clicked = None;

        // Columns + centering
        let avail = ui.available_width();
        let cols = ((avail + H_SPACING) / (card_w + H_SPACING))
            .floor()
            .max(1.0) as usize;
        let used = cols as f32 * card_w + (cols.saturating_sub(1)) as f32 * H_SPACING;
        let left_pad = ((avail - used) * 0.5).max(0.0);

        for row in cards.chunks(cols) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = eg::vec2(H_SPACING, V_SPACING);
                if left_pad > 0.0 {
                    ui.add_space(left_pad);
                }
                for card in row {
                    let tex = card
                        .image_url
                        .as_deref()
                        .and_then(|url| self.thumb_texture(ctx, url, uploads_left));
                    if draw_card(ui, "grid_card", card, card_w, tex.as_ref()).clicked() {
                        clicked = Some(card.id);
                    }
                }
            });
            ui.add_space(V_SPACING);
        }

        if let Some(more) = self.grid.load_more() {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui
                    .add(eg::Button::new(more.label()).min_size(eg::vec2(240.0, 32.0)))
                    .clicked()
                {
                    self.load_more();
                }
            });
            ui.add_space(16.0);
        }

        clicked
    }
}
