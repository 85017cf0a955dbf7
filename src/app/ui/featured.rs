// src/app/ui/featured.rs
use eframe::egui as eg;

use super::grid::{draw_card, H_SPACING};
use crate::app::featured::EMPTY_SECTION_MESSAGE;
use crate::app::GameListApp;

impl GameListApp {
    /// Both featured rows, in settings order. Returns a clicked card id.
    pub(crate) fn ui_render_featured(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        uploads_left: &mut usize,
    ) -> Option<usize> {
        let card_w = self.card_width();
        let mut clicked = None;

        // Take the rows out so cards can be drawn while textures load through `self`.
        let featured = std::mem::take(&mut self.featured);
        for (section, cards) in &featured {
            ui.add_space(8.0);
            ui.heading(section.title());
            ui.add_space(4.0);

            if cards.is_empty() {
                ui.label(eg::RichText::new(EMPTY_SECTION_MESSAGE).weak());
                continue;
            }

            eg::ScrollArea::horizontal()
                .id_source(("featured_row", section.title()))
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = H_SPACING;
                        for card in cards {
                            let tex = card
                                .image_url
                                .as_deref()
                                .and_then(|url| self.thumb_texture(ctx, url, uploads_left));
                            if draw_card(ui, section.title(), card, card_w, tex.as_ref()).clicked() {
                                clicked = Some(card.id);
                            }
                        }
                    });
                });
        }
        self.featured = featured;

        clicked
    }
}
