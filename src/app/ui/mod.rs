// src/app/ui/mod.rs
pub mod detail;
pub mod featured;
pub mod grid;
pub mod topbar;

use eframe::egui as eg;

use crate::app::paginate::GridState;
use crate::app::{GameListApp, Route, MAX_UPLOADS_PER_FRAME};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load games data. Please try again later.";

impl GameListApp {
    pub(crate) fn ui_render_catalog(&mut self, ctx: &eg::Context) {
        eg::TopBottomPanel::top("catalog_topbar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.ui_render_site_message(ui);
            self.ui_render_topbar(ui);
            self.ui_render_chips(ui);
            ui.add_space(4.0);
        });

        let mut uploads_left = MAX_UPLOADS_PER_FRAME;
        let mut open: Option<usize> = None;

        eg::CentralPanel::default().show(ctx, |ui| {
            match self.grid.state().clone() {
                GridState::Loading => {
                    self.ui_render_splash(ui);
                    return;
                }
                GridState::Failed(err) => {
                    ui_render_load_error(ui, &err);
                    return;
                }
                GridState::Ready | GridState::Empty => {}
            }

            eg::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if let Some(id) = self.ui_render_featured(ui, ctx, &mut uploads_left) {
                        open = Some(id);
                    }
                    ui.add_space(12.0);
                    if let Some(id) = self.ui_render_grid(ui, ctx, &mut uploads_left) {
                        open = Some(id);
                    }
                });
        });

        if let Some(id) = open {
            self.navigate(Route::detail(id));
        }
    }

    pub(crate) fn ui_render_splash(&self, ui: &mut eg::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Loading games…");
            ui.add(eg::Spinner::new().size(18.0));
            ui.separator();
            ui.monospace(format!("Source: {}", self.cfg.catalog_source));
            ui.monospace(format!(
                "Cache: {}",
                crate::app::cache::cache_dir().display()
            ));
        });
    }

    fn ui_render_site_message(&self, ui: &mut eg::Ui) {
        let msg = self.settings.site_message.trim();
        if msg.is_empty() {
            return;
        }
        eg::Frame::none()
            .fill(ui.visuals().selection.bg_fill.gamma_multiply(0.35))
            .rounding(eg::Rounding::same(6.0))
            .inner_margin(eg::Margin::symmetric(10.0, 6.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.add(eg::Label::new(eg::RichText::new(msg).strong()).wrap());
            });
        ui.add_space(4.0);
    }
}

pub(crate) fn ui_render_load_error(ui: &mut eg::Ui, detail: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.colored_label(ui.visuals().error_fg_color, LOAD_ERROR_MESSAGE);
        ui.add_space(6.0);
        ui.label(eg::RichText::new(detail).weak().small());
    });
}
