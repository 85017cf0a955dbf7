// src/app/ui/topbar.rs
use eframe::egui as eg;

use crate::app::filters::SizeBucket;
use crate::app::{GameListApp, SortKey};

const METACRITIC_STEPS: [i64; 5] = [90, 80, 70, 60, 50];

/// ComboBox over `choices` with a leading "all" entry mapped to `None`.
fn option_combo<T: Clone + PartialEq>(
    ui: &mut eg::Ui,
    id: &str,
    all_label: &str,
    current: &mut Option<T>,
    choices: &[T],
    label: impl Fn(&T) -> String,
) -> bool {
    let mut changed = false;
    let selected = current.as_ref().map_or_else(|| all_label.to_string(), &label);
    eg::ComboBox::from_id_source(id)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            changed |= ui.selectable_value(current, None, all_label).clicked();
            for choice in choices {
                changed |= ui
                    .selectable_value(current, Some(choice.clone()), label(choice))
                    .clicked();
            }
        });
    changed
}

impl GameListApp {
    // ---------- TOP BAR ----------
    pub(crate) fn ui_render_topbar(&mut self, ui: &mut eg::Ui) {
        let mut changed = false;

        ui.horizontal_wrapped(|ui| {
            // Search (debounced)
            let resp = ui.add(
                eg::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search games…")
                    .desired_width(220.0),
            );
            if resp.changed() {
                self.on_search_edited();
            }

            ui.separator();

            changed |= option_combo(
                ui,
                "genre_combo",
                "All Genres",
                &mut self.criteria.genre,
                &self.options.genres,
                String::clone,
            );
            changed |= option_combo(
                ui,
                "platform_combo",
                "All Platforms",
                &mut self.criteria.platform,
                &self.options.platforms,
                String::clone,
            );
            changed |= option_combo(
                ui,
                "year_combo",
                "All Years",
                &mut self.criteria.year,
                &self.options.years,
                i32::to_string,
            );
            changed |= option_combo(
                ui,
                "metacritic_combo",
                "Any Metacritic",
                &mut self.criteria.min_metacritic,
                &METACRITIC_STEPS,
                |m| format!("{m}+"),
            );
            changed |= option_combo(
                ui,
                "size_combo",
                "Any Size",
                &mut self.criteria.size,
                &SizeBucket::ALL,
                |s| s.label().to_string(),
            );

            ui.separator();

            // Sort
            let mut changed_sort = false;
            eg::ComboBox::from_id_source("sort_by_combo")
                .selected_text(format!("Sort: {}", self.sort_key.label()))
                .show_ui(ui, |ui| {
                    for key in SortKey::ALL {
                        changed_sort |= ui
                            .selectable_value(&mut self.sort_key, key, key.label())
                            .clicked();
                    }
                });
            changed |= changed_sort;

            ui.separator();

            if ui.button("Clear Filters").clicked() {
                self.clear_filters();
                changed = false;
            }
        });

        if changed {
            self.apply_filters_and_sort();
        }
    }

    /// Removable chips for the active dropdown selections.
    pub(crate) fn ui_render_chips(&mut self, ui: &mut eg::Ui) {
        let chips = self.criteria.active_chips();
        if chips.is_empty() {
            return;
        }
        let mut removed = None;
        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            for chip in &chips {
                eg::Frame::none()
                    .fill(ui.visuals().widgets.inactive.bg_fill)
                    .rounding(eg::Rounding::same(10.0))
                    .inner_margin(eg::Margin::symmetric(8.0, 2.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(&chip.label);
                            if ui
                                .small_button("×")
                                .on_hover_text("Remove this filter")
                                .clicked()
                            {
                                removed = Some(chip.kind);
                            }
                        });
                    });
            }
        });
        if let Some(kind) = removed {
            self.criteria.clear(kind);
            self.apply_filters_and_sort();
        }
    }
}
