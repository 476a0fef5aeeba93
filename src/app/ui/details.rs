use eframe::egui::{self, RichText, Ui};

use crate::record::RecordId;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_selection(&mut self, ui: &mut Ui) {
        ui.heading("Selected Tweets");
        ui.add_space(6.0);

        let selected = self.engine.selected_records();
        if selected.is_empty() {
            ui.label("Click a point to collect its tweet here.");
            return;
        }

        let mut deselect: Option<RecordId> = None;
        let mut clear = false;

        ui.horizontal(|ui| {
            ui.label(format!("{} selected", selected.len()));
            if ui.button("Clear selection").clicked() {
                clear = true;
            }
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for record in &selected {
                    ui.group(|ui| {
                        ui.label(record.raw_tweet.as_str());
                        ui.horizontal(|ui| {
                            ui.small(format!(
                                "{} · {} · sentiment {:.2} · subjectivity {:.2}",
                                record.idx, record.month, record.sentiment, record.subjectivity
                            ));
                            if ui.small_button(RichText::new("Remove")).clicked() {
                                deselect = Some(record.idx);
                            }
                        });
                    });
                }
            });

        if clear {
            self.engine.clear_selection();
        } else if let Some(id) = deselect {
            self.engine.click(id);
        }
    }
}
