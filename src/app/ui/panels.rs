use eframe::egui::{self, Align, Context, Layout, RichText, Ui};

use crate::encoding::Attribute;
use crate::engine::EnginePhase;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        is_loading: bool,
        failure: Option<&str>,
        open_requested: &mut bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("tweetscape");
                    ui.separator();

                    ui.label("Dataset:");
                    let path_response = ui.add(
                        egui::TextEdit::singleline(&mut self.dataset_path)
                            .hint_text("path/to/tweets.json")
                            .desired_width(260.0),
                    );
                    let submitted = path_response.lost_focus()
                        && ui.input(|input| input.key_pressed(egui::Key::Enter));
                    let open_button = ui.add_enabled(
                        !is_loading && !self.dataset_path.trim().is_empty(),
                        egui::Button::new("Open"),
                    );
                    if open_button.clicked() || (submitted && !is_loading) {
                        *open_requested = true;
                    }
                    if is_loading {
                        ui.spinner();
                    }

                    if self.dataset.is_some() {
                        ui.separator();
                        self.draw_attribute_picker(ui);
                        ui.separator();
                        ui.label("Search:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.search.query)
                                .hint_text("tweet text")
                                .desired_width(160.0),
                        )
                        .on_hover_text("Fuzzy-highlight tweets whose text matches.");
                    }

                    if ui.button("Reset view").clicked() {
                        self.reset_view();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });

                if let Some(message) = failure {
                    ui.horizontal(|ui| {
                        ui.colored_label(
                            egui::Color32::from_rgb(190, 40, 40),
                            format!("Failed to load dataset: {message}"),
                        );
                        if ui.button("Retry").clicked() && !is_loading {
                            *open_requested = true;
                        }
                    });
                }
            });

        egui::SidePanel::right("selection")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_selection(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_canvas(ui));
    }

    fn draw_attribute_picker(&mut self, ui: &mut Ui) {
        let mut attribute = self.engine.attribute();
        egui::ComboBox::from_label("Color by")
            .selected_text(attribute.label())
            .show_ui(ui, |ui| {
                for option in Attribute::ALL {
                    ui.selectable_value(&mut attribute, option, option.label());
                }
            });
        self.engine.set_attribute(attribute);
    }

    fn status_text(&self) -> RichText {
        let records = self.engine.records().len();
        let text = match (self.engine.phase(), self.engine.simulation()) {
            (EnginePhase::Empty, _) => "no data".to_owned(),
            (EnginePhase::Active, Some(simulation)) if simulation.is_running() => format!(
                "{records} tweets · tick {} · alpha {:.3}",
                simulation.ticks(),
                simulation.alpha()
            ),
            (EnginePhase::Active, Some(simulation)) => format!(
                "{records} tweets · settled after {} ticks",
                simulation.ticks()
            ),
            _ => format!("{records} tweets · starting"),
        };
        RichText::new(text).small()
    }
}
