mod interaction;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui};

use crate::util::preview;

use super::ViewModel;
use super::render_utils::{LayoutTransform, PainterSurface, draw_background};

impl ViewModel {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.handle_canvas_zoom(ui, rect, &response);
        self.handle_canvas_pan(&response);

        let canvas = *self.engine.canvas();
        let transform = LayoutTransform::new(rect, &canvas, self.pan, self.zoom);
        draw_background(&painter, rect, &transform, &canvas);

        // Every frame re-offers the dataset; the engine only starts one run per dataset.
        if let Some(dataset) = &self.dataset {
            self.engine.receive(dataset);
        }
        self.engine.initialize();

        let Some(dataset) = self.dataset.clone() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Open a tweet dataset to begin",
                FontId::proportional(18.0),
                Color32::from_gray(110),
            );
            return;
        };

        // Input first, then physics, then paint.
        self.hovered = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer))
            .and_then(|pointer| self.engine.point_at(transform.to_layout(pointer)));

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(id) = self.hovered
        {
            self.engine.click(id);
        }

        let delta_secs = ui.input(|input| input.stable_dt);
        let ticks = self.clock.ticks_for(delta_secs);
        let running = self.engine.advance(ticks, |_| {});
        if running || response.dragged() {
            ui.ctx().request_repaint();
        }

        let emphasis = self.search.matches(&dataset);
        let mut surface = PainterSurface {
            painter: &painter,
            transform,
        };
        self.engine.render(&mut surface, emphasis.as_deref());

        if let Some(id) = self.hovered {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            if let Some(record) = dataset.iter().find(|record| record.idx == id) {
                let tooltip = format!(
                    "{}\n{} · sentiment {:.2} · subjectivity {:.2}",
                    preview(&record.raw_tweet, 120),
                    record.month,
                    record.sentiment,
                    record.subjectivity
                );
                response.on_hover_text_at_pointer(tooltip);
            }
        }
    }
}
