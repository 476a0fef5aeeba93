use eframe::egui::{Rect, Response, Ui, Vec2};

use super::super::ViewModel;
use super::super::render_utils::LayoutTransform;

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 8.0;

impl ViewModel {
    /// Scroll wheel and pinch zoom around the pointer.
    pub(in crate::app) fn handle_canvas_zoom(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        if !response.hovered() {
            return;
        }

        let (scroll, pinch) = ui.input(|input| (input.raw_scroll_delta.y, input.zoom_delta()));
        let factor = pinch * (1.0 + scroll * 0.0015).clamp(0.85, 1.15);
        if (factor - 1.0).abs() <= f32::EPSILON {
            return;
        }

        let pointer = response.hover_pos().unwrap_or_else(|| rect.center());
        let canvas = *self.engine.canvas();
        let anchor = LayoutTransform::new(rect, &canvas, self.pan, self.zoom).to_layout(pointer);

        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        let moved = LayoutTransform::new(rect, &canvas, self.pan, self.zoom).to_screen(anchor);
        self.pan += pointer - moved;
    }

    /// Any drag pans; a click without movement is left for selection.
    pub(in crate::app) fn handle_canvas_pan(&mut self, response: &Response) {
        if response.dragged() {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn reset_view(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
