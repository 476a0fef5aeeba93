use eframe::egui::{
    Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2, pos2,
    vec2,
};

use crate::cluster::Canvas;
use crate::surface::{GradientStop, Surface};

/// Maps layout space onto the screen for the current pan and zoom.
#[derive(Clone, Copy, Debug)]
pub(super) struct LayoutTransform {
    origin: Pos2,
    zoom: f32,
}

impl LayoutTransform {
    /// Centers the outer canvas in `rect`, then applies pan and zoom.
    pub(super) fn new(rect: Rect, canvas: &Canvas, pan: Vec2, zoom: f32) -> Self {
        let margin_offset = vec2(canvas.margin_left, canvas.margin_top);
        let half_canvas = vec2(canvas.width, canvas.height) * 0.5;
        Self {
            origin: rect.center() + pan + (margin_offset - half_canvas) * zoom,
            zoom,
        }
    }

    pub(super) fn zoom(&self) -> f32 {
        self.zoom
    }

    pub(super) fn to_screen(&self, layout: Vec2) -> Pos2 {
        self.origin + layout * self.zoom
    }

    pub(super) fn to_layout(&self, screen: Pos2) -> Vec2 {
        (screen - self.origin) / self.zoom
    }

    /// Outer canvas bounds on screen.
    pub(super) fn canvas_rect(&self, canvas: &Canvas) -> Rect {
        let min = self.to_screen(vec2(-canvas.margin_left, -canvas.margin_top));
        Rect::from_min_size(min, vec2(canvas.width, canvas.height) * self.zoom)
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: &LayoutTransform, canvas: &Canvas) {
    painter.rect_filled(rect, 0.0, Color32::from_gray(232));

    let page = transform.canvas_rect(canvas);
    painter.rect_filled(page, 2.0, Color32::WHITE);
    painter.rect_stroke(
        page,
        2.0,
        Stroke::new(1.0, Color32::from_gray(205)),
        StrokeKind::Outside,
    );

    let step = (50.0 * transform.zoom().clamp(0.6, 1.8)).max(20.0);
    let grid = Stroke::new(1.0, Color32::from_rgba_unmultiplied(120, 130, 140, 22));

    let mut x = page.left() + step;
    while x < page.right() {
        painter.line_segment([pos2(x, page.top()), pos2(x, page.bottom())], grid);
        x += step;
    }

    let mut y = page.top() + step;
    while y < page.bottom() {
        painter.line_segment([pos2(page.left(), y), pos2(page.right(), y)], grid);
        y += step;
    }
}

/// Paints layout-space primitives with an egui painter.
pub(super) struct PainterSurface<'a> {
    pub(super) painter: &'a Painter,
    pub(super) transform: LayoutTransform,
}

impl Surface for PainterSurface<'_> {
    fn circle(&mut self, center: Vec2, radius: f32, fill: Color32, stroke: Stroke) {
        let zoom = self.transform.zoom();
        self.painter.circle(
            self.transform.to_screen(center),
            (radius * zoom).max(1.0),
            fill,
            stroke,
        );
    }

    fn text(&mut self, position: Vec2, anchor: Align2, text: &str, font: FontId, color: Color32) {
        let size = font.size * self.transform.zoom().clamp(0.6, 2.0);
        self.painter.text(
            self.transform.to_screen(position),
            anchor,
            text,
            FontId::new(size, font.family),
            color,
        );
    }

    fn gradient_rect(&mut self, rect: Rect, stops: &[GradientStop]) {
        let screen = Rect::from_min_max(
            self.transform.to_screen(rect.min.to_vec2()),
            self.transform.to_screen(rect.max.to_vec2()),
        );

        let mut mesh = Mesh::default();
        for pair in stops.windows(2) {
            let [upper, lower] = pair else {
                continue;
            };
            let top = screen.top() + screen.height() * upper.offset;
            let bottom = screen.top() + screen.height() * lower.offset;

            let base = mesh.vertices.len() as u32;
            mesh.colored_vertex(pos2(screen.left(), top), upper.color);
            mesh.colored_vertex(pos2(screen.right(), top), upper.color);
            mesh.colored_vertex(pos2(screen.left(), bottom), lower.color);
            mesh.colored_vertex(pos2(screen.right(), bottom), lower.color);
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base + 1, base + 3, base + 2);
        }

        self.painter.add(Shape::mesh(mesh));
    }
}
