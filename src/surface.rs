//! The drawing boundary. Everything is expressed in layout coordinates; the
//! implementor decides how layout space maps onto pixels.

use eframe::egui::{Align2, Color32, FontId, Rect, Stroke, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// 0.0 at the top edge, 1.0 at the bottom edge.
    pub offset: f32,
    pub color: Color32,
}

pub trait Surface {
    fn circle(&mut self, center: Vec2, radius: f32, fill: Color32, stroke: Stroke);

    fn text(&mut self, position: Vec2, anchor: Align2, text: &str, font: FontId, color: Color32);

    /// Fills `rect` with a vertical gradient through `stops`.
    fn gradient_rect(&mut self, rect: Rect, stops: &[GradientStop]);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color32,
        stroke: Stroke,
    },
    Text {
        position: Vec2,
        anchor: Align2,
        text: String,
        font: FontId,
        color: Color32,
    },
    Gradient {
        rect: Rect,
        stops: Vec<GradientStop>,
    },
}

/// Records primitives instead of painting them.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, Color32, Stroke)> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Circle {
                center,
                fill,
                stroke,
                ..
            } => Some((*center, *fill, *stroke)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn gradients(&self) -> impl Iterator<Item = &[GradientStop]> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Gradient { stops, .. } => Some(stops.as_slice()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn circle(&mut self, center: Vec2, radius: f32, fill: Color32, stroke: Stroke) {
        self.primitives.push(Primitive::Circle {
            center,
            radius,
            fill,
            stroke,
        });
    }

    fn text(&mut self, position: Vec2, anchor: Align2, text: &str, font: FontId, color: Color32) {
        self.primitives.push(Primitive::Text {
            position,
            anchor,
            text: text.to_owned(),
            font,
            color,
        });
    }

    fn gradient_rect(&mut self, rect: Rect, stops: &[GradientStop]) {
        self.primitives.push(Primitive::Gradient {
            rect,
            stops: stops.to_vec(),
        });
    }
}
