use eframe::egui::{Align2, Color32, FontId, Rect, Vec2, vec2};

use super::Attribute;
use crate::cluster::Canvas;
use crate::surface::{GradientStop, Surface};

#[derive(Clone, Debug, PartialEq)]
pub struct LegendLabel {
    pub text: &'static str,
    pub position: Vec2,
    pub anchor: Align2,
}

/// Gradient swatch plus the two extreme captions for one attribute.
///
/// A legend is a value derived from the attribute alone; switching attributes
/// builds a new one rather than editing the old.
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub attribute: Attribute,
    pub swatch: Rect,
    pub stops: Vec<GradientStop>,
    pub labels: [LegendLabel; 2],
}

impl Legend {
    pub const WIDTH: f32 = 20.0;
    pub const HEIGHT: f32 = 300.0;
    const LABEL_GAP: f32 = 5.0;
    const LABEL_SIZE: f32 = 13.0;

    pub fn build(attribute: Attribute, canvas: &Canvas) -> Self {
        let origin = vec2(
            canvas.inner_width() - 100.0,
            (canvas.height - Self::HEIGHT) / 2.0,
        );
        let swatch = Rect::from_min_size(origin.to_pos2(), vec2(Self::WIDTH, Self::HEIGHT));

        // High end of the domain sits at the top of the swatch.
        let scale = attribute.scale();
        let (low, high) = scale.extent();
        let span = (high - low).max(f32::EPSILON);
        let stops = scale
            .domain()
            .iter()
            .zip(scale.range())
            .rev()
            .map(|(value, color)| GradientStop {
                offset: (high - value) / span,
                color: *color,
            })
            .collect();

        let [top, bottom] = attribute.extreme_labels();
        let labels = [
            LegendLabel {
                text: top,
                position: swatch.right_top().to_vec2() + vec2(Self::LABEL_GAP, 0.0),
                anchor: Align2::LEFT_TOP,
            },
            LegendLabel {
                text: bottom,
                position: swatch.right_bottom().to_vec2() + vec2(Self::LABEL_GAP, 0.0),
                anchor: Align2::LEFT_BOTTOM,
            },
        ];

        Self {
            attribute,
            swatch,
            stops,
            labels,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.gradient_rect(self.swatch, &self.stops);
        for label in &self.labels {
            surface.text(
                label.position,
                label.anchor,
                label.text,
                FontId::proportional(Self::LABEL_SIZE),
                Color32::from_gray(30),
            );
        }
    }
}
