//! Canvas geometry and the month → anchor assignment.

use eframe::egui::{Vec2, vec2};
use serde::Deserialize;

/// Outer canvas size and the margins that frame layout space.
///
/// Layout space is the inner rectangle; its origin is the inner top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin_top: 125.0,
            margin_right: 40.0,
            margin_bottom: 125.0,
            margin_left: 40.0,
        }
    }
}

impl Canvas {
    pub fn inner_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn inner_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    pub fn inner_size(&self) -> Vec2 {
        vec2(self.inner_width(), self.inner_height())
    }

    /// Outer canvas center expressed in layout space.
    pub fn center(&self) -> Vec2 {
        vec2(
            self.width / 2.0 - self.margin_left,
            self.height / 2.0 - self.margin_top,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClusterAnchor {
    pub label: String,
    pub target: Vec2,
}

/// Static set of anchors, fixed before a simulation starts.
#[derive(Clone, Debug)]
pub struct ClusterLayout {
    anchors: Vec<ClusterAnchor>,
    fallback: Vec2,
}

impl ClusterLayout {
    pub const MONTHS: [&'static str; 3] = ["March", "April", "May"];

    /// March, April and May stacked vertically in the middle column.
    pub fn months(canvas: &Canvas) -> Self {
        let column = canvas.inner_width() / 2.0;
        let step = canvas.inner_height() / 4.0;
        let anchors = Self::MONTHS
            .iter()
            .enumerate()
            .map(|(index, label)| ClusterAnchor {
                label: (*label).to_owned(),
                target: vec2(column, step * (index + 1) as f32),
            })
            .collect();

        Self {
            anchors,
            fallback: canvas.center(),
        }
    }

    pub fn anchors(&self) -> &[ClusterAnchor] {
        &self.anchors
    }

    pub fn fallback(&self) -> Vec2 {
        self.fallback
    }

    pub fn lookup(&self, month: &str) -> Option<Vec2> {
        self.anchors
            .iter()
            .find(|anchor| anchor.label == month)
            .map(|anchor| anchor.target)
    }

    /// Anchor for a month; unknown months land on the canvas center.
    pub fn anchor_for(&self, month: &str) -> Vec2 {
        self.lookup(month).unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_stack_vertically_in_the_middle_column() {
        let canvas = Canvas::default();
        let layout = ClusterLayout::months(&canvas);

        assert_eq!(layout.anchor_for("March"), vec2(360.0, 87.5));
        assert_eq!(layout.anchor_for("April"), vec2(360.0, 175.0));
        assert_eq!(layout.anchor_for("May"), vec2(360.0, 262.5));
    }

    #[test]
    fn unknown_month_falls_back_to_canvas_center() {
        let canvas = Canvas::default();
        let layout = ClusterLayout::months(&canvas);

        assert_eq!(layout.lookup("June"), None);
        assert_eq!(layout.anchor_for("June"), canvas.center());
        assert_eq!(canvas.center(), vec2(360.0, 175.0));
    }
}
