use eframe::egui::Color32;

use super::Attribute;
use crate::record::Record;

const RED: Color32 = Color32::from_rgb(255, 0, 0);
const NEUTRAL: Color32 = Color32::from_rgb(0xEC, 0xEC, 0xEC);
const GREEN: Color32 = Color32::from_rgb(0, 128, 0);
const BLUE: Color32 = Color32::from_rgb(0x44, 0x67, 0xC4);

/// Piecewise-linear map from ascending domain breakpoints to colors.
#[derive(Debug, PartialEq)]
pub struct ColorScale {
    domain: &'static [f32],
    range: &'static [Color32],
}

impl ColorScale {
    pub const SENTIMENT: ColorScale = ColorScale {
        domain: &[-1.0, 0.0, 1.0],
        range: &[RED, NEUTRAL, GREEN],
    };

    pub const SUBJECTIVITY: ColorScale = ColorScale {
        domain: &[0.0, 1.0],
        range: &[NEUTRAL, BLUE],
    };

    pub fn domain(&self) -> &[f32] {
        self.domain
    }

    pub fn range(&self) -> &[Color32] {
        self.range
    }

    pub fn extent(&self) -> (f32, f32) {
        (self.domain[0], self.domain[self.domain.len() - 1])
    }

    /// Clamps into the domain. NaN is treated as the lower endpoint.
    pub fn clamp(&self, value: f32) -> f32 {
        let (low, high) = self.extent();
        if value.is_nan() {
            return low;
        }
        value.clamp(low, high)
    }

    pub fn color_at(&self, value: f32) -> Color32 {
        let value = self.clamp(value);
        let last = self.domain.len() - 1;
        let segment = (0..last)
            .find(|&index| value <= self.domain[index + 1])
            .unwrap_or(last - 1);

        let start = self.domain[segment];
        let end = self.domain[segment + 1];
        let t = if end > start {
            (value - start) / (end - start)
        } else {
            0.0
        };
        lerp_color(self.range[segment], self.range[segment + 1], t)
    }
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t)
        .round()
        .clamp(0.0, 255.0) as u8
}

fn lerp_color(from: Color32, to: Color32, t: f32) -> Color32 {
    Color32::from_rgb(
        lerp_channel(from.r(), to.r(), t),
        lerp_channel(from.g(), to.g(), t),
        lerp_channel(from.b(), to.b(), t),
    )
}

pub fn color_of(attribute: Attribute, record: &Record) -> Color32 {
    attribute.scale().color_at(attribute.value_of(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentiment(value: f32) -> Color32 {
        color_of(
            Attribute::Sentiment,
            &Record::new(1, "March", value, 0.5, ""),
        )
    }

    fn green_dominance(color: Color32) -> i32 {
        color.g() as i32 - color.r() as i32
    }

    fn channels_close(a: Color32, b: Color32) -> bool {
        [(a.r(), b.r()), (a.g(), b.g()), (a.b(), b.b())]
            .iter()
            .all(|(x, y)| (*x as i32 - *y as i32).abs() <= 1)
    }

    #[test]
    fn sentiment_endpoints_and_midpoint() {
        assert_eq!(sentiment(-1.0), RED);
        assert_eq!(sentiment(0.0), NEUTRAL);
        assert_eq!(sentiment(1.0), GREEN);
    }

    #[test]
    fn subjectivity_is_a_single_segment() {
        let scale = Attribute::Subjectivity.scale();
        assert_eq!(scale.color_at(0.0), NEUTRAL);
        assert_eq!(scale.color_at(1.0), BLUE);
        assert_eq!(
            scale.color_at(0.5),
            Color32::from_rgb(0x98, 0xAA, 0xD8)
        );
    }

    #[test]
    fn green_dominance_never_decreases_with_sentiment() {
        let mut previous = i32::MIN;
        for step in 0..=200 {
            let value = -1.0 + step as f32 * 0.01;
            let dominance = green_dominance(sentiment(value));
            assert!(dominance >= previous, "dominance dropped at {value}");
            previous = dominance;
        }
    }

    #[test]
    fn sentiment_is_symmetric_around_neutral() {
        for step in 0..=20 {
            let amount = step as f32 * 0.05;
            assert!(channels_close(
                sentiment(-amount),
                lerp_color(NEUTRAL, RED, amount)
            ));
            assert!(channels_close(
                sentiment(amount),
                lerp_color(NEUTRAL, GREEN, amount)
            ));
        }
    }

    #[test]
    fn out_of_domain_values_clamp() {
        assert_eq!(sentiment(3.5), GREEN);
        assert_eq!(sentiment(-7.0), RED);
        assert_eq!(sentiment(f32::INFINITY), GREEN);
        assert_eq!(sentiment(f32::NEG_INFINITY), RED);
        assert_eq!(sentiment(f32::NAN), RED);

        let subjectivity = Attribute::Subjectivity.scale();
        assert_eq!(subjectivity.color_at(-0.2), NEUTRAL);
        assert_eq!(subjectivity.color_at(1.2), BLUE);
    }
}
