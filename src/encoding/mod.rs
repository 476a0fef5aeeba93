//! Numeric attribute → color encodings and their legend.

mod color;
mod legend;

use std::fmt;

pub use color::{ColorScale, color_of};
pub use legend::{Legend, LegendLabel};

use crate::record::Record;

/// The numeric attribute currently driving point colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Attribute {
    #[default]
    Sentiment,
    Subjectivity,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Sentiment, Attribute::Subjectivity];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sentiment => "Sentiment",
            Self::Subjectivity => "Subjectivity",
        }
    }

    pub fn value_of(self, record: &Record) -> f32 {
        match self {
            Self::Sentiment => record.sentiment,
            Self::Subjectivity => record.subjectivity,
        }
    }

    pub fn scale(self) -> &'static ColorScale {
        match self {
            Self::Sentiment => &ColorScale::SENTIMENT,
            Self::Subjectivity => &ColorScale::SUBJECTIVITY,
        }
    }

    /// Legend captions for the high and low ends, top first.
    pub fn extreme_labels(self) -> [&'static str; 2] {
        match self {
            Self::Sentiment => ["Positive", "Negative"],
            Self::Subjectivity => ["Subjective", "Objective"],
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
