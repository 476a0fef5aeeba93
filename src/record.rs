use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable per-record identifier, the `idx` column of the source dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One tweet as handed over by the ingestion side.
///
/// Numeric columns that are missing in the source deserialize to `NaN`, which the
/// color scales treat as an unknown value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub idx: RecordId,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Sentiment", default = "unknown_value")]
    pub sentiment: f32,
    #[serde(rename = "Subjectivity", default = "unknown_value")]
    pub subjectivity: f32,
    #[serde(rename = "RawTweet", default)]
    pub raw_tweet: String,
}

fn unknown_value() -> f32 {
    f32::NAN
}

impl Record {
    pub fn new(
        idx: u64,
        month: impl Into<String>,
        sentiment: f32,
        subjectivity: f32,
        raw_tweet: impl Into<String>,
    ) -> Self {
        Self {
            idx: RecordId(idx),
            month: month.into(),
            sentiment,
            subjectivity,
            raw_tweet: raw_tweet.into(),
        }
    }
}
