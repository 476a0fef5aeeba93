use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{info, warn};

use crate::record::Record;

/// Reads records from a JSON array, or from an object holding a `records` array.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    let records = parse_records(&raw)
        .with_context(|| format!("failed to parse dataset {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

pub fn parse_records(raw: &str) -> Result<Vec<Record>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON")?;
    let rows = match parsed {
        Value::Array(rows) => rows,
        Value::Object(mut object) => match object.remove("records") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(anyhow!("expected a `records` array")),
        },
        _ => return Err(anyhow!("expected an array of records")),
    };

    let mut seen = HashSet::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());
    for (position, row) in rows.into_iter().enumerate() {
        let record: Record = serde_json::from_value(row)
            .with_context(|| format!("invalid record at position {position}"))?;
        if !seen.insert(record.idx) {
            warn!(idx = %record.idx, position, "duplicate record id skipped");
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::record::RecordId;

    #[test]
    fn accepts_bare_array_and_wrapped_object() {
        let bare = r#"[{"idx": 1, "Month": "March", "Sentiment": 0.5, "Subjectivity": 0.1, "RawTweet": "a"}]"#;
        let wrapped = r#"{"records": [{"idx": 2, "Month": "May", "Sentiment": 0, "Subjectivity": 1, "RawTweet": "b"}]}"#;

        assert_eq!(parse_records(bare).unwrap()[0].idx, RecordId(1));
        assert_eq!(parse_records(wrapped).unwrap()[0].month, "May");
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let raw = r#"[
            {"idx": 4, "Month": "March", "RawTweet": "kept"},
            {"idx": 4, "Month": "April", "RawTweet": "dropped"},
            {"idx": 5, "Month": "May", "RawTweet": "other"}
        ]"#;

        let records = parse_records(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].raw_tweet, "kept");
    }

    #[test]
    fn malformed_input_reports_context() {
        let error = parse_records(r#"[{"Month": "March"}]"#).unwrap_err();
        assert!(format!("{error:#}").contains("position 0"));

        assert!(parse_records("42").is_err());
        assert!(parse_records("{\"rows\": []}").is_err());
        assert!(parse_records("not json").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"idx": 8, "Month": "April", "Sentiment": -1, "Subjectivity": 0.2, "RawTweet": "meh"}}]"#
        )
        .unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records, vec![Record::new(8, "April", -1.0, 0.2, "meh")]);

        let missing = load_records(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(missing.to_string().contains("failed to read dataset"));
    }
}
