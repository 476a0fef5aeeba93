use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::record::RecordId;

/// Deterministic pseudo-random pair in `[-1, 1]` for a record, used to jitter
/// initial positions without pulling in an RNG.
pub fn stable_pair(id: RecordId) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Shortens tweet text for single-line labels, cutting on a char boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_owned();
    }

    let mut shortened = trimmed
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        for idx in 0..64 {
            let first = stable_pair(RecordId(idx));
            let second = stable_pair(RecordId(idx));
            assert_eq!(first, second);
            assert!((-1.0..=1.0).contains(&first.0));
            assert!((-1.0..=1.0).contains(&first.1));
        }
    }

    #[test]
    fn preview_cuts_long_text() {
        assert_eq!(preview("  short  ", 10), "short");
        assert_eq!(preview("abcdefghij", 5), "abcd…");
        assert_eq!(preview("ünïcödé text", 4).chars().count(), 4);
    }
}
