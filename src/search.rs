use std::collections::HashSet;
use std::sync::Arc;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::record::Record;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Record indices whose tweet text fuzzy-matches `query`.
pub fn matching_records(records: &[Record], query: &str) -> HashSet<usize> {
    let matcher = SkimMatcherV2::default();
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            fuzzy_match_score(&matcher, &record.raw_tweet, query).map(|_| index)
        })
        .collect()
}

struct SearchMatchCache {
    query: String,
    dataset: Arc<[Record]>,
    matches: Arc<HashSet<usize>>,
}

/// Tweet search with the last result cached per query and dataset.
#[derive(Default)]
pub struct TweetSearch {
    pub query: String,
    cache: Option<SearchMatchCache>,
}

impl TweetSearch {
    /// Matches for the current query, or `None` while the query is blank.
    pub fn matches(&mut self, dataset: &Arc<[Record]>) -> Option<Arc<HashSet<usize>>> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.cache
            && Arc::ptr_eq(&cached.dataset, dataset)
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matches = Arc::new(matching_records(dataset, query));
        self.cache = Some(SearchMatchCache {
            query: query.to_owned(),
            dataset: Arc::clone(dataset),
            matches: Arc::clone(&matches),
        });
        Some(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Arc<[Record]> {
        vec![
            Record::new(1, "March", 0.4, 0.2, "Loving the early spring sunshine"),
            Record::new(2, "April", -0.6, 0.9, "Stuck in traffic again"),
            Record::new(3, "May", 0.1, 0.3, "SPRING cleaning done"),
        ]
        .into()
    }

    #[test]
    fn matches_are_case_insensitive() {
        let matches = matching_records(&dataset(), "spring");

        assert_eq!(matches, HashSet::from([0, 2]));
    }

    #[test]
    fn blank_query_matches_nothing() {
        let mut search = TweetSearch::default();
        search.query = "   ".to_owned();

        assert!(search.matches(&dataset()).is_none());
    }

    #[test]
    fn results_are_reused_for_same_query_and_dataset() {
        let data = dataset();
        let mut search = TweetSearch {
            query: "traffic".to_owned(),
            ..TweetSearch::default()
        };

        let first = search.matches(&data).unwrap();
        let second = search.matches(&data).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, HashSet::from([1]));

        let other = dataset();
        let third = search.matches(&other).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
    }
}
