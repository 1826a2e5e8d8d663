//! Ranking and filtering logic.

use core::convert::Infallible;

use log::{debug, trace};
use shingle_types::{NgramSize, ScoredRecord, SearchConfig, SearchError, Threshold, MAX_RESULTS};
use smallvec::SmallVec;

use crate::search::record::Record;
use crate::search::scoring::PreparedQuery;
use crate::search::stats::SearchStats;

/// Linear-scan similarity search over caller-owned records.
///
/// Holds only its configuration: every call shingles the query afresh and
/// keeps no buffers, so one `Searcher` can be shared across threads.
///
/// Results borrow from the input slice. `None` means nothing met the
/// threshold; a returned vector is never empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    /// Creates a searcher with the given configuration.
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[inline(always)]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches the string field `field` of each record.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidFieldKind` for the first record without
    /// a string value under `field`.
    pub fn search<'a, T: Record>(
        &self,
        records: &'a [T],
        field: &str,
        query: &str,
    ) -> Result<Option<Vec<&'a T>>, SearchError> {
        self.search_with_stats(records, field, query)
            .map(|(results, _)| results)
    }

    /// Like [`Searcher::search`], also returning scan counters.
    pub fn search_with_stats<'a, T: Record>(
        &self,
        records: &'a [T],
        field: &str,
        query: &str,
    ) -> Result<(Option<Vec<&'a T>>, SearchStats), SearchError> {
        self.rank(records, query, |index, record: &'a T| {
            record
                .field(field)
                .ok_or_else(|| SearchError::InvalidFieldKind {
                    field: field.to_owned(),
                    index,
                })
        })
    }

    /// Searches the text selected by `key` in each record.
    pub fn search_by<'a, T, F>(&self, records: &'a [T], key: F, query: &str) -> Option<Vec<&'a T>>
    where
        F: Fn(&T) -> &str,
    {
        self.search_by_with_stats(records, key, query).0
    }

    /// Like [`Searcher::search_by`], also returning scan counters.
    pub fn search_by_with_stats<'a, T, F>(
        &self,
        records: &'a [T],
        key: F,
        query: &str,
    ) -> (Option<Vec<&'a T>>, SearchStats)
    where
        F: Fn(&T) -> &str,
    {
        match self.rank(records, query, |_, record: &'a T| {
            Ok::<_, Infallible>(key(record))
        }) {
            Ok(ranked) => ranked,
            Err(never) => match never {},
        }
    }

    fn rank<'a, T, F, E>(
        &self,
        records: &'a [T],
        query_text: &str,
        mut text_of: F,
    ) -> Result<(Option<Vec<&'a T>>, SearchStats), E>
    where
        F: FnMut(usize, &'a T) -> Result<&'a str, E>,
    {
        let query = PreparedQuery::new(query_text, &self.config);
        let threshold = self.config.threshold;
        let query_empty = query.shingles().is_empty();

        let mut stats = SearchStats::default();
        let mut retained: SmallVec<[ScoredRecord<&'a T>; 16]> = SmallVec::new();

        for (index, record) in records.iter().enumerate() {
            let candidate = query.candidate_set(text_of(index, record)?);
            stats.scanned += 1;

            if query_empty && candidate.is_empty() {
                stats.degenerate += 1;
            }

            let score = query.score_set(&candidate);
            if threshold.accepts(score) {
                trace!("record {index} retained (score {score:.3})");
                retained.push(ScoredRecord::new(index, score, record));
            }
        }

        stats.matched = retained.len();

        if retained.is_empty() {
            debug!("query {query_text:?} (n={}, t={threshold}): {stats}", self.config.ngram_size);
            return Ok((None, stats));
        }

        if retained.len() > MAX_RESULTS {
            retained.select_nth_unstable_by(MAX_RESULTS, |a, b| b.cmp(a));
            retained.truncate(MAX_RESULTS);
        }
        retained.sort_unstable_by(|a, b| b.cmp(a));

        let results: Vec<&'a T> = retained
            .into_iter()
            .map(ScoredRecord::into_record)
            .collect();
        stats.returned = results.len();

        debug!("query {query_text:?} (n={}, t={threshold}): {stats}", self.config.ngram_size);
        Ok((Some(results), stats))
    }
}

/// Searches the string field `field` of each record.
///
/// Returns at most [`MAX_RESULTS`] records, most similar first, or `None`
/// when no record scores at least `threshold`.
///
/// # Errors
///
/// Returns `SearchError::InvalidFieldKind` for the first record without a
/// string value under `field`.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use shingle_core::search::search;
/// use shingle_types::{NgramSize, Threshold};
///
/// let records = vec![
///     json!({ "name": "café" }),
///     json!({ "name": "cafe racer" }),
///     json!({ "name": "tea" }),
/// ];
///
/// let hits = search(&records, "name", "cafe", NgramSize::Trigram, Threshold::Moderate)
///     .unwrap()
///     .unwrap();
/// assert_eq!(hits, vec![&records[0], &records[1]]);
/// ```
pub fn search<'a, T: Record>(
    records: &'a [T],
    field: &str,
    query: &str,
    ngram_size: NgramSize,
    threshold: Threshold,
) -> Result<Option<Vec<&'a T>>, SearchError> {
    Searcher::new(SearchConfig::new(ngram_size, threshold)).search(records, field, query)
}

/// Searches the text selected by `key` in each record.
///
/// Same ranking as [`search`]; the field is chosen at compile time, so
/// there is no failure mode.
pub fn search_by<'a, T, F>(
    records: &'a [T],
    key: F,
    query: &str,
    ngram_size: NgramSize,
    threshold: Threshold,
) -> Option<Vec<&'a T>>
where
    F: Fn(&T) -> &str,
{
    Searcher::new(SearchConfig::new(ngram_size, threshold)).search_by(records, key, query)
}
