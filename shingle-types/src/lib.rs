//! Core types for the shingle similarity search.
//!
//! This crate holds the value types shared by the analysis pipeline and the
//! ranker. Keeping them separate means:
//!
//! - **Closed parameter domains**: n-gram sizes and thresholds are enums, so
//!   an out-of-range value cannot reach the scorer
//! - **Cheap shingles**: a shingle is one packed integer, not a `String`
//! - **Clean boundaries**: the core crate depends on types, never the reverse

#![warn(missing_docs)]

use core::cmp::Ordering;
use core::fmt;

use thiserror::Error;

/// Maximum number of records returned by a single search.
pub const MAX_RESULTS: usize = 5;

/// Length of the character windows a text is cut into.
///
/// The size is fixed for one search: the query and every candidate are
/// shingled with the same `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NgramSize {
    /// Two-character windows.
    Bigram = 2,
    /// Three-character windows.
    #[default]
    Trigram = 3,
    /// Four-character windows.
    Quadgram = 4,
}

impl NgramSize {
    /// Every supported size, smallest first.
    pub const ALL: [NgramSize; 3] = [NgramSize::Bigram, NgramSize::Trigram, NgramSize::Quadgram];

    /// Returns the window length in characters.
    #[inline(always)]
    #[must_use]
    pub const fn get(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for NgramSize {
    type Error = SearchError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(NgramSize::Bigram),
            3 => Ok(NgramSize::Trigram),
            4 => Ok(NgramSize::Quadgram),
            other => Err(SearchError::InvalidNgramSize(other)),
        }
    }
}

impl From<NgramSize> for usize {
    #[inline(always)]
    fn from(n: NgramSize) -> Self {
        n.get()
    }
}

impl fmt::Display for NgramSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Minimum Jaccard score a record needs to be returned (inclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Threshold {
    /// 0.05
    Minimal,
    /// 0.1
    Low,
    /// 0.2
    #[default]
    Moderate,
    /// 0.3
    High,
    /// 0.4
    Strict,
}

impl Threshold {
    /// Every supported threshold, lowest first.
    pub const ALL: [Threshold; 5] = [
        Threshold::Minimal,
        Threshold::Low,
        Threshold::Moderate,
        Threshold::High,
        Threshold::Strict,
    ];

    /// Returns the numeric cut-off.
    #[inline(always)]
    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            Threshold::Minimal => 0.05,
            Threshold::Low => 0.1,
            Threshold::Moderate => 0.2,
            Threshold::High => 0.3,
            Threshold::Strict => 0.4,
        }
    }

    /// Returns `true` if `score` meets this threshold.
    #[inline(always)]
    #[must_use]
    pub fn accepts(self, score: f32) -> bool {
        score >= self.value()
    }
}

impl TryFrom<f32> for Threshold {
    type Error = SearchError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Threshold::ALL
            .into_iter()
            .find(|t| t.value() == value)
            .ok_or(SearchError::InvalidThreshold(value))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A shingle of up to four characters packed into a single integer.
///
/// Each char takes 21 bits (enough for any Unicode scalar value), the
/// first char in the lowest bits. The length sits in bits 84..87.
/// This representation:
/// - Hashes as one integer, no allocation per shingle
/// - Compares in a single instruction
/// - Keeps shingles of different lengths distinct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Shingle(u128);

const CHAR_BITS: u32 = 21;
const CHAR_MASK: u128 = (1 << CHAR_BITS) - 1;
const LEN_SHIFT: u32 = CHAR_BITS * Shingle::MAX_CHARS as u32;

impl Shingle {
    /// Maximum number of characters a shingle can hold.
    pub const MAX_CHARS: usize = 4;

    /// Packs a window of characters.
    ///
    /// Characters past [`Shingle::MAX_CHARS`] are ignored.
    #[inline(always)]
    #[must_use]
    pub fn from_chars(chars: &[char]) -> Self {
        let chars = &chars[..chars.len().min(Self::MAX_CHARS)];
        let mut packed = (chars.len() as u128) << LEN_SHIFT;
        for (i, &c) in chars.iter().enumerate() {
            packed |= (c as u128) << (CHAR_BITS * i as u32);
        }
        Self(packed)
    }

    /// Packs a string of one to four characters.
    ///
    /// Returns `None` for empty strings or strings longer than four chars.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        let mut buf = ['\0'; Self::MAX_CHARS];
        let mut len = 0;
        for c in s.chars() {
            if len == Self::MAX_CHARS {
                return None;
            }
            buf[len] = c;
            len += 1;
        }
        (len > 0).then(|| Self::from_chars(&buf[..len]))
    }

    /// Returns the number of characters in this shingle.
    #[inline(always)]
    #[must_use]
    pub const fn len(self) -> usize {
        ((self.0 >> LEN_SHIFT) & 0x7) as usize
    }

    /// Returns `true` for the zero-length shingle.
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Iterates over the characters, first to last.
    pub fn chars(self) -> impl Iterator<Item = char> {
        (0..self.len()).filter_map(move |i| {
            char::from_u32(((self.0 >> (CHAR_BITS * i as u32)) & CHAR_MASK) as u32)
        })
    }

    /// Returns the underlying packed value.
    #[inline(always)]
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        self.0
    }
}

impl fmt::Display for Shingle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// A record paired with its similarity score while ranking.
///
/// Scores are an annotation of the ranking pass only: results hand back
/// the bare `record`. Ordering is by score (higher = greater), then by
/// input position (earlier = greater), so sorting descending keeps ties in
/// input order.
#[derive(Debug, Clone, Copy)]
pub struct ScoredRecord<R> {
    /// Position of the record in the input slice.
    pub index: usize,
    /// Jaccard score in `[0, 1]`.
    pub score: f32,
    /// The record itself (typically a borrow).
    pub record: R,
}

impl<R> ScoredRecord<R> {
    /// Creates a new scored record.
    #[inline(always)]
    pub const fn new(index: usize, score: f32, record: R) -> Self {
        Self {
            index,
            score,
            record,
        }
    }

    /// Drops the score and returns the record.
    #[inline(always)]
    pub fn into_record(self) -> R {
        self.record
    }
}

impl<R> PartialEq for ScoredRecord<R> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.score == other.score
    }
}

impl<R> Eq for ScoredRecord<R> {}

impl<R> PartialOrd for ScoredRecord<R> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R> Ord for ScoredRecord<R> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.score.total_cmp(&other.score) {
            Ordering::Equal => other.index.cmp(&self.index),
            ord => ord,
        }
    }
}

impl<R> fmt::Display for ScoredRecord<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record={} score={:.3}", self.index, self.score)
    }
}

/// Search configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchConfig {
    /// Shingle length used for the query and every candidate.
    pub ngram_size: NgramSize,
    /// Minimum score a record needs to be returned.
    pub threshold: Threshold,
    /// Fold accented Latin vowels to their plain form before shingling.
    pub fold_accents: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ngram_size: NgramSize::Trigram,
            threshold: Threshold::Moderate,
            fold_accents: true,
        }
    }
}

impl SearchConfig {
    /// Creates a configuration with the given size and threshold.
    pub const fn new(ngram_size: NgramSize, threshold: Threshold) -> Self {
        Self {
            ngram_size,
            threshold,
            fold_accents: true,
        }
    }

    /// Long shingles and the highest threshold: only close matches.
    pub const fn strict() -> Self {
        Self::new(NgramSize::Quadgram, Threshold::Strict)
    }

    /// Short shingles and the lowest threshold: tolerant of typos.
    pub const fn lenient() -> Self {
        Self::new(NgramSize::Bigram, Threshold::Minimal)
    }
}

/// Errors raised by a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// A record has no string value under the searched field.
    #[error("record {index}: field `{field}` is missing or not a string")]
    InvalidFieldKind {
        /// The field that was searched.
        field: String,
        /// Position of the offending record in the input.
        index: usize,
    },
    /// N-gram size outside `{2, 3, 4}`.
    #[error("unsupported n-gram size {0} (expected 2, 3 or 4)")]
    InvalidNgramSize(usize),
    /// Threshold outside `{0.05, 0.1, 0.2, 0.3, 0.4}`.
    #[error("unsupported threshold {0} (expected 0.05, 0.1, 0.2, 0.3 or 0.4)")]
    InvalidThreshold(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scored_record_ordering() {
        let r1 = ScoredRecord::new(1, 0.9, ());
        let r2 = ScoredRecord::new(2, 0.5, ());
        let r3 = ScoredRecord::new(3, 0.9, ()); // Same score as r1

        assert!(r1 > r2);
        assert_ne!(r1, r3);

        // Earlier input position wins a tie
        assert_eq!(r1.cmp(&r3), Ordering::Greater);
    }

    #[test]
    fn scored_record_sorts_descending_in_input_order() {
        let mut v = vec![
            ScoredRecord::new(0, 0.5, "a"),
            ScoredRecord::new(1, 1.0, "b"),
            ScoredRecord::new(2, 0.5, "c"),
        ];
        v.sort_unstable_by(|a, b| b.cmp(a));
        let order: Vec<_> = v.into_iter().map(ScoredRecord::into_record).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn shingle_from_chars() {
        let s = Shingle::from_chars(&['a', 'b', 'c']);
        assert_eq!(s.len(), 3);
        assert_eq!(s.chars().collect::<String>(), "abc");
        assert_eq!(s.to_string(), "abc");
    }

    #[test]
    fn shingle_non_ascii() {
        let s = Shingle::new("ü€😀").unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.to_string(), "ü€😀");
    }

    #[test]
    fn shingle_lengths_are_distinct() {
        // "a\0" and "a" would collide without the length bits
        let a = Shingle::from_chars(&['a']);
        let a_nul = Shingle::from_chars(&['a', '\0']);
        assert_ne!(a, a_nul);
    }

    #[test]
    fn shingle_new_rejects_bad_lengths() {
        assert!(Shingle::new("").is_none());
        assert!(Shingle::new("abcde").is_none());
        assert_eq!(Shingle::new("abcd").map(Shingle::len), Some(4));
    }

    #[test]
    fn shingle_from_chars_truncates() {
        let s = Shingle::from_chars(&['a', 'b', 'c', 'd', 'e']);
        assert_eq!(s.to_string(), "abcd");
    }

    #[test]
    fn ngram_size_conversions() {
        assert_eq!(NgramSize::try_from(2), Ok(NgramSize::Bigram));
        assert_eq!(NgramSize::try_from(4), Ok(NgramSize::Quadgram));
        assert_eq!(
            NgramSize::try_from(5),
            Err(SearchError::InvalidNgramSize(5))
        );
        assert_eq!(usize::from(NgramSize::Trigram), 3);
    }

    #[test]
    fn threshold_conversions() {
        assert_eq!(Threshold::try_from(0.05), Ok(Threshold::Minimal));
        assert_eq!(Threshold::try_from(0.4), Ok(Threshold::Strict));
        assert_eq!(
            Threshold::try_from(0.25),
            Err(SearchError::InvalidThreshold(0.25))
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(Threshold::Low.accepts(0.1));
        assert!(!Threshold::Low.accepts(0.099));
        assert!(!Threshold::Minimal.accepts(f32::NAN));
    }

    #[test]
    fn thresholds_ascend() {
        for w in Threshold::ALL.windows(2) {
            assert!(w[0].value() < w[1].value());
        }
    }

    #[test]
    fn config_presets() {
        let d = SearchConfig::default();
        assert_eq!(d.ngram_size, NgramSize::Trigram);
        assert_eq!(d.threshold, Threshold::Moderate);
        assert!(d.fold_accents);

        assert_eq!(SearchConfig::strict().threshold, Threshold::Strict);
        assert_eq!(SearchConfig::lenient().ngram_size, NgramSize::Bigram);
    }

    #[test]
    fn error_messages() {
        let e = SearchError::InvalidFieldKind {
            field: "name".into(),
            index: 3,
        };
        assert_eq!(
            e.to_string(),
            "record 3: field `name` is missing or not a string"
        );
        assert!(SearchError::InvalidNgramSize(7).to_string().contains('7'));
    }
}
