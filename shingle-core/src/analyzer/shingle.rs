//! Shingle extraction module.
//!
//! Cuts normalized text into overlapping windows of `n` characters and
//! collects them into sets. Windows are taken over Unicode scalar values,
//! not bytes, so "café" has the same number of shingles as "cafe".

use rustc_hash::FxHashSet;
use shingle_types::{NgramSize, Shingle};
use smallvec::SmallVec;

use crate::analyzer::normalizer::TextNormalizer;

/// Extracts shingles from already-normalized text using a sliding window.
///
/// For text shorter than `n` characters, no shingles are emitted.
/// For text of length L >= n, exactly L - n + 1 shingles are emitted,
/// duplicates included.
///
/// # Example
///
/// ```
/// use shingle_core::analyzer::shingle::extract_shingles;
/// use shingle_types::NgramSize;
///
/// let mut shingles = Vec::new();
/// extract_shingles("hello", NgramSize::Trigram, |s| shingles.push(s));
///
/// assert_eq!(shingles.len(), 3); // "hel", "ell", "llo"
/// ```
#[inline]
pub fn extract_shingles<F>(normalized: &str, n: NgramSize, mut callback: F)
where
    F: FnMut(Shingle),
{
    let n = n.get();
    let chars: SmallVec<[char; 64]> = normalized.chars().collect();
    if chars.len() < n {
        return;
    }

    for window in chars.windows(n) {
        callback(Shingle::from_chars(window));
    }
}

/// Counts shingle windows without allocating.
///
/// Returns 0 for text shorter than `n` characters.
#[inline]
pub fn count_shingles(normalized: &str, n: NgramSize) -> usize {
    (normalized.chars().count() + 1).saturating_sub(n.get())
}

/// Set of distinct shingles drawn from one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShingleSet {
    shingles: FxHashSet<Shingle>,
}

impl ShingleSet {
    /// Builds the set from raw text, normalizing it first.
    pub fn from_text(text: &str, n: NgramSize) -> Self {
        Self::with_normalizer(text, n, &TextNormalizer::default())
    }

    /// Builds the set from raw text with a specific normalizer.
    pub fn with_normalizer(text: &str, n: NgramSize, normalizer: &TextNormalizer) -> Self {
        Self::from_normalized(&normalizer.normalize(text), n)
    }

    /// Builds the set from text that is already normalized.
    pub fn from_normalized(normalized: &str, n: NgramSize) -> Self {
        let mut shingles =
            FxHashSet::with_capacity_and_hasher(count_shingles(normalized, n), Default::default());
        extract_shingles(normalized, n, |s| {
            shingles.insert(s);
        });
        Self { shingles }
    }

    /// Number of distinct shingles.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.shingles.len()
    }

    /// Returns `true` if the text was shorter than the shingle size.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shingles.is_empty()
    }

    #[inline(always)]
    pub fn contains(&self, shingle: &Shingle) -> bool {
        self.shingles.contains(shingle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shingle> {
        self.shingles.iter()
    }

    /// Size of the intersection with `other`.
    ///
    /// Probes the larger set with the members of the smaller one.
    pub fn intersection_len(&self, other: &ShingleSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().filter(|s| large.contains(s)).count()
    }

    /// Size of the union with `other`.
    pub fn union_len(&self, other: &ShingleSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

impl FromIterator<Shingle> for ShingleSet {
    fn from_iter<I: IntoIterator<Item = Shingle>>(iter: I) -> Self {
        Self {
            shingles: iter.into_iter().collect(),
        }
    }
}

/// Normalizes `text` and returns its set of `n`-character shingles.
#[inline]
pub fn shingle(text: &str, n: NgramSize) -> ShingleSet {
    ShingleSet::from_text(text, n)
}
