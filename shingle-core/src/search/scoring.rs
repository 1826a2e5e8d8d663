//! Scoring functions.

use shingle_types::{NgramSize, SearchConfig};

use crate::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
use crate::analyzer::shingle::ShingleSet;

/// Jaccard coefficient `|a ∩ b| / |a ∪ b|`.
///
/// Two empty sets have no union; their score is defined as `0.0` so the
/// result is never NaN and always compares cleanly against a threshold.
#[inline]
pub fn jaccard(a: &ShingleSet, b: &ShingleSet) -> f32 {
    let intersection = a.intersection_len(b);
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

/// A query shingled once and scored against many candidates.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    shingles: ShingleSet,
    ngram_size: NgramSize,
    normalizer: TextNormalizer,
}

impl PreparedQuery {
    pub fn new(query: &str, config: &SearchConfig) -> Self {
        let normalizer = TextNormalizer::new(NormalizerConfig {
            fold_accents: config.fold_accents,
        });
        Self {
            shingles: ShingleSet::with_normalizer(query, config.ngram_size, &normalizer),
            ngram_size: config.ngram_size,
            normalizer,
        }
    }

    /// The query's own shingles.
    #[inline(always)]
    pub fn shingles(&self) -> &ShingleSet {
        &self.shingles
    }

    /// Shingles `text` the same way the query was shingled.
    #[inline]
    pub fn candidate_set(&self, text: &str) -> ShingleSet {
        ShingleSet::with_normalizer(text, self.ngram_size, &self.normalizer)
    }

    /// Scores a candidate set against the query.
    #[inline(always)]
    pub fn score_set(&self, candidate: &ShingleSet) -> f32 {
        jaccard(&self.shingles, candidate)
    }

    /// Scores raw candidate text against the query.
    #[inline]
    pub fn score(&self, text: &str) -> f32 {
        self.score_set(&self.candidate_set(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::shingle::shingle;

    #[test]
    fn identical_sets_score_one() {
        for n in NgramSize::ALL {
            for text in ["hello", "Café Racer", "abcd", "zzzzzz"] {
                let a = shingle(text, n);
                assert_eq!(jaccard(&a, &a), 1.0, "{text:?} with n={n}");
            }
        }
    }

    #[test]
    fn disjoint_sets_score_zero() {
        let a = shingle("abc", NgramSize::Bigram);
        let b = shingle("xyz", NgramSize::Bigram);
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn partial_overlap() {
        let a = shingle("cafe", NgramSize::Trigram); // caf afe
        let b = shingle("cafe racer", NgramSize::Trigram); // 7 shingles
        assert_eq!(jaccard(&a, &b), 2.0 / 7.0);
    }

    #[test]
    fn symmetric() {
        let texts = ["night", "nacht", "", "a", "banana", "bandana"];
        for n in NgramSize::ALL {
            for x in texts {
                for y in texts {
                    let a = shingle(x, n);
                    let b = shingle(y, n);
                    assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
                }
            }
        }
    }

    #[test]
    fn bounded() {
        let texts = ["night", "nacht", "nightingale", "thing", "gin"];
        for x in texts {
            for y in texts {
                let s = jaccard(
                    &shingle(x, NgramSize::Bigram),
                    &shingle(y, NgramSize::Bigram),
                );
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn both_empty_scores_zero() {
        let empty = ShingleSet::default();
        let s = jaccard(&empty, &empty);
        assert_eq!(s, 0.0);
        assert!(!s.is_nan());
    }

    #[test]
    fn one_empty_scores_zero() {
        let a = shingle("hello", NgramSize::Bigram);
        assert_eq!(jaccard(&a, &ShingleSet::default()), 0.0);
    }

    #[test]
    fn prepared_query_scores_like_jaccard() {
        let config = SearchConfig::default();
        let q = PreparedQuery::new("Café", &config);
        assert_eq!(q.shingles().len(), 2);
        assert_eq!(q.score("cafe"), 1.0);
        assert_eq!(q.score("CAFE RACER"), 2.0 / 7.0);
        assert_eq!(q.score("tea"), 0.0);
    }

    #[test]
    fn prepared_query_respects_folding() {
        let config = SearchConfig {
            fold_accents: false,
            ..SearchConfig::default()
        };
        let q = PreparedQuery::new("café", &config);
        // "afé" vs "afe"
        assert_eq!(q.score("cafe"), 1.0 / 3.0);
    }
}
