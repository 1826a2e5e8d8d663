//! Fuzzy record search with character n-gram shingles.
//!
//! Given a query and the text field to compare in each record, returns the
//! records whose field is most similar to the query. Similarity is the
//! Jaccard coefficient of the two texts' shingle sets after normalization.
//!
//! ```
//! use shingle_core::search_by;
//! use shingle_types::{NgramSize, Threshold};
//!
//! struct Dish {
//!     name: &'static str,
//! }
//!
//! let menu = [Dish { name: "Café au lait" }, Dish { name: "Green tea" }];
//! let hits = search_by(&menu, |d: &Dish| d.name, "cafe", NgramSize::Trigram, Threshold::Low);
//!
//! assert_eq!(hits.map(|h| h[0].name), Some("Café au lait"));
//! ```

pub mod analyzer;
pub mod search;

pub use analyzer::{normalize, shingle, ShingleSet};
pub use search::{jaccard, search, search_by, PreparedQuery, Record, SearchStats, Searcher};
pub use shingle_types::{
    NgramSize, ScoredRecord, SearchConfig, SearchError, Shingle, Threshold, MAX_RESULTS,
};
