//! Similarity search over caller-owned records.
//!
//! Every query is a single linear pass:
//! - The query is normalized and shingled once
//! - Each record's field is normalized, shingled and scored with Jaccard
//! - Records at or above the threshold are kept, best first, at most
//!   [`MAX_RESULTS`](shingle_types::MAX_RESULTS) of them
//!
//! Threading:
//! - [`Searcher`] is `Copy + Send + Sync`. It carries configuration only,
//!   so concurrent searches need no synchronization.

mod ranker;
mod record;
mod scoring;
mod stats;

pub use ranker::{search, search_by, Searcher};
pub use record::Record;
pub use scoring::{jaccard, PreparedQuery};
pub use stats::SearchStats;
