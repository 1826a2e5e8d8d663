//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Case folds, folds accents and strips punctuation
//! - **Shingle**: Cuts normalized text into n-character windows

pub mod normalizer;
pub mod shingle;

pub use normalizer::{normalize, NormalizerConfig, TextNormalizer};
pub use shingle::{shingle, ShingleSet};
