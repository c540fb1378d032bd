//! ragpick-vector
//!
//! Semantic ranking: every document is embedded once when the engine is
//! built, queries are embedded per call and scored by cosine similarity.

pub mod search;
pub mod similarity;

pub use search::{DocumentEmbedding, SemanticSearchEngine};
pub use similarity::cosine_similarity;
