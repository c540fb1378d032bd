//! ragpick-text
//!
//! Exact keyword matching: literal token overlap between query and document,
//! normalized by the best raw count observed for the query.

pub mod search;

pub use search::KeywordSearchEngine;
