use async_trait::async_trait;

use crate::error::Result;
use crate::types::ScoredResult;

/// Maps text onto a fixed-length vector space.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> Vec<f32>;
    fn embed_batch(&self, texts: &[String]) -> Vec<Vec<f32>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// A ranker over a corpus that was fully prepared at construction time.
///
/// Implementations must be pure with respect to the corpus: the same query
/// always yields the same ranking, sorted by non-increasing score, at most
/// `k` entries, ties kept in corpus order.
pub trait Retriever: Send + Sync {
    fn search(&self, query: &str, k: usize) -> Vec<ScoredResult>;
}

/// Secondary, higher-latency source consulted when local confidence is low.
///
/// Any failure is reported as `Error::FallbackUnavailable`; callers treat it
/// as recoverable.
#[async_trait]
pub trait FallbackSource: Send + Sync {
    fn name(&self) -> &str;
    async fn retrieve(&self, query: &str) -> Result<ScoredResult>;
}
