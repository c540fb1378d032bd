use std::collections::HashSet;

use ragpick_core::traits::Retriever;
use ragpick_core::types::{top_k, Document, ScoredResult};
use ragpick_embed::tokenize;

struct IndexedDocument {
    document: Document,
    tokens: HashSet<String>,
}

pub struct KeywordSearchEngine {
    documents: Vec<IndexedDocument>,
}

impl KeywordSearchEngine {
    pub fn from_documents(documents: &[Document]) -> Self {
        let documents = documents
            .iter()
            .map(|d| IndexedDocument { tokens: tokenize(&d.text).into_iter().collect(), document: d.clone() })
            .collect();
        Self { documents }
    }

    /// Raw hit count per document, in corpus order.
    ///
    /// Every query token counts once per occurrence in the query when the
    /// document contains it anywhere, so repeated query words weigh more.
    pub fn raw_counts(&self, query: &str) -> Vec<usize> {
        let q_tokens = tokenize(query);
        self.documents
            .iter()
            .map(|d| q_tokens.iter().filter(|t| d.tokens.contains(t.as_str())).count())
            .collect()
    }

    /// Counts divided by the corpus-wide maximum (at least 1); top `k`.
    pub fn search(&self, query: &str, k: usize) -> Vec<ScoredResult> {
        let counts = self.raw_counts(query);
        let max = counts.iter().copied().max().unwrap_or(0).max(1);
        tracing::trace!(query, max, "keyword raw counts");
        let scored = self
            .documents
            .iter()
            .zip(counts)
            .map(|(d, c)| ScoredResult::local(&d.document, c as f64 / max as f64))
            .collect();
        top_k(scored, k)
    }
}

impl Retriever for KeywordSearchEngine {
    fn search(&self, query: &str, k: usize) -> Vec<ScoredResult> { Self::search(self, query, k) }
}
