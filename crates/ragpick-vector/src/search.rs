use serde::{Deserialize, Serialize};

use ragpick_core::traits::{Embedder, Retriever};
use ragpick_core::types::{top_k, Document, ScoredResult};
use ragpick_embed::TermFrequencyEmbedder;

use crate::similarity::cosine_similarity;

/// A document together with its vector, computed once at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEmbedding {
    pub document: Document,
    pub vector: Vec<f32>,
}

pub struct SemanticSearchEngine {
    embedder: Box<dyn Embedder>,
    documents: Vec<DocumentEmbedding>,
}

impl SemanticSearchEngine {
    /// Build the vocabulary from `documents` and embed each of them.
    pub fn from_documents(documents: &[Document]) -> Self {
        Self::with_embedder(documents, Box::new(TermFrequencyEmbedder::from_documents(documents)))
    }

    pub fn with_embedder(documents: &[Document], embedder: Box<dyn Embedder>) -> Self {
        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let vectors = embedder.embed_batch(&texts);
        let documents = documents
            .iter()
            .cloned()
            .zip(vectors)
            .map(|(document, vector)| DocumentEmbedding { document, vector })
            .collect::<Vec<_>>();
        tracing::debug!(documents = documents.len(), dim = embedder.dim(), "precomputed document vectors");
        Self { embedder, documents }
    }

    pub fn documents(&self) -> &[DocumentEmbedding] { &self.documents }

    pub fn dim(&self) -> usize { self.embedder.dim() }

    /// Score every document against `query`; top `k` by cosine, ties in corpus order.
    pub fn search(&self, query: &str, k: usize) -> Vec<ScoredResult> {
        let q_vec = self.embedder.embed(query);
        let scored = self
            .documents
            .iter()
            .map(|d| ScoredResult::local(&d.document, cosine_similarity(&q_vec, &d.vector)))
            .collect();
        top_k(scored, k)
    }
}

impl Retriever for SemanticSearchEngine {
    fn search(&self, query: &str, k: usize) -> Vec<ScoredResult> { Self::search(self, query, k) }
}
