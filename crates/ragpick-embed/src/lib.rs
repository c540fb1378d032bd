//! ragpick-embed
//!
//! Tokenizer plus a bag-of-words embedder: the vocabulary is frozen from the
//! corpus at construction and every text maps to a term-frequency vector over it.

pub mod tokenize;
pub mod vocabulary;

pub use tokenize::tokenize;
pub use vocabulary::Vocabulary;

use ragpick_core::traits::Embedder;
use ragpick_core::types::Document;

pub struct TermFrequencyEmbedder { vocabulary: Vocabulary }

impl TermFrequencyEmbedder {
    pub fn from_documents(documents: &[Document]) -> Self {
        let vocabulary = Vocabulary::build(documents);
        tracing::info!(documents = documents.len(), vocabulary = vocabulary.len(), "built vocabulary");
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }
}

impl Embedder for TermFrequencyEmbedder {
    fn dim(&self) -> usize { self.vocabulary.len() }
    fn embed(&self, text: &str) -> Vec<f32> { self.vocabulary.vectorize(text) }
}
