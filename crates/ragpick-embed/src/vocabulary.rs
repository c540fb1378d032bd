use std::collections::HashMap;

use ragpick_core::types::Document;

use crate::tokenize::tokenize;

/// Token → vector slot, assigned in first-seen order across the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Scan every document in order; each new token takes the next free slot.
    pub fn build(documents: &[Document]) -> Self {
        let mut index = HashMap::new();
        for doc in documents {
            for token in tokenize(&doc.text) {
                let next = index.len();
                index.entry(token).or_insert(next);
            }
        }
        Self { index }
    }

    pub fn get(&self, token: &str) -> Option<usize> { self.index.get(token).copied() }

    pub fn contains(&self, token: &str) -> bool { self.index.contains_key(token) }

    pub fn len(&self) -> usize { self.index.len() }

    pub fn is_empty(&self) -> bool { self.index.is_empty() }

    /// Term-frequency vector of `text`. Out-of-vocabulary tokens are ignored.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0f32; self.len()];
        for token in tokenize(text) {
            if let Some(i) = self.get(&token) { vec[i] += 1.0; }
        }
        vec
    }
}
