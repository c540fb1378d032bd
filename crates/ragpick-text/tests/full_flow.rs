use proptest::prelude::*;
use ragpick_core::corpus::builtin_documents;
use ragpick_core::types::{Document, Source};
use ragpick_text::KeywordSearchEngine;

fn engine() -> KeywordSearchEngine {
    KeywordSearchEngine::from_documents(&builtin_documents())
}

#[test]
fn exact_hits_normalize_to_one() {
    let results = engine().search("align center elements", 3);
    assert_eq!(results[0].id, "d1");
    assert_eq!(results[0].score, 1.0);
    assert_eq!(results[1].score, 0.0);
    assert_eq!(results[0].source, Source::Local);
}

#[test]
fn scores_are_relative_to_the_best_document() {
    let results = engine().search("install extension with trial code TRIAL-100", 3);
    assert_eq!(results[0].id, "d2");
    assert_eq!(results[0].score, 1.0);
    assert_eq!(results[1].id, "d3");
    assert!((results[1].score - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn repeated_query_tokens_count_per_occurrence() {
    let engine = KeywordSearchEngine::from_documents(&[
        Document::new("a", "alpha"),
        Document::new("b", "beta gamma"),
    ]);
    assert_eq!(engine.raw_counts("alpha alpha beta"), vec![2, 1]);
    let results = engine.search("alpha alpha beta", 2);
    assert_eq!(results[0].id, "a");
    assert_eq!(results[1].score, 0.5);
}

#[test]
fn no_hits_yield_all_zero_scores_without_division_by_zero() {
    let results = engine().search("xyz unrelated gibberish term", 6);
    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|r| r.score == 0.0));
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["d1", "d2", "d3", "d4", "d5", "d6"]);
}

#[test]
fn ties_keep_corpus_order() {
    let results = engine().search("semantic keyword search", 2);
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["d3", "d4"]);
    assert!(results.iter().all(|r| r.score == 1.0));
}

#[test]
fn empty_query_and_empty_corpus() {
    assert!(engine().search("", 3).iter().all(|r| r.score == 0.0));
    assert!(KeywordSearchEngine::from_documents(&[]).search("alpha", 3).is_empty());
}

proptest! {
    #[test]
    fn results_are_sorted_bounded_and_in_unit_range(query in "[a-zA-Z0-9 ]{0,50}", k in 0usize..10) {
        let results = engine().search(&query, k);
        prop_assert!(results.len() <= k);
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for r in &results {
            prop_assert!((0.0..=1.0).contains(&r.score));
        }
    }
}
