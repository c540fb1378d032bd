//! Domain types shared by the retrieval engines, the planner and the orchestrator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub type DocId = String;

/// A corpus entry. Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<DocId>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// Indicates which retrieval source produced a result.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Local,
    Pinecone,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Local => "local",
            Source::Pinecone => "pinecone",
        }
    }
}

/// The minimal surface returned by both rankers and the fallback source.
///
/// `score` lies in `[0, 1]`, higher is better. `source` labels the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: DocId,
    pub text: String,
    pub score: f64,
    pub source: Source,
}

impl ScoredResult {
    pub fn local(doc: &Document, score: f64) -> Self {
        Self { id: doc.id.clone(), text: doc.text.clone(), score, source: Source::Local }
    }
}

/// Retrieval strategy chosen by the planner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    SemanticSearch,
    KeywordSearch,
    Hybrid,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::SemanticSearch => "semantic_search",
            Strategy::KeywordSearch => "keyword_search",
            Strategy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "semantic_search" | "semantic" => Ok(Strategy::SemanticSearch),
            "keyword_search" | "keyword" => Ok(Strategy::KeywordSearch),
            "hybrid" => Ok(Strategy::Hybrid),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

/// Which planner rule produced a reasoning line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlannerRule {
    LongQuery,
    ExactKeywordHit,
    ScoreSummary,
    Decision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonRecord {
    pub rule: PlannerRule,
    pub message: String,
}

/// Planner output. Reasoning stays structured until it reaches a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDecision {
    pub decision: Strategy,
    pub reasoning: Vec<ReasonRecord>,
}

impl PlanDecision {
    /// Reasoning lines joined for display.
    pub fn reasoning_text(&self) -> String {
        self.reasoning.iter().map(|r| r.message.as_str()).collect::<Vec<_>>().join("; ")
    }

    pub fn has_rule(&self, rule: PlannerRule) -> bool {
        self.reasoning.iter().any(|r| r.rule == rule)
    }
}

/// Per-call options. `mode` is accepted but reserved; it does not override the planner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    pub mode: Option<Strategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub text: String,
    pub score: f64,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: DocId,
    pub text: String,
    pub score: f64,
}

impl From<&ScoredResult> for ScoreEntry {
    fn from(r: &ScoredResult) -> Self {
        Self { id: r.id.clone(), text: r.text.clone(), score: round_score(r.score) }
    }
}

/// What happened to the low-confidence path for one query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackOutcome {
    NotNeeded,
    Disabled,
    KeptLocal,
    Replaced,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub reasoning: String,
    pub semantic_top_k_scores: Vec<ScoreEntry>,
    pub keyword_top_k_scores: Vec<ScoreEntry>,
    pub used_fallback_tool: bool,
    pub fallback: FallbackOutcome,
    pub latency_ms: u64,
}

/// Everything a caller gets back for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub planner_decision: Strategy,
    pub used_fallback_tool: bool,
    pub best_match: BestMatch,
    pub trace: Trace,
}

/// Sort by non-increasing score and keep the first `k`.
///
/// The sort is stable, so equal scores keep their corpus order.
pub fn top_k(mut results: Vec<ScoredResult>, k: usize) -> Vec<ScoredResult> {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(k);
    results
}

/// Round to 4 decimals for presentation.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}
