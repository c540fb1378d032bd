use std::time::{Duration, Instant};

use ragpick_core::config::{AgentSettings, Config, Settings};
use ragpick_core::corpus::CorpusLoader;
use ragpick_core::error::{Error, Result};
use ragpick_core::traits::{FallbackSource, Retriever};
use ragpick_core::types::{
    round_score, AgentResult, BestMatch, Document, FallbackOutcome, RunOptions, ScoreEntry, ScoredResult, Source,
    Strategy, Trace,
};
use ragpick_text::KeywordSearchEngine;
use ragpick_vector::SemanticSearchEngine;

use crate::fallback::StubFallback;
use crate::planner::Planner;

/// Query orchestrator.
///
/// Holds the rankers (built once from the corpus, read-only afterwards), the
/// planner and the optional fallback source. `run` never fails: a missing or
/// broken fallback degrades to the local candidate.
pub struct Agent<S = SemanticSearchEngine, K = KeywordSearchEngine>
where
    S: Retriever,
    K: Retriever,
{
    semantic: S,
    keyword: K,
    planner: Planner,
    fallback: Option<Box<dyn FallbackSource>>,
    settings: AgentSettings,
    fallback_timeout: Duration,
}

impl Agent {
    /// Build both rankers over `documents` and wire the stub fallback if enabled.
    pub fn new(documents: &[Document], settings: &Settings) -> Self {
        let semantic = SemanticSearchEngine::from_documents(documents);
        let keyword = KeywordSearchEngine::from_documents(documents);
        tracing::info!(documents = documents.len(), vocabulary = semantic.dim(), "agent index ready");
        let agent = Agent::from_parts(semantic, keyword, settings);
        if settings.fallback.enabled {
            agent.with_fallback(Box::new(StubFallback::new(&settings.fallback)))
        } else {
            agent
        }
    }

    /// Resolve settings and corpus from `config`; relative corpus paths are taken from the working directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = config.settings()?;
        let documents = CorpusLoader::new().load_configured(&settings.corpus)?;
        Ok(Self::new(&documents, &settings))
    }
}

impl<S, K> Agent<S, K>
where
    S: Retriever,
    K: Retriever,
{
    pub fn from_parts(semantic: S, keyword: K, settings: &Settings) -> Self {
        Self {
            semantic,
            keyword,
            planner: Planner::new(settings.planner.clone()),
            fallback: None,
            settings: settings.agent.clone(),
            fallback_timeout: Duration::from_millis(settings.fallback.timeout_ms),
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn FallbackSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_fallback_timeout(mut self, timeout: Duration) -> Self {
        self.fallback_timeout = timeout;
        self
    }

    pub async fn run(&self, query: &str, options: &RunOptions) -> AgentResult {
        let start = Instant::now();
        if let Some(mode) = options.mode {
            tracing::debug!(%mode, "mode override is reserved; planner decides");
        }

        // Independent, read-only passes over the prepared corpus.
        let k = self.settings.top_k;
        let semantic_top = self.semantic.search(query, k);
        let keyword_top = self.keyword.search(query, k);

        let plan = self.planner.decide(query, &semantic_top, &keyword_top);
        let mut best = select_candidate(plan.decision, &semantic_top, &keyword_top);

        let (used_fallback_tool, outcome) = if best.score >= self.settings.confidence_threshold {
            (false, FallbackOutcome::NotNeeded)
        } else if let Some(fallback) = &self.fallback {
            let outcome = match self.consult(fallback.as_ref(), query).await {
                Ok(remote) if remote.score > best.score => {
                    best = BestMatch { text: remote.text, score: remote.score, source: Source::Pinecone };
                    FallbackOutcome::Replaced
                }
                Ok(_) => FallbackOutcome::KeptLocal,
                Err(e) => {
                    tracing::warn!(source = fallback.name(), error = %e, "fallback unavailable; keeping local candidate");
                    FallbackOutcome::Unavailable
                }
            };
            (true, outcome)
        } else {
            (false, FallbackOutcome::Disabled)
        };

        let trace = Trace {
            reasoning: plan.reasoning_text(),
            semantic_top_k_scores: semantic_top.iter().map(ScoreEntry::from).collect(),
            keyword_top_k_scores: keyword_top.iter().map(ScoreEntry::from).collect(),
            used_fallback_tool,
            fallback: outcome,
            latency_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        tracing::debug!(decision = %plan.decision, score = best.score, fallback = ?outcome, latency_ms = trace.latency_ms, "query answered");

        AgentResult {
            planner_decision: plan.decision,
            used_fallback_tool,
            best_match: BestMatch { score: round_score(best.score), ..best },
            trace,
        }
    }

    async fn consult(&self, fallback: &dyn FallbackSource, query: &str) -> Result<ScoredResult> {
        match tokio::time::timeout(self.fallback_timeout, fallback.retrieve(query)).await {
            Ok(Ok(mut remote)) => {
                remote.score = remote.score.clamp(0.0, 1.0);
                Ok(remote)
            }
            Ok(Err(Error::FallbackUnavailable(msg))) => Err(Error::FallbackUnavailable(msg)),
            Ok(Err(other)) => Err(Error::FallbackUnavailable(other.to_string())),
            Err(_) => Err(Error::FallbackUnavailable(format!("timed out after {} ms", self.fallback_timeout.as_millis()))),
        }
    }
}

/// Top-1 of the chosen ranker. Hybrid takes the higher of the two; ties go to semantic.
fn select_candidate(decision: Strategy, semantic: &[ScoredResult], keyword: &[ScoredResult]) -> BestMatch {
    let sem = semantic.first();
    let key = keyword.first();
    let chosen = match decision {
        Strategy::SemanticSearch => sem,
        Strategy::KeywordSearch => key,
        Strategy::Hybrid => {
            let (s, k) = (sem.map_or(0.0, |r| r.score), key.map_or(0.0, |r| r.score));
            if s >= k { sem.or(key) } else { key.or(sem) }
        }
    };
    chosen.map_or_else(
        || BestMatch { text: String::new(), score: 0.0, source: Source::Local },
        |r| BestMatch { text: r.text.clone(), score: r.score, source: r.source },
    )
}
