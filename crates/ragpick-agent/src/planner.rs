use ragpick_core::config::PlannerSettings;
use ragpick_core::types::{PlanDecision, PlannerRule, ReasonRecord, ScoredResult, Strategy};
use ragpick_embed::tokenize;

/// Chooses which ranker's top result to trust.
///
/// Pure: the same query and inputs always give the same decision and
/// reasoning. Missing top results count as score 0.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    settings: PlannerSettings,
}

impl Planner {
    pub fn new(settings: PlannerSettings) -> Self { Self { settings } }

    pub fn decide(&self, query: &str, semantic: &[ScoredResult], keyword: &[ScoredResult]) -> PlanDecision {
        let words = tokenize(query).len();
        let long_query = words > self.settings.long_query_words;
        let sem = semantic.first().map_or(0.0, |r| r.score);
        let key = keyword.first().map_or(0.0, |r| r.score);
        let exact_hit = key > 0.0;
        let margin = self.settings.score_margin;

        let mut reasoning = Vec::new();
        if long_query {
            reasoning.push(reason(
                PlannerRule::LongQuery,
                format!("Query length > {} -> prefer semantic_search", self.settings.long_query_words),
            ));
        }
        if exact_hit {
            reasoning.push(reason(PlannerRule::ExactKeywordHit, "Exact keyword hits found -> prefer keyword_search".into()));
        }
        reasoning.push(reason(
            PlannerRule::ScoreSummary,
            format!("Top semantic score={:.3}, top keyword score={:.3}", sem, key),
        ));

        let decision = if exact_hit && key >= sem + margin {
            Strategy::KeywordSearch
        } else if (sem - key).abs() <= margin {
            Strategy::Hybrid
        } else if !long_query && key > sem {
            Strategy::KeywordSearch
        } else {
            Strategy::SemanticSearch
        };
        reasoning.push(reason(PlannerRule::Decision, format!("Decision -> {}", decision)));

        tracing::debug!(words, sem, key, %decision, "planner decision");
        PlanDecision { decision, reasoning }
    }
}

fn reason(rule: PlannerRule, message: String) -> ReasonRecord {
    ReasonRecord { rule, message }
}
