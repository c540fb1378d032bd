use std::time::Duration;

use async_trait::async_trait;
use ragpick_core::config::FallbackSettings;
use ragpick_core::error::Result;
use ragpick_core::traits::FallbackSource;
use ragpick_core::types::{ScoredResult, Source};

pub const STUB_ID: &str = "pinecone-stub";

/// Stand-in for a remote vector store: waits a fixed delay, then returns one
/// placeholder result with a fixed score. No network I/O.
pub struct StubFallback {
    delay: Duration,
    score: f64,
    text: String,
}

impl StubFallback {
    pub fn new(settings: &FallbackSettings) -> Self {
        Self { delay: Duration::from_millis(settings.delay_ms), score: settings.score, text: settings.text.clone() }
    }
}

impl Default for StubFallback {
    fn default() -> Self { Self::new(&FallbackSettings::default()) }
}

#[async_trait]
impl FallbackSource for StubFallback {
    fn name(&self) -> &str { STUB_ID }

    async fn retrieve(&self, query: &str) -> Result<ScoredResult> {
        tracing::debug!(query, delay_ms = self.delay.as_millis() as u64, "fallback stub called");
        tokio::time::sleep(self.delay).await;
        Ok(ScoredResult { id: STUB_ID.to_string(), text: self.text.clone(), score: self.score, source: Source::Pinecone })
    }
}
