//! Lightweight configuration loader, typed settings and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_AGENT__TOP_K=5`). Every section is
//! optional and falls back to the built-in defaults below.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_TOP_K: usize = 3;
pub const CONFIDENCE_THRESHOLD: f64 = 0.75;
pub const LONG_QUERY_WORDS: usize = 5;
pub const SCORE_MARGIN: f64 = 0.1;
pub const FALLBACK_DELAY_MS: u64 = 60;
pub const FALLBACK_TIMEOUT_MS: u64 = 2_000;
pub const FALLBACK_SCORE: f64 = 0.6;
pub const FALLBACK_TEXT: &str = "Pinecone stub: no real API called. Closest match placeholder.";
pub const HISTORY_CAPACITY: usize = 10;

pub struct Config {
    figment: Figment,
}

impl Config {
    /// Load from the working directory using `RUST_ENV` (default `dev`).
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    /// Build a config from an in-memory TOML document. No files or env vars are read.
    pub fn from_toml_str(toml: &str) -> Self {
        Self { figment: Figment::new().merge(Toml::string(toml)) }
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// Extract and validate all typed sections.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub agent: AgentSettings,
    pub planner: PlannerSettings,
    pub fallback: FallbackSettings,
    pub corpus: CorpusSettings,
    pub history: HistorySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub top_k: usize,
    pub confidence_threshold: f64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K, confidence_threshold: CONFIDENCE_THRESHOLD }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Queries with more tokens than this are "long".
    pub long_query_words: usize,
    pub score_margin: f64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self { long_query_words: LONG_QUERY_WORDS, score_margin: SCORE_MARGIN }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSettings {
    pub enabled: bool,
    pub delay_ms: u64,
    pub timeout_ms: u64,
    pub score: f64,
    pub text: String,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: FALLBACK_DELAY_MS,
            timeout_ms: FALLBACK_TIMEOUT_MS,
            score: FALLBACK_SCORE,
            text: FALLBACK_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// JSON file of `[{id, text}]` or a directory of `.txt` files. Unset means built-in.
    pub path: Option<String>,
}

impl CorpusSettings {
    pub fn resolve(&self, base: &Path) -> Option<PathBuf> {
        self.path.as_deref().map(|p| resolve_with_base(base, p))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub capacity: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { capacity: HISTORY_CAPACITY }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{} must be within [0, 1], got {}", name, v)))
            }
        };
        unit("agent.confidence_threshold", self.agent.confidence_threshold)?;
        unit("planner.score_margin", self.planner.score_margin)?;
        unit("fallback.score", self.fallback.score)?;
        if self.agent.top_k == 0 {
            return Err(Error::InvalidConfig("agent.top_k must be at least 1".into()));
        }
        if self.history.capacity == 0 {
            return Err(Error::InvalidConfig("history.capacity must be at least 1".into()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = Config::from_toml_str("").settings().expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.agent.top_k, 3);
        assert_eq!(settings.fallback.score, 0.6);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = Config::from_toml_str("[agent]\nconfidence_threshold = 1.5").settings().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let base = Path::new("/srv/ragpick");
        assert_eq!(resolve_with_base(base, "corpus.json"), PathBuf::from("/srv/ragpick/corpus.json"));
        assert_eq!(resolve_with_base(base, "/abs/c.json"), PathBuf::from("/abs/c.json"));
    }
}
