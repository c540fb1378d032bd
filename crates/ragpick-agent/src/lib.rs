//! ragpick-agent
//!
//! Rule-based planner over the semantic and keyword rankers, the low-confidence
//! fallback source, and the orchestrator that assembles a traced answer.

pub mod agent;
pub mod fallback;
pub mod planner;

pub use agent::Agent;
pub use fallback::StubFallback;
pub use planner::Planner;
