//! ragpick-core
//!
//! Shared data model, error taxonomy, configuration and corpus loading used by
//! the retrieval engines, the planner/orchestrator and the CLI.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod traits;
pub mod types;
