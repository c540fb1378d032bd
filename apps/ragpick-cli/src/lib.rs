//! ragpick-cli
//!
//! Presentation boundaries around the agent: the one-shot CLI, the
//! newline-delimited JSON message loop and its recent-query history.

pub mod history;
pub mod messaging;

pub use history::{QueryRecord, RecentQueries};
pub use messaging::{MessageHandler, Request, Response};

use tracing_subscriber::EnvFilter;

/// Query used by `ragpick` when no words are given.
pub const DEMO_QUERY: &str = "install extension with trial code TRIAL-100";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    Serve,
}

/// Interpret process arguments (program name excluded).
///
/// `serve` is a subcommand only when it is the sole argument, so
/// `ragpick serve static files` is a query. A leading `ask` is always
/// consumed; everything after it is the query text verbatim.
pub fn parse_command(mut args: Vec<String>) -> Command {
    if args.len() == 1 && args[0] == "serve" {
        return Command::Serve;
    }
    if args.first().is_some_and(|a| a == "ask") {
        args.remove(0);
    }
    if args.is_empty() {
        Command::Ask(DEMO_QUERY.to_string())
    } else {
        Command::Ask(args.join(" "))
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
