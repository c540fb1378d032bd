use std::env;

use ragpick_agent::Agent;
use ragpick_cli::messaging::{MessageHandler, DEFAULT_IN_FLIGHT};
use ragpick_cli::{parse_command, Command};
use ragpick_core::config::Config;
use ragpick_core::error::Error;
use ragpick_core::types::RunOptions;
use tokio::io::BufReader;

async fn ask(config: &Config, query: &str) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        return Err(Error::EmptyQuery.into());
    }
    let agent = Agent::from_config(config)?;
    let result = agent.run(query, &RunOptions::default()).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ragpick_cli::init_tracing();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    match parse_command(env::args().skip(1).collect()) {
        Command::Serve => {
            let handler = MessageHandler::from_config(&config)?;
            tracing::info!("serving newline-delimited JSON requests on stdin");
            handler.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), DEFAULT_IN_FLIGHT).await?;
        }
        Command::Ask(query) => ask(&config, &query).await?,
    }
    Ok(())
}
