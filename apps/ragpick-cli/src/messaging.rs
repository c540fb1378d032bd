//! Request/response boundary around [`Agent::run`].
//!
//! Requests arrive as JSON objects `{"query": "...", "mode": "..."}`, one per
//! line. Each one gets exactly one response line: the agent result verbatim,
//! or `{"error": "..."}` when the request could not be served.

use std::fmt::Display;
use std::sync::Arc;

use futures::{future, stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use ragpick_agent::Agent;
use ragpick_core::config::Config;
use ragpick_core::error::{Error, Result};
use ragpick_core::types::{AgentResult, RunOptions, Strategy};

use crate::history::{QueryRecord, RecentQueries};

/// Requests processed concurrently by [`MessageHandler::serve`].
pub const DEFAULT_IN_FLIGHT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub query: String,
    #[serde(default)]
    pub mode: Option<String>,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), mode: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Result(Box<AgentResult>),
    Error { error: String },
}

impl Response {
    pub fn error(e: impl Display) -> Self {
        Response::Error { error: e.to_string() }
    }

    pub fn is_error(&self) -> bool { matches!(self, Response::Error { .. }) }

    pub fn result(&self) -> Option<&AgentResult> {
        match self {
            Response::Result(r) => Some(&**r),
            Response::Error { .. } => None,
        }
    }
}

pub struct MessageHandler {
    agent: Arc<Agent>,
    history: Mutex<RecentQueries>,
}

impl MessageHandler {
    pub fn new(agent: Arc<Agent>, history_capacity: usize) -> Self {
        Self { agent, history: Mutex::new(RecentQueries::new(history_capacity)) }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = config.settings()?;
        let agent = Agent::from_config(config)?;
        Ok(Self::new(Arc::new(agent), settings.history.capacity))
    }

    /// Snapshot of the history, newest first.
    pub async fn recent(&self) -> Vec<QueryRecord> {
        self.history.lock().await.iter().cloned().collect()
    }

    pub async fn handle(&self, request: Request) -> Response {
        let options = match validate(&request) {
            Ok(options) => options,
            Err(e) => {
                tracing::debug!(error = %e, "rejected request");
                return Response::error(e);
            }
        };
        self.history.lock().await.record(request.query.as_str());
        Response::Result(Box::new(self.agent.run(&request.query, &options).await))
    }

    /// Parse one JSON request line. Malformed input is a transport error response.
    pub async fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                tracing::warn!(error = %e, "malformed request");
                Response::error(Error::Transport(format!("malformed request: {e}")))
            }
        }
    }

    /// Answer newline-delimited requests from `reader` until EOF.
    ///
    /// Up to `in_flight` requests run at once; responses are written in
    /// request order. Blank lines are skipped; a line that is not valid
    /// UTF-8 gets its own error response and reading continues.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W, in_flight: usize) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let lines = stream::unfold(Some(reader), |state| async move {
            let mut reader = state?;
            let mut buf = Vec::new();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => None,
                Ok(_) => Some((decode_line(buf), Some(reader))),
                // The reader itself is broken; answer once and stop reading.
                Err(e) => Some((Err(Error::Transport(e.to_string())), None)),
            }
        });

        let responses = lines
            .filter(|line| future::ready(!matches!(line, Ok(l) if l.trim().is_empty())))
            .map(|line| async move {
                match line {
                    Ok(l) => self.handle_line(&l).await,
                    Err(e) => {
                        tracing::warn!(error = %e, "unreadable request line");
                        Response::error(e)
                    }
                }
            })
            .buffered(in_flight.max(1));
        futures::pin_mut!(responses);

        let mut served = 0usize;
        while let Some(response) = responses.next().await {
            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
            served += 1;
        }
        tracing::info!(served, "message loop finished");
        Ok(())
    }
}

/// Strip the line terminator and decode. Invalid UTF-8 fails only this line.
fn decode_line(mut buf: Vec<u8>) -> Result<String> {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    String::from_utf8(buf).map_err(|e| Error::Transport(format!("request is not valid UTF-8: {e}")))
}

fn validate(request: &Request) -> Result<RunOptions> {
    if request.query.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }
    let mode = match request.mode.as_deref().map(str::trim) {
        None | Some("" | "auto") => None,
        Some(m) => Some(m.parse::<Strategy>()?),
    };
    Ok(RunOptions { mode })
}
