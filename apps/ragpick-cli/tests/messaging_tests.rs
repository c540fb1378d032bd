use std::sync::Arc;

use ragpick_agent::Agent;
use ragpick_cli::{MessageHandler, Request, Response};
use ragpick_core::config::{Config, Settings};
use ragpick_core::corpus::builtin_documents;
use ragpick_core::types::{Source, Strategy};
use tokio::io::BufReader;

fn handler(capacity: usize) -> MessageHandler {
    let mut settings = Settings::default();
    settings.fallback.delay_ms = 2;
    MessageHandler::new(Arc::new(Agent::new(&builtin_documents(), &settings)), capacity)
}

#[tokio::test]
async fn request_returns_the_agent_result_verbatim() {
    let handler = handler(10);
    let response = handler.handle(Request::new("align center elements")).await;
    let result = response.result().expect("result");
    assert_eq!(result.planner_decision, Strategy::KeywordSearch);
    assert_eq!(result.best_match.source, Source::Local);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["planner_decision"], "keyword_search");
    assert!(json.get("error").is_none());
    assert!(json["trace"]["reasoning"].as_str().unwrap().contains("Decision -> keyword_search"));
}

#[tokio::test]
async fn empty_query_is_an_error_response() {
    let handler = handler(10);
    let response = handler.handle(Request::new("   ")).await;
    assert!(response.is_error());
    assert_eq!(serde_json::to_value(&response).unwrap()["error"], "Query is empty");
    assert!(handler.recent().await.is_empty(), "rejected queries are not recorded");
}

#[tokio::test]
async fn unknown_mode_is_an_error_response() {
    let handler = handler(10);
    let response = handler.handle(Request { query: "align".into(), mode: Some("fuzzy".into()) }).await;
    assert_eq!(response, Response::Error { error: "Unknown strategy: fuzzy".into() });
}

#[tokio::test]
async fn malformed_line_is_a_transport_error() {
    let handler = handler(10);
    let response = handler.handle_line("{not json").await;
    match response {
        Response::Error { error } => assert!(error.starts_with("Transport error: malformed request"), "{error}"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn history_tracks_recent_queries() {
    let handler = handler(2);
    for q in ["first", "second", "third"] {
        handler.handle_line(&format!(r#"{{"query":"{q}","mode":"auto"}}"#)).await;
    }
    let recent: Vec<String> = handler.recent().await.into_iter().map(|r| r.query).collect();
    assert_eq!(recent, vec!["third", "second"]);
}

#[tokio::test]
async fn serve_answers_each_line_in_order() {
    let handler = handler(10);
    let input = concat!(
        r#"{"query":"xyz unrelated gibberish term"}"#, "\n",
        "\n",
        "garbage\n",
        r#"{"query":"Manifest V3 service workers","mode":"semantic_search"}"#, "\n",
    );
    let mut out = Vec::new();
    handler.serve(BufReader::new(input.as_bytes()), &mut out, 4).await.expect("serve");

    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3, "blank line skipped");
    assert_eq!(lines[0]["best_match"]["source"], "pinecone");
    assert_eq!(lines[0]["used_fallback_tool"], true);
    assert!(lines[1]["error"].as_str().unwrap().contains("malformed"));
    assert!(lines[2]["best_match"]["text"].as_str().unwrap().starts_with("Manifest V3"));
}

#[tokio::test]
async fn undecodable_line_does_not_stop_the_loop() {
    let handler = handler(10);
    let mut input = Vec::new();
    input.extend_from_slice(br#"{"query":"align center elements"}"#);
    input.extend_from_slice(b"\n{\"query\":\"\xff\xfe\"}\n");
    input.extend_from_slice(br#"{"query":"Manifest V3 service workers"}"#);
    input.push(b'\n');

    let mut out = Vec::new();
    handler.serve(BufReader::new(input.as_slice()), &mut out, 2).await.expect("serve");

    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3, "one response per request line");
    assert_eq!(lines[0]["planner_decision"], "keyword_search");
    assert!(lines[1]["error"].as_str().unwrap().starts_with("Transport error: request is not valid UTF-8"));
    assert!(lines[2]["best_match"]["text"].as_str().unwrap().starts_with("Manifest V3"));
}

#[tokio::test]
async fn from_config_uses_the_configured_corpus_and_capacity() {
    let tmp = tempfile::TempDir::new().unwrap();
    let file = tmp.path().join("corpus.json");
    std::fs::write(&file, r#"[{"id":"k1","text":"tokio runtime timers"},{"id":"k2","text":"serde derive macros"}]"#).unwrap();
    let toml = format!("[corpus]\npath = {:?}\n[history]\ncapacity = 1\n[fallback]\nenabled = false\n", file.display().to_string());

    let handler = MessageHandler::from_config(&Config::from_toml_str(&toml)).expect("handler");
    handler.handle(Request::new("tokio timers")).await;
    let response = handler.handle(Request::new("serde macros")).await;

    assert_eq!(response.result().expect("result").best_match.text, "serde derive macros");
    let recent: Vec<String> = handler.recent().await.into_iter().map(|r| r.query).collect();
    assert_eq!(recent, vec!["serde macros"]);
}
