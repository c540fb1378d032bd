use std::env;

use ragpick_core::config::Config;
use ragpick_core::corpus::CorpusLoader;
use ragpick_text::KeywordSearchEngine;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [k]", args[0]);
        eprintln!("Example: {} 'trial code TRIAL-100'", args[0]);
        std::process::exit(1);
    }
    ragpick_cli::init_tracing();
    let query_text = &args[1];
    let settings = Config::load()?.settings()?;
    let k = args.get(2).map(|s| s.parse::<usize>()).transpose()?.unwrap_or(settings.agent.top_k);

    let documents = CorpusLoader::new().load_configured(&settings.corpus)?;
    let engine = KeywordSearchEngine::from_documents(&documents);
    println!("🔍 ragpick-keyword\n=================");
    println!("Query: {}", query_text);

    let counts = engine.raw_counts(query_text);
    let results = engine.search(query_text, k);
    println!("\nTop {} by token overlap:", results.len());
    for (i, r) in results.iter().enumerate() {
        let hits = documents.iter().position(|d| d.id == r.id).map_or(0, |p| counts[p]);
        println!("  {}. score={:.4}  hits={}  id={}  source={}", i + 1, r.score, hits, r.id, r.source.as_str());
        println!("     {}", r.text);
    }
    Ok(())
}
