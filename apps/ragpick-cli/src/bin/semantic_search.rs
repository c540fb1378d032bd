use std::env;

use ragpick_core::config::Config;
use ragpick_core::corpus::CorpusLoader;
use ragpick_vector::SemanticSearchEngine;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [k]", args[0]);
        eprintln!("Example: {} 'align center elements' 5", args[0]);
        std::process::exit(1);
    }
    ragpick_cli::init_tracing();
    let query_text = &args[1];
    let settings = Config::load()?.settings()?;
    let k = args.get(2).map(|s| s.parse::<usize>()).transpose()?.unwrap_or(settings.agent.top_k);

    let documents = CorpusLoader::new().load_configured(&settings.corpus)?;
    let engine = SemanticSearchEngine::from_documents(&documents);
    println!("🔍 ragpick-semantic\n==================");
    println!("Query: {}", query_text);
    println!("Documents: {}  vocabulary: {}", documents.len(), engine.dim());

    let results = engine.search(query_text, k);
    println!("\nTop {} by cosine similarity:", results.len());
    for (i, r) in results.iter().enumerate() {
        println!("  {}. score={:.4}  id={}  source={}", i + 1, r.score, r.id, r.source.as_str());
        println!("     {}", r.text);
    }
    Ok(())
}
