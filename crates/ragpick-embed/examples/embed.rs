use ragpick_core::corpus::builtin_documents;
use ragpick_core::traits::Embedder;
use ragpick_embed::TermFrequencyEmbedder;

fn main() {
    let embedder = TermFrequencyEmbedder::from_documents(&builtin_documents());
    let texts = vec!["align center elements".to_string(), "trial code".to_string()];
    let embs = embedder.embed_batch(&texts);
    for (text, v) in texts.iter().zip(&embs) {
        let hits = v.iter().filter(|x| **x > 0.0).count();
        println!("{text:?}: dim={} non_zero={hits}", embedder.dim());
    }
}
