//! Corpus loading: the built-in documents, a JSON document list, or a
//! directory of `.txt` files (one document per file, id = file stem).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CorpusSettings;
use crate::error::{Error, Result};
use crate::types::Document;

pub const MIN_EXPECTED_DOCS: usize = 5;
pub const MAX_EXPECTED_DOCS: usize = 12;

const BUILTIN: [(&str, &str); 6] = [
    ("d1", "CentrAlign helps align UI elements and centers content quickly."),
    ("d2", "Install the extension from the Chrome Web Store and use trial code TRIAL-100 for access."),
    ("d3", "This extension performs local semantic and keyword search using toy embeddings."),
    ("d4", "Use the planner to pick semantic_search, keyword_search or hybrid based on simple rules."),
    ("d5", "Fallback to Pinecone stub when confidence drops below threshold; this is optional."),
    ("d6", "Manifest V3 requires service workers and restricts network policies."),
];

/// The fixed in-memory corpus shipped with the binary.
pub fn builtin_documents() -> Vec<Document> {
    BUILTIN.iter().map(|(id, text)| Document::new(*id, *text)).collect()
}

#[derive(Default)]
pub struct CorpusLoader;

impl CorpusLoader {
    pub fn new() -> Self { Self }

    /// Load from `path` if given, otherwise return the built-in corpus.
    pub fn load(&self, path: Option<&Path>) -> Result<Vec<Document>> {
        let docs = match path {
            None => builtin_documents(),
            Some(p) if p.is_dir() => self.load_directory(p)?,
            Some(p) => self.load_json(p)?,
        };
        validate(&docs)?;
        Ok(docs)
    }

    /// Load whatever `corpus.path` points at; relative paths are taken from the working directory.
    pub fn load_configured(&self, settings: &CorpusSettings) -> Result<Vec<Document>> {
        let base = std::env::current_dir()?;
        self.load(settings.resolve(&base).as_deref())
    }

    pub fn load_json(&self, file: &Path) -> Result<Vec<Document>> {
        let raw = fs::read_to_string(file)?;
        let docs: Vec<Document> = serde_json::from_str(&raw)?;
        tracing::info!(path = %file.display(), documents = docs.len(), "loaded corpus file");
        Ok(docs)
    }

    pub fn load_directory(&self, data_dir: &Path) -> Result<Vec<Document>> {
        let files = self.list_txt_files(data_dir);
        if files.is_empty() {
            tracing::warn!(dir = %data_dir.display(), "no .txt files found");
            return Ok(vec![]);
        }
        let mut docs = Vec::with_capacity(files.len());
        for file_path in &files {
            let content = self.read_file_content(file_path)?;
            let text = content.trim();
            if text.is_empty() { continue; }
            docs.push(Document::new(self.extract_doc_id(file_path), text));
        }
        tracing::info!(dir = %data_dir.display(), files = files.len(), documents = docs.len(), "loaded corpus directory");
        Ok(docs)
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Ok(content),
            Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
        }
    }

    fn extract_doc_id(&self, file_path: &Path) -> String {
        file_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string_lossy().to_string())
    }

    fn list_txt_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut txt_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("txt") { txt_files.push(path.to_path_buf()); }
        }
        txt_files.sort();
        txt_files
    }
}

/// Ids must be unique. Sizes outside the expected range are allowed but noted.
pub fn validate(docs: &[Document]) -> Result<()> {
    let mut seen = HashSet::new();
    for d in docs {
        if !seen.insert(d.id.as_str()) {
            return Err(Error::InvalidConfig(format!("duplicate document id '{}'", d.id)));
        }
    }
    if !(MIN_EXPECTED_DOCS..=MAX_EXPECTED_DOCS).contains(&docs.len()) {
        tracing::warn!(documents = docs.len(), "corpus size outside the expected {}..={} range", MIN_EXPECTED_DOCS, MAX_EXPECTED_DOCS);
    }
    Ok(())
}
