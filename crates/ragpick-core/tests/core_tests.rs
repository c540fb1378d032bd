use std::fs;
use tempfile::TempDir;

use ragpick_core::config::Config;
use ragpick_core::corpus::{builtin_documents, CorpusLoader};
use ragpick_core::error::Error;

#[test]
fn builtin_corpus_has_six_unique_documents() {
    let docs = CorpusLoader::new().load(None).expect("builtin");
    assert_eq!(docs.len(), 6);
    assert_eq!(docs[0].id, "d1");
    assert_eq!(docs, builtin_documents());
}

#[test]
fn load_directory_uses_file_stems_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("b.txt"), "charlie delta").unwrap();
    fs::write(dir.join("a.txt"), "  alpha bravo \n").unwrap();
    fs::write(dir.join("empty.txt"), "   ").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();

    let docs = CorpusLoader::new().load(Some(dir)).expect("load dir");

    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"], "sorted, empty and non-txt files skipped");
    assert_eq!(docs[0].text, "alpha bravo");
}

#[test]
fn load_json_file() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("corpus.json");
    fs::write(&file, r#"[{"id":"x1","text":"first"},{"id":"x2","text":"second"}]"#).unwrap();

    let docs = CorpusLoader::new().load(Some(&file)).expect("load json");
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[1].text, "second");
}

#[test]
fn duplicate_ids_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("corpus.json");
    fs::write(&file, r#"[{"id":"x","text":"a"},{"id":"x","text":"b"}]"#).unwrap();

    let err = CorpusLoader::new().load(Some(&file)).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn malformed_json_is_a_json_error() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("corpus.json");
    fs::write(&file, "not json").unwrap();

    let err = CorpusLoader::new().load(Some(&file)).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn env_specific_file_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("config.toml"), "[agent]\ntop_k = 4\n[history]\ncapacity = 7\n").unwrap();
    fs::write(dir.join("config.test.toml"), "[agent]\ntop_k = 2\n").unwrap();

    let settings = Config::load_from(dir, "test").expect("load").settings().expect("settings");
    assert_eq!(settings.agent.top_k, 2);
    assert_eq!(settings.history.capacity, 7);
    assert_eq!(settings.agent.confidence_threshold, 0.75, "untouched keys keep defaults");
}

#[test]
fn invalid_file_values_fail_at_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[agent]\ntop_k = 0\n").unwrap();

    assert!(Config::load_from(tmp.path(), "test").is_err());
}

#[test]
fn typed_lookup_by_key() {
    let config = Config::from_toml_str("[corpus]\npath = \"data/corpus.json\"\n");
    let path: String = config.get("corpus.path").expect("key");
    assert_eq!(path, "data/corpus.json");
    assert!(config.get::<String>("corpus.missing").is_err());
}
