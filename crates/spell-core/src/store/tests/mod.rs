
use std::path::Path;

use tempfile::TempDir;

use super::builder::DictBuilder;
use super::{DeleteIndex, WordStore, DELETES_FILE, WORDS_FILE};

fn owned(entries: &[(&str, u64)]) -> Vec<(String, u64)> {
    entries
        .iter()
        .map(|(term, count)| (term.to_string(), *count))
        .collect()
}

fn build_stores(words: &[(&str, u64)]) -> (WordStore, DeleteIndex, TempDir) {
    build_stores_with(words, DictBuilder::new(2, 7))
}

fn build_stores_with(words: &[(&str, u64)], builder: DictBuilder) -> (WordStore, DeleteIndex, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    builder.build(owned(words), dir.path()).unwrap();
    let store = WordStore::open(&dir.path().join(WORDS_FILE), 1000).unwrap();
    let deletes = DeleteIndex::open(&dir.path().join(DELETES_FILE)).unwrap();
    (store, deletes, dir)
}

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
