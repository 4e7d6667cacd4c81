mod lookup;
mod scoring;

use tempfile::TempDir;

use crate::config::SpellConfig;
use crate::keyboard::KeyboardMatrix;

use super::SpellEngine;

fn owned(entries: &[(&str, u64)]) -> Vec<(String, u64)> {
    entries
        .iter()
        .map(|(term, count)| (term.to_string(), *count))
        .collect()
}

/// Build an engine over a temp directory. The directory handle must stay
/// alive as long as the engine; dropping it unlinks the mapped files.
fn build_engine(
    words: &[(&str, u64)],
    bigrams: Option<&[(&str, u64)]>,
    config: SpellConfig,
) -> (SpellEngine, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    if let Some(layout) = config.engine.keyboard_layout {
        KeyboardMatrix::generate(layout)
            .save(&dir.path().join(layout.file_name()))
            .unwrap();
    }
    let engine = SpellEngine::build(config, owned(words), bigrams.map(|b| owned(b)), dir.path())
        .expect("engine build");
    (engine, dir)
}
