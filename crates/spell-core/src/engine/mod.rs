//! The lookup engine: suggestion search, ranking, auto-correction,
//! compound correction and word segmentation over the mmap stores.

pub(crate) mod autocorrect;
pub(crate) mod compound;
pub(crate) mod lookup;
pub(crate) mod scorer;
pub(crate) mod segment;

#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::warn;

use crate::config::{ConfigError, SpellConfig};
use crate::keyboard::KeyboardMatrix;
use crate::store::builder::DictBuilder;
use crate::store::{DeleteIndex, StoreError, WordStore, BIGRAMS_FILE, DELETES_FILE, WORDS_FILE};

pub use autocorrect::Correction;
pub use lookup::{LookupOptions, SuggestItem, Verbosity};
pub use segment::{Composition, SegmentOptions};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A spell engine over one data directory.
///
/// Owns its stores and keyboard matrix; everything is immutable after
/// construction, so shared references may run queries concurrently. The
/// mmap regions are released when the engine is dropped.
pub struct SpellEngine {
    pub(crate) config: SpellConfig,
    pub(crate) words: WordStore,
    pub(crate) deletes: DeleteIndex,
    pub(crate) bigrams: Option<WordStore>,
    pub(crate) keyboard: Option<KeyboardMatrix>,
    pub(crate) max_word_count: u64,
    pub(crate) max_bigram_count: u64,
}

impl SpellEngine {
    /// Open an engine over previously built files in `dir`.
    ///
    /// `words.bin` and `deletes.bin` are required. A missing or unreadable
    /// `bigrams.bin` or keyboard file degrades the engine (no context
    /// ranking, no spatial weighting) instead of failing construction.
    pub fn open(config: SpellConfig, dir: &Path) -> Result<Self, EngineError> {
        config.validate()?;
        let cache_capacity = config.engine.cache_capacity;
        let words = WordStore::open(&dir.join(WORDS_FILE), cache_capacity)?;
        let deletes = DeleteIndex::open(&dir.join(DELETES_FILE))?;

        let bigrams_path = dir.join(BIGRAMS_FILE);
        let bigrams = if bigrams_path.exists() {
            match WordStore::open(&bigrams_path, cache_capacity) {
                Ok(store) => Some(store),
                Err(error) => {
                    warn!(%error, "dropping unreadable bigram store");
                    None
                }
            }
        } else {
            None
        };

        let keyboard = match config.engine.keyboard_layout {
            Some(layout) => {
                let path = dir.join(layout.file_name());
                match KeyboardMatrix::open(&path) {
                    Ok(matrix) => Some(matrix),
                    Err(error) => {
                        warn!(%error, layout = %layout, "dropping unreadable keyboard matrix");
                        None
                    }
                }
            }
            None => None,
        };

        let max_word_count = words.estimate_max_count();
        let max_bigram_count = bigrams.as_ref().map_or(0, WordStore::estimate_max_count);

        Ok(Self {
            config,
            words,
            deletes,
            bigrams,
            keyboard,
            max_word_count,
            max_bigram_count,
        })
    }

    /// Build dictionary files from in-memory word lists under `dir`, then
    /// open an engine over them.
    ///
    /// Building needs exclusive access to `dir`; the files are flushed
    /// before they are re-opened.
    pub fn build(
        config: SpellConfig,
        words: Vec<(String, u64)>,
        bigrams: Option<Vec<(String, u64)>>,
        dir: &Path,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let builder = DictBuilder::new(
            config.engine.max_edit_distance,
            config.engine.prefix_length,
        );
        builder.build(words, dir)?;
        if let Some(bigrams) = bigrams {
            builder.build_bigrams(bigrams, dir)?;
        }
        Self::open(config, dir)
    }

    pub fn config(&self) -> &SpellConfig {
        &self.config
    }

    pub fn max_edit_distance(&self) -> usize {
        self.config.engine.max_edit_distance
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn has_bigrams(&self) -> bool {
        self.bigrams.is_some()
    }

    pub fn has_keyboard(&self) -> bool {
        self.keyboard.is_some()
    }

    /// Ranked spelling suggestions for a single token.
    pub fn lookup(&self, phrase: &str, verbosity: Verbosity) -> Vec<SuggestItem> {
        lookup::run(self, phrase, verbosity, &LookupOptions::default())
    }

    /// `lookup` with explicit options: a tightened edit distance, unknown
    /// passthrough, casing transfer, or a previous word for bigram-aware
    /// ranking.
    pub fn lookup_with(
        &self,
        phrase: &str,
        verbosity: Verbosity,
        options: &LookupOptions<'_>,
    ) -> Vec<SuggestItem> {
        lookup::run(self, phrase, verbosity, options)
    }

    /// Frequent completions of `prefix`, most frequent first.
    ///
    /// Short prefixes match too much, so the frequency floor adapts to the
    /// prefix length unless `min_frequency` pins it.
    pub fn prefix_lookup(
        &self,
        prefix: &str,
        limit: usize,
        min_frequency: Option<u64>,
    ) -> Vec<SuggestItem> {
        if prefix.is_empty() || limit == 0 {
            return Vec::new();
        }
        let floor = min_frequency.unwrap_or_else(|| adaptive_min_frequency(prefix.chars().count()));
        self.words
            .prefix_scan(prefix, limit)
            .into_iter()
            .filter(|(_, count)| *count >= floor)
            .map(|(term, count)| SuggestItem::new(term, 0, count))
            .collect()
    }

    /// Auto-correction decision for `word`: the replacement and a
    /// confidence in [0, 1], or `None` below the confidence threshold.
    pub fn auto_correction(&self, word: &str, min_confidence: Option<f64>) -> Option<Correction> {
        autocorrect::run(self, word, min_confidence)
    }

    /// Correct a whitespace-separated phrase word by word. Tokens are
    /// never merged or split.
    pub fn lookup_compound(
        &self,
        phrase: &str,
        max_edit_distance: Option<usize>,
        transfer_casing: bool,
    ) -> SuggestItem {
        compound::run(self, phrase, max_edit_distance, transfer_casing)
    }

    /// Segment a concatenated (possibly misspelled) string into words.
    pub fn segment(&self, phrase: &str) -> Composition {
        segment::run(self, phrase, &SegmentOptions::default())
    }

    pub fn segment_with(&self, phrase: &str, options: &SegmentOptions) -> Composition {
        segment::run(self, phrase, options)
    }
}

/// Frequency floor for prefix completion by prefix length.
fn adaptive_min_frequency(prefix_len: usize) -> u64 {
    match prefix_len {
        0..=2 => 10_000,
        3 => 1_000,
        4 => 100,
        _ => 10,
    }
}
