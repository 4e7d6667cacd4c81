//! Offline construction of `words.bin`, `deletes.bin` and `bigrams.bin`.
//!
//! Builds run with exclusive access to the output directory: no reader may
//! hold the files while they are rewritten. Files are flushed before the
//! builder returns, so a caller can re-open them immediately.

use std::collections::BTreeMap;
use std::path::Path;

use ahash::AHashSet;
use tracing::{debug, debug_span, warn};

use super::{delete_index, word_store_io, StoreError, BIGRAMS_FILE, DELETES_FILE, WORDS_FILE};

/// Longest encodable term in bytes (`u8 term_len`).
const MAX_TERM_BYTES: usize = 255;

/// Writes the word store and delete index for a frequency dictionary.
pub struct DictBuilder {
    max_edit_distance: usize,
    prefix_length: usize,
    top_n: Option<usize>,
}

impl DictBuilder {
    pub fn new(max_edit_distance: usize, prefix_length: usize) -> Self {
        Self {
            max_edit_distance,
            prefix_length,
            top_n: None,
        }
    }

    /// Keep only the `n` most frequent words, a size-reduction knob for
    /// constrained targets.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Build `words.bin` and `deletes.bin` under `dir`.
    pub fn build(&self, words: Vec<(String, u64)>, dir: &Path) -> Result<(), StoreError> {
        let _span = debug_span!("build_dict", words = words.len()).entered();
        let mut entries = normalize(words);
        if let Some(n) = self.top_n {
            truncate_to_top_n(&mut entries, n);
        }
        word_store_io::write_word_store(&dir.join(WORDS_FILE), &entries)?;

        let mut deletes: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for (ordinal, (term, _)) in entries.iter().enumerate() {
            let ordinal = ordinal as u32;
            if term.chars().count() <= self.max_edit_distance {
                deletes.entry(String::new()).or_default().push(ordinal);
            }
            for key in prefix_deletes(term, self.prefix_length, self.max_edit_distance) {
                deletes.entry(key).or_default().push(ordinal);
            }
        }
        delete_index::write_delete_index(&dir.join(DELETES_FILE), &deletes)?;
        debug!(words = entries.len(), delete_keys = deletes.len());
        Ok(())
    }

    /// Build `bigrams.bin` under `dir`. Bigram terms are `"w1 w2"` pairs;
    /// the file shares the word-store layout, no delete index is needed.
    pub fn build_bigrams(&self, bigrams: Vec<(String, u64)>, dir: &Path) -> Result<(), StoreError> {
        let _span = debug_span!("build_bigrams", bigrams = bigrams.len()).entered();
        let entries = normalize(bigrams);
        word_store_io::write_word_store(&dir.join(BIGRAMS_FILE), &entries)
    }
}

/// Lowercase, drop unencodable terms, merge duplicates (summing counts)
/// and sort ascending by term.
fn normalize(words: Vec<(String, u64)>) -> Vec<(String, u64)> {
    let mut merged: BTreeMap<String, u64> = BTreeMap::new();
    for (term, count) in words {
        let term = term.to_lowercase();
        if term.is_empty() || term.len() > MAX_TERM_BYTES {
            warn!(%term, "skipping unencodable term");
            continue;
        }
        let slot = merged.entry(term).or_insert(0);
        *slot = slot.saturating_add(count);
    }
    merged.into_iter().collect()
}

fn truncate_to_top_n(entries: &mut Vec<(String, u64)>, n: usize) {
    if entries.len() <= n {
        return;
    }
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries.sort_by(|a, b| a.0.cmp(&b.0));
}

/// All distinct strings obtainable from the first `prefix_length` chars of
/// `term` by at most `max_edit_distance` single-character deletions,
/// including the prefix itself.
///
/// A breadth-first closure bounded by depth; strings of length 1 are not
/// deleted further (the empty key is reserved for whole short words).
pub(crate) fn prefix_deletes(
    term: &str,
    prefix_length: usize,
    max_edit_distance: usize,
) -> AHashSet<String> {
    let prefix: String = term.chars().take(prefix_length).collect();
    let mut keys = AHashSet::new();
    keys.insert(prefix.clone());

    let mut frontier = vec![prefix];
    for _ in 0..max_edit_distance {
        let mut next = Vec::new();
        for word in &frontier {
            let chars: Vec<char> = word.chars().collect();
            if chars.len() <= 1 {
                continue;
            }
            for skip in 0..chars.len() {
                let deleted: String = chars
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, c)| c)
                    .collect();
                if keys.insert(deleted.clone()) {
                    next.push(deleted);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_deletes_depth_one() {
        let keys = prefix_deletes("cat", 7, 1);
        let mut sorted: Vec<_> = keys.into_iter().collect();
        sorted.sort();
        assert_eq!(sorted, ["at", "ca", "cat", "ct"]);
    }

    #[test]
    fn prefix_deletes_depth_two_is_a_closure() {
        let keys = prefix_deletes("cat", 7, 2);
        assert!(keys.contains("cat"));
        assert!(keys.contains("at"));
        assert!(keys.contains("a"));
        assert!(keys.contains("t"));
        assert!(!keys.contains(""));
    }

    #[test]
    fn prefix_deletes_clips_to_prefix_length() {
        let keys = prefix_deletes("abcdefghij", 4, 1);
        assert!(keys.contains("abcd"));
        assert!(keys.contains("bcd"));
        assert!(!keys.contains("abcde"));
        assert!(!keys.iter().any(|k| k.len() > 4));
    }

    #[test]
    fn normalize_merges_and_lowercases() {
        let entries = normalize(vec![
            ("The".into(), 10),
            ("the".into(), 5),
            ("apple".into(), 3),
        ]);
        assert_eq!(entries, vec![("apple".into(), 3), ("the".into(), 15)]);
    }

    #[test]
    fn top_n_keeps_most_frequent_in_term_order() {
        let mut entries = vec![
            ("a".to_string(), 5u64),
            ("b".to_string(), 50),
            ("c".to_string(), 500),
        ];
        truncate_to_top_n(&mut entries, 2);
        assert_eq!(entries, vec![("b".into(), 50), ("c".into(), 500)]);
    }
}
