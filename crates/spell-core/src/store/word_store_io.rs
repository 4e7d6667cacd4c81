use std::fs::File;
use std::io::Write;
use std::path::Path;

use memmap2::Mmap;

use super::word_store::{COUNT_HEADER, OFFSET_SIZE};
use super::{StoreError, WordStore};

impl WordStore {
    /// Open a word (or bigram) store, mapping the file read-only.
    ///
    /// Header validation happens here; after a successful open, reads
    /// degrade to zero counts rather than erroring.
    pub fn open(path: &Path, cache_capacity: usize) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        // SAFETY: the file is opened read-only and the mapping is immutable.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_mmap(mmap, cache_capacity)
    }
}

/// Serialize sorted `(term, count)` entries into the `words.bin` layout.
///
/// Callers must pass entries sorted strictly ascending by term with every
/// term between 1 and 255 bytes; `builder::normalize` guarantees both.
pub(super) fn encode_word_entries(entries: &[(String, u64)]) -> Result<Vec<u8>, StoreError> {
    let num: u32 = entries
        .len()
        .try_into()
        .map_err(|_| StoreError::Parse("word count exceeds u32::MAX".into()))?;

    let records_size: usize = entries.iter().map(|(t, _)| 1 + t.len() + 8).sum();
    let mut buf = Vec::with_capacity(COUNT_HEADER + entries.len() * OFFSET_SIZE + records_size);
    buf.extend_from_slice(&num.to_le_bytes());

    let mut offset = 0u32;
    for (term, _) in entries {
        buf.extend_from_slice(&offset.to_le_bytes());
        offset += (1 + term.len() + 8) as u32;
    }
    for (term, count) in entries {
        debug_assert!((1..=255).contains(&term.len()));
        buf.push(term.len() as u8);
        buf.extend_from_slice(term.as_bytes());
        buf.extend_from_slice(&count.to_le_bytes());
    }
    Ok(buf)
}

/// Write a word store file, flushing before returning so the caller can
/// safely re-open it.
pub(super) fn write_word_store(path: &Path, entries: &[(String, u64)]) -> Result<(), StoreError> {
    let bytes = encode_word_entries(entries)?;
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    Ok(())
}
