use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use memmap2::Mmap;

use super::StoreError;

// u32 num_entries
const COUNT_HEADER: usize = 4;
const OFFSET_SIZE: usize = 4;

/// The on-disk format stores the suggestion count as u16; longer lists are
/// truncated at build time.
const MAX_SUGGESTIONS_PER_KEY: usize = u16::MAX as usize;

/// Sorted (delete-key → word ordinals) multimap over `deletes.bin`.
///
/// Keys are read from the map during binary search; no key table is held
/// in memory. A missing or unreadable key yields an empty list.
pub struct DeleteIndex {
    mmap: Mmap,
    num_entries: usize,
    records_start: usize,
}

impl DeleteIndex {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        // SAFETY: the file is opened read-only and the mapping is immutable.
        let mmap = unsafe { Mmap::map(&file)? };
        if mmap.len() < COUNT_HEADER {
            return Err(StoreError::InvalidHeader);
        }
        let num_entries = u32::from_le_bytes(mmap[..4].try_into().unwrap()) as usize;
        let records_start = COUNT_HEADER + num_entries * OFFSET_SIZE;
        if mmap.len() < records_start {
            return Err(StoreError::Truncated);
        }
        Ok(Self {
            mmap,
            num_entries,
            records_start,
        })
    }

    pub fn len(&self) -> usize {
        self.num_entries
    }

    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Word ordinals recorded under `key`, empty when absent or unreadable.
    pub fn get(&self, key: &str) -> Vec<u32> {
        let key = key.as_bytes();
        let mut lo = 0usize;
        let mut hi = self.num_entries;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.record_key(mid) {
                Some(k) if k < key => lo = mid + 1,
                Some(_) => hi = mid,
                None => hi = mid,
            }
        }
        match self.record_key(lo) {
            Some(k) if k == key => self.record_indices(lo),
            _ => Vec::new(),
        }
    }

    fn record_pos(&self, index: usize) -> Option<usize> {
        if index >= self.num_entries {
            return None;
        }
        let off_pos = COUNT_HEADER + index * OFFSET_SIZE;
        let offset =
            u32::from_le_bytes(self.mmap.get(off_pos..off_pos + 4)?.try_into().ok()?) as usize;
        self.records_start.checked_add(offset)
    }

    fn record_key(&self, index: usize) -> Option<&[u8]> {
        let pos = self.record_pos(index)?;
        let key_len = *self.mmap.get(pos)? as usize;
        self.mmap.get(pos + 1..pos + 1 + key_len)
    }

    fn record_indices(&self, index: usize) -> Vec<u32> {
        let Some(pos) = self.record_pos(index) else {
            return Vec::new();
        };
        let Some(&key_len) = self.mmap.get(pos) else {
            return Vec::new();
        };
        let count_pos = pos + 1 + key_len as usize;
        let Some(count_bytes) = self.mmap.get(count_pos..count_pos + 2) else {
            return Vec::new();
        };
        let count = u16::from_le_bytes(count_bytes.try_into().unwrap()) as usize;
        let Some(data) = self.mmap.get(count_pos + 2..count_pos + 2 + count * 4) else {
            return Vec::new();
        };
        data.chunks_exact(4)
            .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
            .collect()
    }
}

/// Serialize the delete multimap into the `deletes.bin` layout.
///
/// `BTreeMap` iteration gives the required ascending key order for free.
pub(super) fn encode_delete_entries(entries: &BTreeMap<String, Vec<u32>>) -> Result<Vec<u8>, StoreError> {
    let num: u32 = entries
        .len()
        .try_into()
        .map_err(|_| StoreError::Parse("delete key count exceeds u32::MAX".into()))?;

    let mut buf = Vec::new();
    buf.extend_from_slice(&num.to_le_bytes());

    let mut offset = 0u32;
    for (key, indices) in entries {
        buf.extend_from_slice(&offset.to_le_bytes());
        let kept = indices.len().min(MAX_SUGGESTIONS_PER_KEY);
        offset += (1 + key.len() + 2 + kept * 4) as u32;
    }
    for (key, indices) in entries {
        debug_assert!(key.len() <= 255);
        buf.push(key.len() as u8);
        buf.extend_from_slice(key.as_bytes());
        let kept = &indices[..indices.len().min(MAX_SUGGESTIONS_PER_KEY)];
        buf.extend_from_slice(&(kept.len() as u16).to_le_bytes());
        for index in kept {
            buf.extend_from_slice(&index.to_le_bytes());
        }
    }
    Ok(buf)
}

pub(super) fn write_delete_index(
    path: &Path,
    entries: &BTreeMap<String, Vec<u32>>,
) -> Result<(), StoreError> {
    let bytes = encode_delete_entries(entries)?;
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    Ok(())
}
