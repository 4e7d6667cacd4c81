use std::sync::Mutex;

use memmap2::Mmap;

use super::cache::CountCache;

// u32 num_words
pub(super) const COUNT_HEADER: usize = 4;
// u32 byte offset into the record area, one per word
pub(super) const OFFSET_SIZE: usize = 4;

/// Probe terms for estimating the maximum frequency without a full scan.
/// When none of them is present the first entries are scanned instead.
const MAX_COUNT_PROBES: [&str; 10] = [
    "the", "of", "and", "a", "to", "in", "is", "you", "that", "it",
];
const MAX_COUNT_SCAN: usize = 100;

/// Sorted (term → count) map over a memory-mapped `words.bin`.
///
/// Also backs `bigrams.bin`, whose terms are `"w1 w2"` pairs. The store
/// exclusively owns its mapping; dropping it releases the region. Records
/// are read on demand, so the resident cost is the offset table pages the
/// binary search touches plus the bounded count cache.
pub struct WordStore {
    mmap: Mmap,
    num_words: usize,
    records_start: usize,
    cache: Mutex<CountCache>,
}

impl WordStore {
    pub(super) fn from_mmap(mmap: Mmap, cache_capacity: usize) -> Result<Self, super::StoreError> {
        if mmap.len() < COUNT_HEADER {
            return Err(super::StoreError::InvalidHeader);
        }
        let num_words = u32::from_le_bytes(mmap[..4].try_into().unwrap()) as usize;
        let records_start = COUNT_HEADER + num_words * OFFSET_SIZE;
        if mmap.len() < records_start {
            return Err(super::StoreError::Truncated);
        }
        Ok(Self {
            mmap,
            num_words,
            records_start,
            cache: Mutex::new(CountCache::new(cache_capacity)),
        })
    }

    pub fn len(&self) -> usize {
        self.num_words
    }

    pub fn is_empty(&self) -> bool {
        self.num_words == 0
    }

    /// Frequency count for `term`, 0 when absent or unreadable.
    pub fn get(&self, term: &str) -> u64 {
        if let Ok(cache) = self.cache.lock() {
            if let Some(count) = cache.get(term) {
                return count;
            }
        }
        let count = match self.find(term.as_bytes()) {
            Some(index) => self.record(index).map(|(_, c)| c).unwrap_or(0),
            None => 0,
        };
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(term.to_string(), count);
        }
        count
    }

    pub fn contains(&self, term: &str) -> bool {
        self.get(term) > 0
    }

    /// Entry at ordinal `index`, `None` when out of range or unreadable.
    pub fn at(&self, index: usize) -> Option<(String, u64)> {
        let (term, count) = self.record(index)?;
        Some((String::from_utf8_lossy(term).into_owned(), count))
    }

    /// Entries whose term starts with `prefix`, sorted by count descending.
    ///
    /// Over-collects up to `10 * limit` matches in term order before sorting
    /// so a low-frequency run early in the range cannot crowd out frequent
    /// completions further along.
    pub fn prefix_scan(&self, prefix: &str, limit: usize) -> Vec<(String, u64)> {
        if limit == 0 || prefix.is_empty() {
            return Vec::new();
        }
        let prefix_bytes = prefix.as_bytes();
        let mut out = Vec::new();
        let mut index = self.lower_bound(prefix_bytes);
        while index < self.num_words && out.len() < limit * 10 {
            let Some((term, count)) = self.record(index) else {
                break;
            };
            if !term.starts_with(prefix_bytes) {
                break;
            }
            out.push((String::from_utf8_lossy(term).into_owned(), count));
            index += 1;
        }
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out.truncate(limit);
        out
    }

    /// Estimate of the largest count in the store.
    ///
    /// Probes a fixed set of very common words first; if the store contains
    /// none of them (a bigram store, a non-English dictionary), the maximum
    /// over the first entries is used instead.
    pub fn estimate_max_count(&self) -> u64 {
        let probed = MAX_COUNT_PROBES
            .iter()
            .map(|w| self.get(w))
            .max()
            .unwrap_or(0);
        if probed > 0 {
            return probed;
        }
        (0..self.num_words.min(MAX_COUNT_SCAN))
            .filter_map(|i| self.record(i).map(|(_, c)| c))
            .max()
            .unwrap_or(0)
    }

    /// Read record `index` straight from the map. `None` on any bounds
    /// violation so a truncated file degrades instead of failing.
    pub(super) fn record(&self, index: usize) -> Option<(&[u8], u64)> {
        if index >= self.num_words {
            return None;
        }
        let off_pos = COUNT_HEADER + index * OFFSET_SIZE;
        let offset =
            u32::from_le_bytes(self.mmap.get(off_pos..off_pos + 4)?.try_into().ok()?) as usize;
        let pos = self.records_start.checked_add(offset)?;
        let term_len = *self.mmap.get(pos)? as usize;
        let term = self.mmap.get(pos + 1..pos + 1 + term_len)?;
        let count_bytes = self.mmap.get(pos + 1 + term_len..pos + 1 + term_len + 8)?;
        Some((term, u64::from_le_bytes(count_bytes.try_into().ok()?)))
    }

    /// First index whose term is >= `key` in byte order.
    fn lower_bound(&self, key: &[u8]) -> usize {
        let mut lo = 0usize;
        let mut hi = self.num_words;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.record(mid) {
                Some((term, _)) if term < key => lo = mid + 1,
                Some(_) => hi = mid,
                // unreadable record: give up on the right half
                None => hi = mid,
            }
        }
        lo
    }

    fn find(&self, term: &[u8]) -> Option<usize> {
        let index = self.lower_bound(term);
        match self.record(index) {
            Some((t, _)) if t == term => Some(index),
            _ => None,
        }
    }
}
