//! Memory-mapped dictionary storage.
//!
//! `WordStore` is a sorted term → count map backed by `words.bin` (the same
//! layout backs `bigrams.bin`). `DeleteIndex` maps delete keys to word
//! ordinals, backed by `deletes.bin`. Both are written offline by `builder`
//! and opened read-only through a shared mmap; random-access reads never
//! fail, they degrade to zero counts or empty lists.

mod cache;
mod delete_index;
mod word_store;
mod word_store_io;

pub mod builder;

#[cfg(test)]
mod tests;

pub use delete_index::DeleteIndex;
pub use word_store::WordStore;

use std::io;

pub const WORDS_FILE: &str = "words.bin";
pub const DELETES_FILE: &str = "deletes.bin";
pub const BIGRAMS_FILE: &str = "bigrams.bin";

/// Unified error type for dictionary and keyboard-matrix binary I/O.
///
/// Only construction (open) and offline build paths return these; once a
/// store is open, reads are infallible by contract.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("truncated file")]
    Truncated,

    #[error("{0}")]
    Parse(String),
}
