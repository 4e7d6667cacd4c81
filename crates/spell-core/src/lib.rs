//! Low-memory approximate string matching around a symmetric-delete index.
//!
//! Dictionaries live on disk as memory-mapped binary files (`words.bin`,
//! `deletes.bin`, optional `bigrams.bin` and keyboard layout matrices), so
//! the resident footprint stays small enough for keyboard extensions and
//! similar embeddings. `SpellEngine` answers four queries over noisy input:
//! ranked suggestions for a token, confidence-scored auto-correction,
//! per-token compound correction, and beam-search word segmentation.

#[cfg(not(target_endian = "little"))]
compile_error!("spell-core requires a little-endian platform");

pub mod casing;
pub mod config;
pub mod distance;
pub mod engine;
pub mod keyboard;
pub mod store;

pub use config::{ConfigError, RankingMode, SpellConfig};
pub use engine::{
    Composition, Correction, EngineError, LookupOptions, SegmentOptions, SpellEngine, SuggestItem,
    Verbosity,
};
pub use keyboard::{KeyboardMatrix, Layout};
