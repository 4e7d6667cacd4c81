//! Auto-correction policy: turn ranked suggestions into a yes/no decision
//! with a confidence score.

use tracing::{debug, debug_span};

use super::{SpellEngine, Verbosity};

/// An accepted auto-correction.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub term: String,
    pub confidence: f64,
}

/// Base and slope of the valid-word confidence curve. With the default
/// cap (0.6) below the default threshold (0.75) this path only fires when
/// the caller lowers the threshold explicitly.
const VALID_WORD_BASE_CONFIDENCE: f64 = 0.3;
const VALID_WORD_RATIO_SLOPE: f64 = 0.003;

pub(super) fn run(
    engine: &SpellEngine,
    word: &str,
    min_confidence: Option<f64>,
) -> Option<Correction> {
    let _span = debug_span!("auto_correction", word).entered();
    if word.is_empty() {
        return None;
    }
    let policy = &engine.config.autocorrect;
    let min_confidence = min_confidence.unwrap_or(policy.min_confidence);

    let suggestions = engine.lookup(word, Verbosity::All);
    if suggestions.is_empty() {
        return None;
    }

    let word_count = engine.words.get(word);
    if word_count > 0 {
        // the word is already valid: only a much more frequent neighbor at
        // distance 1 may replace it
        let alternative = suggestions
            .iter()
            .find(|s| s.distance >= 1 && s.term != word)?;
        if alternative.distance != 1 {
            return None;
        }
        let ratio = alternative.count as f64 / word_count.max(1) as f64;
        if ratio < policy.valid_word_min_freq_ratio {
            return None;
        }
        let confidence = (VALID_WORD_BASE_CONFIDENCE + VALID_WORD_RATIO_SLOPE * ratio)
            .min(policy.valid_word_max_confidence);
        debug!(term = %alternative.term, confidence, "valid word replacement");
        return (confidence >= min_confidence).then(|| Correction {
            term: alternative.term.clone(),
            confidence,
        });
    }

    let top = &suggestions[0];
    let mut confidence = 1.0 - policy.distance_penalty_per_edit * top.distance as f64;

    if let Some(second) = suggestions
        .iter()
        .skip(1)
        .find(|s| s.distance == top.distance)
    {
        let total = top.count + second.count;
        if total > 0 {
            let ratio = top.count as f64 / total as f64;
            confidence -= (1.0 - ratio) * policy.ambiguity_mult;
        }
    }

    let word_len = word.chars().count();
    if word_len < policy.short_word_threshold {
        confidence -=
            (policy.short_word_threshold - word_len) as f64 * policy.short_word_penalty_per_char;
    }
    if top.count > policy.high_freq_threshold {
        confidence += policy.high_freq_bonus;
    }
    let confidence = confidence.clamp(0.0, 1.0);

    debug!(term = %top.term, confidence);
    (confidence >= min_confidence).then(|| Correction {
        term: top.term.clone(),
        confidence,
    })
}
