//! Joint word segmentation and correction via beam search.
//!
//! Hypotheses consume the input left to right; each step proposes every
//! segment length with up to three correction candidates per segment and
//! gates continuations on bigram evidence. The aggressive edit penalty
//! plus the bigram gate keep pathological single-letter splittings out of
//! the beam, and the exact-match length bonus steers the first word away
//! from splits like "to get her" for "together".

use std::cmp::Ordering;

use tracing::{debug, debug_span};

use crate::store::WordStore;

use super::{lookup, LookupOptions, SpellEngine, Verbosity};

/// Segmenter result: the original segments and the corrected words, both
/// space-joined, with the accumulated edit distance and log-probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub segmented: String,
    pub corrected: String,
    pub distance_sum: usize,
    pub log_prob_sum: f64,
}

/// Optional segmenter behavior; the defaults come from the engine config.
#[derive(Debug, Clone, Default)]
pub struct SegmentOptions {
    pub max_edit_distance: Option<usize>,
    pub beam_width: Option<usize>,
    pub max_segment_len: Option<usize>,
}

/// Reported when no bigram store is loaded or no hypothesis completes.
const NO_SEGMENTATION_LOG_PROB: f64 = -50.0;
/// A final exact-match segment may close a hypothesis without bigram
/// evidence, at this log-probability.
const TERMINAL_FALLBACK_LOG_PROB: f64 = -5.0;
/// First-word bonus per character for exact matches longer than
/// `FIRST_WORD_BONUS_MIN_LEN`.
const EXACT_LENGTH_BONUS: f64 = 0.5;
const FIRST_WORD_BONUS_MIN_LEN: usize = 3;
/// A segmentation must beat the single-word reading by this factor on
/// average per-word score to win over a valid dictionary word.
const SINGLE_WORD_MARGIN: f64 = 0.8;
const MAX_CANDIDATES_PER_SEGMENT: usize = 3;
/// Segments shorter than this get no fuzzy lookup, only exact matches.
const MIN_FUZZY_SEGMENT_LEN: usize = 3;

#[derive(Debug, Clone)]
struct Hypothesis {
    words: Vec<String>,
    segments: Vec<String>,
    position: usize,
    edit_distance: usize,
    log_prob: f64,
}

impl Hypothesis {
    fn empty() -> Self {
        Self {
            words: Vec::new(),
            segments: Vec::new(),
            position: 0,
            edit_distance: 0,
            log_prob: 0.0,
        }
    }

    fn score(&self, edit_penalty: f64) -> f64 {
        self.log_prob - self.edit_distance as f64 * edit_penalty
    }
}

struct SegmentCandidate {
    term: String,
    distance: usize,
    count: u64,
}

pub(super) fn run(engine: &SpellEngine, phrase: &str, options: &SegmentOptions) -> Composition {
    let _span = debug_span!("segment", phrase).entered();
    let settings = &engine.config.segmenter;
    let beam_width = options.beam_width.unwrap_or(settings.beam_width).max(1);
    let max_segment_len = options
        .max_segment_len
        .unwrap_or(settings.max_segment_len)
        .max(1);
    let max_edit = options
        .max_edit_distance
        .map(|m| m.min(engine.max_edit_distance()))
        .unwrap_or(engine.max_edit_distance());
    let edit_penalty = settings.edit_penalty;

    let Some(bigrams) = engine.bigrams.as_ref() else {
        return Composition {
            segmented: phrase.to_string(),
            corrected: phrase.to_string(),
            distance_sum: 0,
            log_prob_sum: NO_SEGMENTATION_LOG_PROB,
        };
    };

    let input: String = phrase
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let chars: Vec<char> = input.chars().collect();
    let total = chars.len();
    if total == 0 {
        return Composition {
            segmented: String::new(),
            corrected: String::new(),
            distance_sum: 0,
            log_prob_sum: 0.0,
        };
    }

    let mut beam: Vec<Hypothesis> = vec![Hypothesis::empty()];
    while beam.iter().any(|h| h.position < total) {
        let mut next: Vec<Hypothesis> = Vec::new();
        for hypothesis in &beam {
            if hypothesis.position >= total {
                next.push(hypothesis.clone());
                continue;
            }
            let remaining = total - hypothesis.position;
            for length in 1..=max_segment_len.min(remaining) {
                let segment: String = chars[hypothesis.position..hypothesis.position + length]
                    .iter()
                    .collect();
                let is_terminal = length == remaining;
                for candidate in segment_candidates(engine, &segment, length, max_edit) {
                    if let Some(extended) =
                        extend(bigrams, hypothesis, &segment, length, &candidate, is_terminal)
                    {
                        next.push(extended);
                    }
                }
            }
        }
        if next.is_empty() {
            break;
        }
        next.sort_by(|a, b| {
            b.score(edit_penalty)
                .partial_cmp(&a.score(edit_penalty))
                .unwrap_or(Ordering::Equal)
        });
        next.truncate(beam_width);
        beam = next;
    }

    let best = beam
        .iter()
        .filter(|h| h.position >= total)
        .max_by(|a, b| {
            a.score(edit_penalty)
                .partial_cmp(&b.score(edit_penalty))
                .unwrap_or(Ordering::Equal)
        });

    // a valid single word beats a segmentation unless the split is clearly
    // better: clean (no edits), multi-word, and ahead on average score
    let single_count = engine.words.get(&input);
    if single_count > 0 {
        let single_score = ((single_count + 1) as f64).ln();
        let clearly_better = best.is_some_and(|b| {
            b.words.len() > 1
                && b.edit_distance == 0
                && single_score < (b.log_prob / b.words.len() as f64) * SINGLE_WORD_MARGIN
        });
        if !clearly_better {
            debug!(single_word = true);
            return Composition {
                segmented: input.clone(),
                corrected: input,
                distance_sum: 0,
                log_prob_sum: single_score,
            };
        }
    }

    match best {
        Some(b) => {
            debug!(words = b.words.len(), distance = b.edit_distance);
            Composition {
                segmented: b.segments.join(" "),
                corrected: b.words.join(" "),
                distance_sum: b.edit_distance,
                log_prob_sum: b.log_prob,
            }
        }
        None => Composition {
            segmented: input.clone(),
            corrected: input,
            distance_sum: 0,
            log_prob_sum: NO_SEGMENTATION_LOG_PROB,
        },
    }
}

/// Correction candidates for one segment: the exact match first, then
/// fuzzy matches for segments long enough to correct, capped at three.
/// A segment nothing matches yields itself as a last resort priced past
/// the edit budget.
fn segment_candidates(
    engine: &SpellEngine,
    segment: &str,
    length: usize,
    max_edit: usize,
) -> Vec<SegmentCandidate> {
    let mut candidates: Vec<SegmentCandidate> = Vec::new();

    let exact_count = engine.words.get(segment);
    if exact_count > 0 {
        candidates.push(SegmentCandidate {
            term: segment.to_string(),
            distance: 0,
            count: exact_count,
        });
    }

    if length >= MIN_FUZZY_SEGMENT_LEN {
        let options = LookupOptions {
            max_edit_distance: Some(max_edit),
            ..LookupOptions::default()
        };
        for suggestion in lookup::run(engine, segment, Verbosity::Closest, &options) {
            if suggestion.term.chars().count().abs_diff(length) > max_edit {
                continue;
            }
            if candidates.iter().any(|c| c.term == suggestion.term) {
                continue;
            }
            candidates.push(SegmentCandidate {
                term: suggestion.term,
                distance: suggestion.distance,
                count: suggestion.count,
            });
        }
    }

    candidates.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| b.count.cmp(&a.count))
    });
    candidates.truncate(MAX_CANDIDATES_PER_SEGMENT);

    if candidates.is_empty() {
        candidates.push(SegmentCandidate {
            term: segment.to_string(),
            distance: max_edit + 1,
            count: 0,
        });
    }
    candidates
}

/// Extend a hypothesis by one corrected segment, or reject it when the
/// bigram gate fails.
fn extend(
    bigrams: &WordStore,
    hypothesis: &Hypothesis,
    segment: &str,
    length: usize,
    candidate: &SegmentCandidate,
    is_terminal: bool,
) -> Option<Hypothesis> {
    let contribution = match hypothesis.words.last() {
        Some(previous) => {
            let bigram_count = bigrams.get(&format!("{previous} {}", candidate.term));
            if bigram_count > 0 {
                ((bigram_count + 1) as f64).ln()
            } else if is_terminal && candidate.distance == 0 {
                TERMINAL_FALLBACK_LOG_PROB
            } else {
                return None;
            }
        }
        None => {
            let mut log_prob = ((candidate.count + 1) as f64).ln();
            if candidate.distance == 0 && length > FIRST_WORD_BONUS_MIN_LEN {
                log_prob += EXACT_LENGTH_BONUS * length as f64;
            }
            log_prob
        }
    };

    let mut extended = hypothesis.clone();
    extended.words.push(candidate.term.clone());
    extended.segments.push(segment.to_string());
    extended.position += length;
    extended.edit_distance += candidate.distance;
    extended.log_prob += contribution;
    Some(extended)
}
