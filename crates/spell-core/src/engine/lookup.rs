//! Candidate generation and filtering for single-token lookup.
//!
//! A query's own prefix deletes are matched against the precomputed delete
//! index; shared keys nominate dictionary words, which are verified with
//! the (optionally keyboard-weighted) edit distance and kept according to
//! the verbosity policy. Scoring happens afterwards in `scorer`.

use std::borrow::Cow;
use std::cmp::Ordering;

use ahash::AHashSet;
use tracing::{debug, debug_span};

use crate::casing;
use crate::distance::EditDistance;

use super::{scorer, SpellEngine};

/// Controls how many of the surviving suggestions a lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// The single best suggestion.
    Top,
    /// All suggestions at the smallest edit distance found.
    Closest,
    /// Every suggestion within the edit distance bound.
    All,
}

/// A ranked suggestion. Equality is by term; the natural order is
/// ascending distance, then descending count, then term.
#[derive(Debug, Clone)]
pub struct SuggestItem {
    pub term: String,
    pub distance: usize,
    pub count: u64,
}

impl SuggestItem {
    pub fn new(term: impl Into<String>, distance: usize, count: u64) -> Self {
        Self {
            term: term.into(),
            distance,
            count,
        }
    }
}

impl PartialEq for SuggestItem {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}

impl Eq for SuggestItem {}

impl Ord for SuggestItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for SuggestItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Optional lookup behavior; the default is a plain case-sensitive lookup
/// at the engine's maximum edit distance.
#[derive(Debug, Clone, Default)]
pub struct LookupOptions<'a> {
    /// Tighter bound for this call, clamped to the engine maximum.
    pub max_edit_distance: Option<usize>,
    /// Return the input itself (distance `max + 1`, count 0) when nothing
    /// matches.
    pub include_unknown: bool,
    /// Lowercase the input for matching and mirror its casing class onto
    /// the results.
    pub transfer_casing: bool,
    /// Previous word for bigram-aware ranking. Collection then keeps every
    /// survivor so context may promote a non-exact alternative.
    pub previous_word: Option<&'a str>,
}

pub(super) fn run(
    engine: &SpellEngine,
    phrase: &str,
    verbosity: Verbosity,
    options: &LookupOptions<'_>,
) -> Vec<SuggestItem> {
    let _span = debug_span!("lookup", phrase, ?verbosity).entered();
    if phrase.is_empty() {
        return Vec::new();
    }

    let max = options
        .max_edit_distance
        .map(|m| m.min(engine.max_edit_distance()))
        .unwrap_or(engine.max_edit_distance());

    let search: Cow<'_, str> = if options.transfer_casing {
        Cow::Owned(phrase.to_lowercase())
    } else {
        Cow::Borrowed(phrase)
    };
    let search = search.as_ref();
    let phrase_chars: Vec<char> = search.chars().collect();
    let phrase_len = phrase_chars.len();
    let prefix_length = engine.config.engine.prefix_length;

    let mut suggestions: Vec<SuggestItem> = Vec::new();
    let mut current_max = max;

    let exact_count = engine.words.get(search);
    if exact_count > 0 {
        suggestions.push(SuggestItem::new(search, 0, exact_count));
        if verbosity != Verbosity::All && options.previous_word.is_none() {
            return finish(engine, phrase, verbosity, options, max, suggestions);
        }
        if options.previous_word.is_some() {
            // distance-2 alternatives cannot unseat an exact match by
            // context alone
            current_max = current_max.min(1);
        }
    }
    if max == 0 {
        return finish(engine, phrase, verbosity, options, max, suggestions);
    }

    // terms already verified (or rejected) by the distance check
    let mut considered: AHashSet<String> = AHashSet::new();
    considered.insert(search.to_string());
    // delete strings already enqueued as candidates
    let mut generated: AHashSet<String> = AHashSet::new();

    let input_prefix_len = phrase_len.min(prefix_length);
    let seed: String = phrase_chars[..input_prefix_len].iter().collect();
    generated.insert(seed.clone());
    let mut candidates: Vec<String> = vec![seed];

    // with bigram context the loop collects like All and the scorer
    // decides the final order
    let collect_all = verbosity == Verbosity::All || options.previous_word.is_some();

    let mut edit_distance = EditDistance::new();
    let mut head = 0;
    while head < candidates.len() {
        let candidate = std::mem::take(&mut candidates[head]);
        head += 1;
        let candidate_len = candidate.chars().count();
        let length_diff = input_prefix_len - candidate_len;

        // candidates are enqueued in delete order, so once the delete
        // depth alone exceeds the bound nothing closer can follow
        if length_diff > current_max {
            if collect_all {
                continue;
            }
            break;
        }

        for ordinal in engine.deletes.get(&candidate) {
            // out-of-range or unreadable ordinals are dropped silently
            let Some((sugg, count)) = engine.words.at(ordinal as usize) else {
                continue;
            };
            if sugg == search {
                continue;
            }
            let sugg_len = sugg.chars().count();
            if sugg_len.abs_diff(phrase_len) > current_max
                || sugg_len < candidate_len
                || (sugg_len == candidate_len && sugg != candidate)
            {
                continue;
            }
            if !considered.insert(sugg.clone()) {
                continue;
            }

            let distance = if candidate_len == 0 {
                // the empty key nominates whole short words that share no
                // prefix characters with the input
                Some(phrase_len.max(sugg_len))
            } else {
                edit_distance.distance(search, &sugg, current_max, engine.keyboard.as_ref())
            };
            let Some(distance) = distance else {
                continue;
            };
            if distance > current_max {
                continue;
            }

            let item = SuggestItem::new(sugg, distance, count);
            if collect_all {
                suggestions.push(item);
                continue;
            }
            match verbosity {
                Verbosity::Top => {
                    if let Some(best) = suggestions.first_mut() {
                        if distance < best.distance
                            || (distance == best.distance && item.count > best.count)
                        {
                            current_max = distance;
                            *best = item;
                        }
                    } else {
                        current_max = distance;
                        suggestions.push(item);
                    }
                }
                Verbosity::Closest => {
                    if let Some(best_distance) = suggestions.first().map(|s| s.distance) {
                        if distance < best_distance {
                            suggestions.clear();
                        }
                    }
                    current_max = distance;
                    suggestions.push(item);
                }
                Verbosity::All => unreachable!("All collects through collect_all"),
            }
        }

        // derive one more round of deletes from this candidate; deleting
        // from a single character yields the empty key, which nominates
        // whole short words
        if length_diff < max && candidate_len <= prefix_length {
            if !collect_all && length_diff >= current_max {
                continue;
            }
            let chars: Vec<char> = candidate.chars().collect();
            for skip in 0..chars.len() {
                let delete: String = chars
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, c)| c)
                    .collect();
                if generated.insert(delete.clone()) {
                    candidates.push(delete);
                }
            }
        }
    }

    finish(engine, phrase, verbosity, options, max, suggestions)
}

fn finish(
    engine: &SpellEngine,
    phrase: &str,
    verbosity: Verbosity,
    options: &LookupOptions<'_>,
    max: usize,
    mut suggestions: Vec<SuggestItem>,
) -> Vec<SuggestItem> {
    scorer::rank(engine, &mut suggestions, options.previous_word);
    if options.previous_word.is_some() && verbosity == Verbosity::Top {
        suggestions.truncate(1);
    }
    if suggestions.is_empty() && options.include_unknown {
        suggestions.push(SuggestItem::new(phrase, max + 1, 0));
    }
    if options.transfer_casing {
        for suggestion in &mut suggestions {
            suggestion.term = casing::transfer_case(phrase, &suggestion.term);
        }
    }
    debug!(count = suggestions.len());
    suggestions
}
