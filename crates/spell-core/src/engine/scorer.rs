//! Suggestion ranking.
//!
//! Scoring is a pure function over the collected survivors: edit distance,
//! unigram frequency and (when a previous word is supplied) bigram context
//! are combined according to the configured `RankingMode`. Ties break by
//! descending count, then ascending term, so output order is reproducible.

use std::cmp::Ordering;

use crate::config::RankingMode;

use super::{SpellEngine, SuggestItem};

/// Tiny bonus for exact matches in the weighted modes. Deliberately small:
/// strong bigram context must be able to overcome it, an exact match only
/// wins ties.
pub(crate) const EXACT_MATCH_BONUS: f64 = 0.01;

/// Distance tier scale for `DistanceFirst`. Dominates any realistic count
/// or bigram term, which keeps distance strictly primary.
pub(crate) const DISTANCE_TIER_SCALE: f64 = 1e9;

/// Bigram boost inside a `DistanceFirst` tier.
pub(crate) const DISTANCE_FIRST_BIGRAM_BOOST: f64 = 10.0;

/// Blend weights for the two normalized modes.
pub(crate) struct RankingWeights {
    pub distance: f64,
    pub frequency: f64,
    pub bigram: f64,
}

pub(crate) const BALANCED_WEIGHTS: RankingWeights = RankingWeights {
    distance: 0.5,
    frequency: 0.3,
    bigram: 0.2,
};

pub(crate) const FREQUENCY_BOOSTED_WEIGHTS: RankingWeights = RankingWeights {
    distance: 0.3,
    frequency: 0.4,
    bigram: 0.3,
};

/// Sort `items` best first under the engine's ranking mode.
pub(super) fn rank(
    engine: &SpellEngine,
    items: &mut Vec<SuggestItem>,
    previous_word: Option<&str>,
) {
    if items.len() <= 1 {
        return;
    }
    let mut scored: Vec<(SuggestItem, f64)> = items
        .drain(..)
        .map(|item| {
            let value = score(engine, &item, previous_word);
            (item, value)
        })
        .collect();
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.0.count.cmp(&a.0.count))
            .then_with(|| a.0.term.cmp(&b.0.term))
    });
    items.extend(scored.into_iter().map(|(item, _)| item));
}

pub(super) fn score(engine: &SpellEngine, item: &SuggestItem, previous_word: Option<&str>) -> f64 {
    let bigram_count = bigram_count(engine, previous_word, &item.term);
    match engine.config.ranking.mode {
        RankingMode::DistanceFirst => {
            let max = engine.max_edit_distance();
            let tier = (max + 1).saturating_sub(item.distance) as f64;
            tier * DISTANCE_TIER_SCALE
                + item.count as f64
                + bigram_count as f64 * DISTANCE_FIRST_BIGRAM_BOOST
        }
        RankingMode::Balanced => weighted_score(engine, item, bigram_count, &BALANCED_WEIGHTS),
        RankingMode::FrequencyBoosted => {
            weighted_score(engine, item, bigram_count, &FREQUENCY_BOOSTED_WEIGHTS)
        }
    }
}

fn weighted_score(
    engine: &SpellEngine,
    item: &SuggestItem,
    bigram_count: u64,
    weights: &RankingWeights,
) -> f64 {
    let exact = if item.distance == 0 {
        EXACT_MATCH_BONUS
    } else {
        0.0
    };
    let distance_penalty = item.distance as f64 / engine.max_edit_distance().max(1) as f64;
    let frequency = normalized_log(item.count, engine.max_word_count);
    let bigram = if bigram_count > 0 {
        normalized_log(bigram_count, engine.max_bigram_count)
    } else {
        0.0
    };
    exact
        + (1.0 - distance_penalty) * weights.distance
        + frequency * weights.frequency
        + bigram * weights.bigram
}

fn normalized_log(count: u64, max_count: u64) -> f64 {
    if max_count == 0 {
        return 0.0;
    }
    ((count + 1) as f64).log10() / ((max_count + 1) as f64).log10()
}

fn bigram_count(engine: &SpellEngine, previous_word: Option<&str>, term: &str) -> u64 {
    match (engine.bigrams.as_ref(), previous_word) {
        (Some(bigrams), Some(previous)) => bigrams.get(&format!("{previous} {term}")),
        _ => 0,
    }
}
