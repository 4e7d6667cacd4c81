//! Direct checks of the scoring formulas across ranking modes.

use super::build_engine;
use crate::config::{RankingMode, SpellConfig};
use crate::engine::scorer::{score, EXACT_MATCH_BONUS};
use crate::engine::SuggestItem;

#[test]
fn distance_first_tiers_dominate_counts() {
    let words = &[("near", 10u64), ("farther", 900_000_000)];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());

    let close = score(&engine, &SuggestItem::new("near", 1, 10), None);
    let frequent = score(&engine, &SuggestItem::new("farther", 2, 900_000_000), None);
    assert!(close > frequent);
}

#[test]
fn distance_first_uses_count_inside_a_tier() {
    let words = &[("aa", 10u64), ("ab", 20)];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());

    let rare = score(&engine, &SuggestItem::new("aa", 1, 10), None);
    let common = score(&engine, &SuggestItem::new("ab", 1, 20), None);
    assert!(common > rare);
}

#[test]
fn exact_match_bonus_is_a_tiebreaker_only() {
    let mut config = SpellConfig::default();
    config.ranking.mode = RankingMode::Balanced;
    let words = &[("same", 100u64), ("tame", 100)];
    let (engine, _dir) = build_engine(words, None, config);

    let exact = score(&engine, &SuggestItem::new("same", 0, 100), None);
    let also_exact = score(&engine, &SuggestItem::new("tame", 0, 100), None);
    assert!((exact - also_exact).abs() < 1e-12);

    // the bonus is exactly the documented epsilon
    let one_edit = score(&engine, &SuggestItem::new("tame", 1, 100), None);
    let distance_share = 0.5 / engine.max_edit_distance() as f64;
    assert!((exact - one_edit - (EXACT_MATCH_BONUS + distance_share)).abs() < 1e-12);
}

#[test]
fn bigram_context_feeds_the_weighted_modes() {
    let mut config = SpellConfig::default();
    config.ranking.mode = RankingMode::FrequencyBoosted;
    let words = &[("quick", 1_000u64), ("quack", 1_000)];
    let bigrams = &[("the quick", 50_000u64)];
    let (engine, _dir) = build_engine(words, Some(bigrams), config);

    let item = SuggestItem::new("quick", 1, 1_000);
    let with_context = score(&engine, &item, Some("the"));
    let without_context = score(&engine, &item, None);
    assert!(with_context > without_context);

    // a term the context never precedes gets no boost
    let other = SuggestItem::new("quack", 1, 1_000);
    let unboosted = score(&engine, &other, Some("the"));
    assert!((unboosted - score(&engine, &other, None)).abs() < 1e-12);
}

#[test]
fn zero_max_count_scores_frequency_as_zero() {
    // an empty dictionary reports max_count 0; scoring must not divide by
    // a zero logarithm
    let mut config = SpellConfig::default();
    config.ranking.mode = RankingMode::Balanced;
    let (engine, _dir) = build_engine(&[], None, config);

    let value = score(&engine, &SuggestItem::new("ghost", 1, 5), None);
    assert!(value.is_finite());
    assert!((value - 0.25).abs() < 1e-12);
}

#[test]
fn frequency_boosted_weighs_frequency_over_distance() {
    let words = &[("rare", 10u64), ("common", 1_000_000)];

    let mut balanced = SpellConfig::default();
    balanced.ranking.mode = RankingMode::Balanced;
    let (engine_b, _dir_b) = build_engine(words, None, balanced);

    let mut boosted = SpellConfig::default();
    boosted.ranking.mode = RankingMode::FrequencyBoosted;
    let (engine_f, _dir_f) = build_engine(words, None, boosted);

    let exact_rare = SuggestItem::new("rare", 0, 10);
    let near_common = SuggestItem::new("common", 1, 1_000_000);

    // balanced keeps the exact rare word ahead; frequency-boosted flips
    assert!(score(&engine_b, &exact_rare, None) > score(&engine_b, &near_common, None));
    assert!(score(&engine_f, &near_common, None) > score(&engine_f, &exact_rare, None));
}
