use super::build_engine;
use crate::config::SpellConfig;
use crate::engine::{LookupOptions, Verbosity};

fn hello_dict() -> &'static [(&'static str, u64)] {
    &[
        ("hello", 1000),
        ("world", 900),
        ("help", 800),
        ("held", 700),
    ]
}

#[test]
fn single_typo_finds_top_suggestion() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    let results = engine.lookup("helo", Verbosity::Top);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].term, "hello");
    assert_eq!(results[0].distance, 1);
    assert_eq!(results[0].count, 1000);
}

#[test]
fn exact_match_is_first_with_distance_zero() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    for verbosity in [Verbosity::Top, Verbosity::Closest, Verbosity::All] {
        let results = engine.lookup("hello", verbosity);
        assert_eq!(results[0].term, "hello");
        assert_eq!(results[0].distance, 0);
        assert_eq!(results[0].count, 1000);
    }
}

#[test]
fn verbosity_controls_result_set() {
    let words = &[("steam", 100u64), ("steams", 200), ("steem", 150)];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());

    assert_eq!(engine.lookup("steems", Verbosity::Top).len(), 1);
    assert_eq!(engine.lookup("steems", Verbosity::Closest).len(), 2);
    assert_eq!(engine.lookup("steems", Verbosity::All).len(), 3);
}

#[test]
fn closest_returns_only_the_smallest_distance() {
    let words = &[("steam", 100u64), ("steams", 200), ("steem", 150)];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());
    let results = engine.lookup("steems", Verbosity::Closest);
    assert!(results.iter().all(|s| s.distance == 1));
    // ties inside the distance tier break by count
    assert_eq!(results[0].term, "steams");
}

#[test]
fn verbosity_monotonicity() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    for phrase in ["helo", "hel", "hello", "hxlp"] {
        let top = engine.lookup(phrase, Verbosity::Top).len();
        let closest = engine.lookup(phrase, Verbosity::Closest).len();
        let all = engine.lookup(phrase, Verbosity::All).len();
        assert!(top <= closest, "{phrase}: {top} <= {closest}");
        assert!(closest <= all, "{phrase}: {closest} <= {all}");
    }
}

#[test]
fn empty_input_returns_empty() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    assert!(engine.lookup("", Verbosity::All).is_empty());
}

#[test]
fn unmatched_input_returns_empty_without_include_unknown() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    assert!(engine.lookup("zzzzzzz", Verbosity::All).is_empty());
}

#[test]
fn include_unknown_passes_the_input_through() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    let options = LookupOptions {
        include_unknown: true,
        ..LookupOptions::default()
    };
    let results = engine.lookup_with("zzzzzzz", Verbosity::Top, &options);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].term, "zzzzzzz");
    assert_eq!(results[0].distance, engine.max_edit_distance() + 1);
    assert_eq!(results[0].count, 0);
}

#[test]
fn max_edit_distance_zero_only_reports_exact() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    let options = LookupOptions {
        max_edit_distance: Some(0),
        ..LookupOptions::default()
    };
    let exact = engine.lookup_with("hello", Verbosity::All, &options);
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].distance, 0);
    assert!(engine
        .lookup_with("helo", Verbosity::All, &options)
        .is_empty());
}

#[test]
fn override_is_clamped_to_engine_maximum() {
    let words = &[("steam", 100u64), ("steams", 200), ("steem", 150)];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());
    let options = LookupOptions {
        max_edit_distance: Some(99),
        ..LookupOptions::default()
    };
    let results = engine.lookup_with("steems", Verbosity::All, &options);
    assert!(results.iter().all(|s| s.distance <= 2));
    assert_eq!(results.len(), 3);
}

#[test]
fn transfer_casing_mirrors_the_source() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    let options = LookupOptions {
        transfer_casing: true,
        ..LookupOptions::default()
    };
    let title = engine.lookup_with("Helo", Verbosity::Top, &options);
    assert_eq!(title[0].term, "Hello");
    let upper = engine.lookup_with("HELO", Verbosity::Top, &options);
    assert_eq!(upper[0].term, "HELLO");
    // exact match keeps the source casing too
    let exact = engine.lookup_with("HELLO", Verbosity::Top, &options);
    assert_eq!(exact[0].term, "HELLO");
    assert_eq!(exact[0].distance, 0);
}

#[test]
fn short_words_are_reachable_through_the_empty_key() {
    let words = &[("at", 9000u64), ("to", 8000), ("cat", 500)];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());
    // "xy" shares no characters with "at"; only the empty key nominates it
    let results = engine.lookup("xy", Verbosity::All);
    assert!(results.iter().any(|s| s.term == "at" && s.distance == 2));
}

#[test]
fn suggestions_never_include_the_input_itself_twice() {
    let (engine, _dir) = build_engine(hello_dict(), None, SpellConfig::default());
    let results = engine.lookup("hello", Verbosity::All);
    let hits = results.iter().filter(|s| s.term == "hello").count();
    assert_eq!(hits, 1);
}

#[test]
fn prefix_lookup_ranks_by_frequency() {
    let words = &[
        ("held", 1_500u64),
        ("hello", 20_000),
        ("help", 12_000),
        ("helm", 800),
    ];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());
    let results = engine.prefix_lookup("hel", 5, None);
    // floor for a 3-char prefix is 1000: helm drops out
    let terms: Vec<&str> = results.iter().map(|s| s.term.as_str()).collect();
    assert_eq!(terms, ["hello", "help", "held"]);
    assert!(results.iter().all(|s| s.distance == 0));
}

#[test]
fn prefix_lookup_explicit_floor_wins() {
    let words = &[("hello", 20_000u64), ("help", 12_000), ("helm", 800)];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());
    let results = engine.prefix_lookup("hel", 5, Some(1));
    assert_eq!(results.len(), 3);
    let results = engine.prefix_lookup("hel", 2, Some(1));
    assert_eq!(results.len(), 2);
}

#[test]
fn prefix_lookup_adaptive_floor_by_length() {
    let words = &[
        ("ab", 9_000u64),
        ("abacus", 50),
        ("abandon", 20_000),
        ("abandons", 15),
    ];
    let (engine, _dir) = build_engine(words, None, SpellConfig::default());
    // two-char prefix needs 10k
    let terms: Vec<String> = engine
        .prefix_lookup("ab", 5, None)
        .into_iter()
        .map(|s| s.term)
        .collect();
    assert_eq!(terms, ["abandon"]);
    // five-char prefix needs only 10
    let terms: Vec<String> = engine
        .prefix_lookup("aband", 5, None)
        .into_iter()
        .map(|s| s.term)
        .collect();
    assert_eq!(terms, ["abandon", "abandons"]);
}
