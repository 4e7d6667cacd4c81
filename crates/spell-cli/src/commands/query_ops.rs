use std::path::Path;
use std::process;

use spell_core::{
    LookupOptions, SegmentOptions, SpellConfig, SpellEngine, Verbosity,
};

use crate::commands::die;

/// Engine knobs shared by all query commands.
pub struct QueryOptions {
    pub max_edit_distance: Option<usize>,
    pub keyboard_layout: Option<String>,
}

fn open_engine(data_dir: &str, options: &QueryOptions) -> SpellEngine {
    let mut config = SpellConfig::default();
    if let Some(layout) = &options.keyboard_layout {
        config.engine.keyboard_layout = Some(layout.parse().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }));
    }
    die!(
        SpellEngine::open(config, Path::new(data_dir)),
        "Error opening {data_dir}: {}"
    )
}

fn parse_verbosity(value: &str) -> Verbosity {
    match value {
        "top" => Verbosity::Top,
        "closest" => Verbosity::Closest,
        "all" => Verbosity::All,
        other => {
            eprintln!("Error: unknown verbosity '{other}' (top, closest, all)");
            process::exit(1);
        }
    }
}

pub fn lookup(
    data_dir: &str,
    phrase: &str,
    verbosity: &str,
    previous_word: Option<&str>,
    options: &QueryOptions,
) {
    let engine = open_engine(data_dir, options);
    let lookup_options = LookupOptions {
        max_edit_distance: options.max_edit_distance,
        previous_word,
        ..LookupOptions::default()
    };
    let results = engine.lookup_with(phrase, parse_verbosity(verbosity), &lookup_options);
    if results.is_empty() {
        println!("(no suggestions)");
    }
    for item in results {
        println!("{} {} {}", item.term, item.distance, item.count);
    }
}

pub fn prefix(data_dir: &str, prefix: &str, limit: usize, min_frequency: Option<u64>, options: &QueryOptions) {
    let engine = open_engine(data_dir, options);
    for item in engine.prefix_lookup(prefix, limit, min_frequency) {
        println!("{} {}", item.term, item.count);
    }
}

pub fn autocorrect(data_dir: &str, word: &str, min_confidence: Option<f64>, options: &QueryOptions) {
    let engine = open_engine(data_dir, options);
    match engine.auto_correction(word, min_confidence) {
        Some(correction) => println!("{} {:.3}", correction.term, correction.confidence),
        None => println!("(keep) {word}"),
    }
}

pub fn compound(data_dir: &str, phrase: &str, options: &QueryOptions) {
    let engine = open_engine(data_dir, options);
    let result = engine.lookup_compound(phrase, options.max_edit_distance, false);
    println!("{} (distance {})", result.term, result.distance);
}

pub fn segment(
    data_dir: &str,
    phrase: &str,
    beam_width: Option<usize>,
    max_segment_len: Option<usize>,
    options: &QueryOptions,
) {
    let engine = open_engine(data_dir, options);
    let segment_options = SegmentOptions {
        max_edit_distance: options.max_edit_distance,
        beam_width,
        max_segment_len,
    };
    let composition = engine.segment_with(phrase, &segment_options);
    println!("segmented: {}", composition.segmented);
    println!("corrected: {}", composition.corrected);
    println!(
        "distance {} log-prob {:.3}",
        composition.distance_sum, composition.log_prob_sum
    );
}
