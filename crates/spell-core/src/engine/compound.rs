//! Per-token correction of a whitespace-split phrase.
//!
//! The simple phrase path: each token gets its top suggestion and the
//! results are joined back with single spaces. Tokens are never merged or
//! split; the segmenter handles missing spaces.

use tracing::{debug, debug_span};

use super::{LookupOptions, SpellEngine, SuggestItem, Verbosity};

pub(super) fn run(
    engine: &SpellEngine,
    phrase: &str,
    max_edit_distance: Option<usize>,
    transfer_casing: bool,
) -> SuggestItem {
    let _span = debug_span!("lookup_compound", phrase).entered();
    let max = max_edit_distance
        .map(|m| m.min(engine.max_edit_distance()))
        .unwrap_or(engine.max_edit_distance());

    let options = LookupOptions {
        max_edit_distance: Some(max),
        transfer_casing,
        ..LookupOptions::default()
    };

    let mut terms: Vec<String> = Vec::new();
    let mut distance_sum = 0usize;
    // the phrase can be no more frequent than its rarest word
    let mut min_count = u64::MAX;

    for token in phrase.split_whitespace() {
        match engine
            .lookup_with(token, Verbosity::Top, &options)
            .into_iter()
            .next()
        {
            Some(best) => {
                distance_sum += best.distance;
                min_count = min_count.min(best.count);
                terms.push(best.term);
            }
            None => {
                distance_sum += max + 1;
                min_count = 0;
                terms.push(token.to_string());
            }
        }
    }

    if terms.is_empty() {
        return SuggestItem::new("", 0, 0);
    }
    let count = if min_count == u64::MAX { 0 } else { min_count };
    debug!(distance_sum, tokens = terms.len());
    SuggestItem::new(terms.join(" "), distance_sum, count)
}
