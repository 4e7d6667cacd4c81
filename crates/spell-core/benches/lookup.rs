use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

use spell_core::{SpellConfig, SpellEngine, Verbosity};

fn bench_engine() -> (SpellEngine, TempDir) {
    let words: Vec<(String, u64)> = [
        ("the", 22_038_615u64),
        ("of", 12_545_825),
        ("and", 10_741_073),
        ("to", 10_343_885),
        ("in", 8_469_404),
        ("a", 7_987_437),
        ("is", 4_705_743),
        ("quick", 942_535),
        ("quack", 19_459),
        ("brown", 648_509),
        ("fox", 325_362),
        ("jumps", 82_247),
        ("over", 1_723_584),
        ("lazy", 141_533),
        ("dog", 915_910),
        ("together", 694_514),
        ("get", 1_972_191),
        ("her", 2_051_626),
        ("hello", 300_434),
        ("help", 1_029_737),
        ("held", 342_762),
        ("world", 964_311),
        ("wonder", 152_411),
        ("how", 3_546_732),
        ("bow", 49_903),
        ("their", 2_871_467),
        ("there", 3_251_084),
        ("these", 1_962_579),
    ]
    .iter()
    .map(|(t, c)| (t.to_string(), *c))
    .collect();

    let bigrams: Vec<(String, u64)> = [
        ("the quick", 51_610u64),
        ("quick brown", 9_566),
        ("brown fox", 7_722),
        ("fox jumps", 2_120),
        ("jumps over", 1_930),
        ("over the", 736_714),
        ("the lazy", 8_622),
        ("lazy dog", 2_130),
        ("wonder how", 48_819),
    ]
    .iter()
    .map(|(t, c)| (t.to_string(), *c))
    .collect();

    let dir = tempfile::tempdir().unwrap();
    let engine = SpellEngine::build(SpellConfig::default(), words, Some(bigrams), dir.path())
        .expect("engine build");
    (engine, dir)
}

static INPUTS: &[(&str, &str)] = &[
    ("exact", "quick"),
    ("one_edit", "quik"),
    ("two_edits", "qiuckk"),
    ("unknown", "zzyzzxy"),
];

fn bench_lookup(c: &mut Criterion) {
    let (engine, _dir) = bench_engine();
    for verbosity in [Verbosity::Top, Verbosity::Closest, Verbosity::All] {
        let mut group = c.benchmark_group(format!("lookup/{verbosity:?}"));
        for &(label, phrase) in INPUTS {
            group.bench_with_input(BenchmarkId::new(label, phrase.len()), &phrase, |b, &p| {
                b.iter(|| engine.lookup(p, verbosity));
            });
        }
        group.finish();
    }
}

fn bench_segment(c: &mut Criterion) {
    let (engine, _dir) = bench_engine();
    let mut group = c.benchmark_group("segment");
    for &(label, phrase) in &[
        ("short", "thequick"),
        ("medium", "thequickbrownfox"),
        ("long", "thequickbrownfoxjumpsoverthelazydog"),
    ] {
        group.bench_with_input(BenchmarkId::new(label, phrase.len()), &phrase, |b, &p| {
            b.iter(|| engine.segment(p));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup, bench_segment);
criterion_main!(benches);
