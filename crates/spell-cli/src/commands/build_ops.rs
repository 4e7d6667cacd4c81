use std::fs;
use std::path::Path;
use std::process;

use spell_core::keyboard::{KeyboardMatrix, Layout};
use spell_core::store::builder::DictBuilder;
use spell_core::store::{DeleteIndex, WordStore, BIGRAMS_FILE, DELETES_FILE, WORDS_FILE};

use crate::commands::die;
use crate::dict_source;

pub struct BuildOptions {
    pub max_edit_distance: usize,
    pub prefix_length: usize,
    pub top_n: Option<usize>,
}

pub fn build(dictionary: &str, bigrams: Option<&str>, output_dir: &str, options: &BuildOptions) {
    let output = Path::new(output_dir);
    die!(fs::create_dir_all(output), "Error creating {output_dir}: {}");

    let parsed = die!(
        dict_source::parse_unigrams(Path::new(dictionary)),
        "Error reading {dictionary}: {}"
    );
    if parsed.skipped > 0 {
        eprintln!("Skipped {} malformed lines in {dictionary}", parsed.skipped);
    }
    eprintln!("Building index from {} words...", parsed.entries.len());

    let mut builder = DictBuilder::new(options.max_edit_distance, options.prefix_length);
    if let Some(n) = options.top_n {
        builder = builder.top_n(n);
    }
    die!(
        builder.build(parsed.entries, output),
        "Error writing dictionary: {}"
    );

    if let Some(bigram_path) = bigrams {
        let parsed = die!(
            dict_source::parse_bigrams(Path::new(bigram_path)),
            "Error reading {bigram_path}: {}"
        );
        if parsed.skipped > 0 {
            eprintln!("Skipped {} malformed lines in {bigram_path}", parsed.skipped);
        }
        eprintln!("Building bigram store from {} pairs...", parsed.entries.len());
        die!(
            builder.build_bigrams(parsed.entries, output),
            "Error writing bigrams: {}"
        );
    }

    let mut total = 0u64;
    for name in [WORDS_FILE, DELETES_FILE, BIGRAMS_FILE] {
        let path = output.join(name);
        if let Ok(meta) = fs::metadata(&path) {
            total += meta.len();
            eprintln!("  {name}: {}", human_size(meta.len()));
        }
    }
    eprintln!("Wrote {output_dir} ({})", human_size(total));
}

pub fn keyboard(layout: &str, output_dir: &str) {
    let output = Path::new(output_dir);
    die!(fs::create_dir_all(output), "Error creating {output_dir}: {}");

    let layouts: Vec<Layout> = if layout == "all" {
        Layout::ALL.to_vec()
    } else {
        vec![layout.parse().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        })]
    };

    for layout in layouts {
        let path = output.join(layout.file_name());
        die!(
            KeyboardMatrix::generate(layout).save(&path),
            "Error writing keyboard matrix: {}"
        );
        let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        eprintln!("  {} ({size} bytes)", path.display());
    }
}

pub fn info(file: &str) {
    let path = Path::new(file);
    let magic = fs::read(path)
        .ok()
        .and_then(|b| b.get(..4).map(|m| m.to_vec()));

    match magic.as_deref() {
        Some(b"KYBD") => {
            let matrix = die!(KeyboardMatrix::open(path), "Error opening {file}: {}");
            let mut adjacent = 0usize;
            for a in 'a'..='z' {
                for b in 'a'..='z' {
                    if a != b && matrix.distance(a, b) == 1 {
                        adjacent += 1;
                    }
                }
            }
            println!("keyboard matrix: {adjacent} adjacent pairs");
        }
        Some(_) if file.ends_with(DELETES_FILE) => {
            let index = die!(DeleteIndex::open(path), "Error opening {file}: {}");
            println!("delete index: {} keys", index.len());
        }
        Some(_) => {
            let store = die!(WordStore::open(path, 0), "Error opening {file}: {}");
            println!("word store: {} terms", store.len());
            for index in 0..store.len().min(5) {
                if let Some((term, count)) = store.at(index) {
                    println!("  {term} {count}");
                }
            }
        }
        None => {
            eprintln!("Error: cannot read {file}");
            process::exit(1);
        }
    }
}

fn human_size(bytes: u64) -> String {
    let kib = bytes as f64 / 1024.0;
    if kib >= 1024.0 {
        format!("{:.1} MB", kib / 1024.0)
    } else {
        format!("{kib:.1} KB")
    }
}
