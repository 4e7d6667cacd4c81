use clap::{Parser, Subcommand};

use spell_cli::commands::{build_ops, config_ops, query_ops};

#[derive(Parser)]
#[command(name = "spelltool", about = "Spellime dictionary build and query tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build words.bin / deletes.bin (and optionally bigrams.bin) from
    /// frequency dictionaries
    Build {
        /// Unigram frequency file ("term count" per line)
        dictionary: String,
        /// Output directory
        output_dir: String,
        /// Bigram frequency file ("w1 w2 count" per line)
        #[arg(long)]
        bigrams: Option<String>,
        /// Maximum edit distance the index supports
        #[arg(long, default_value = "2")]
        max_edit_distance: usize,
        /// Prefix length for delete generation
        #[arg(long, default_value = "7")]
        prefix_length: usize,
        /// Keep only the N most frequent words
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Generate keyboard layout matrix files
    Keyboard {
        /// Layout name (qwerty, azerty, qwertz, dvorak, colemak) or "all"
        #[arg(long, default_value = "all")]
        layout: String,
        /// Output directory
        output_dir: String,
    },
    /// Show a summary of a .bin file (detected by magic bytes / name)
    Info {
        /// words.bin, deletes.bin, bigrams.bin or keyboard_*.bin
        file: String,
    },
    /// Validate an engine config TOML file
    ConfigValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Spelling suggestions for a single token
    Lookup {
        /// Data directory with built .bin files
        data_dir: String,
        /// Token to look up
        phrase: String,
        /// top, closest or all
        #[arg(short, long, default_value = "top")]
        verbosity: String,
        /// Previous word for bigram-aware ranking
        #[arg(long)]
        previous: Option<String>,
        /// Override the maximum edit distance
        #[arg(long)]
        max_edit_distance: Option<usize>,
        /// Keyboard layout for weighted substitutions
        #[arg(long)]
        keyboard: Option<String>,
    },
    /// Frequent completions of a prefix
    Prefix {
        /// Data directory with built .bin files
        data_dir: String,
        /// Prefix to complete
        prefix: String,
        /// Maximum completions
        #[arg(short, long, default_value = "5")]
        limit: usize,
        /// Minimum frequency (default adapts to the prefix length)
        #[arg(long)]
        min_frequency: Option<u64>,
    },
    /// Auto-correction decision for a word
    Autocorrect {
        /// Data directory with built .bin files
        data_dir: String,
        /// Word to check
        word: String,
        /// Confidence threshold override
        #[arg(long)]
        min_confidence: Option<f64>,
        /// Keyboard layout for weighted substitutions
        #[arg(long)]
        keyboard: Option<String>,
    },
    /// Correct a whitespace-separated phrase word by word
    Compound {
        /// Data directory with built .bin files
        data_dir: String,
        /// Phrase to correct
        phrase: String,
        /// Override the maximum edit distance
        #[arg(long)]
        max_edit_distance: Option<usize>,
    },
    /// Segment a concatenated string into words
    Segment {
        /// Data directory with built .bin files
        data_dir: String,
        /// Input without spaces
        phrase: String,
        /// Beam width
        #[arg(long)]
        beam_width: Option<usize>,
        /// Longest segment considered
        #[arg(long)]
        max_segment_len: Option<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build {
            dictionary,
            output_dir,
            bigrams,
            max_edit_distance,
            prefix_length,
            top_n,
        } => {
            let options = build_ops::BuildOptions {
                max_edit_distance,
                prefix_length,
                top_n,
            };
            build_ops::build(&dictionary, bigrams.as_deref(), &output_dir, &options);
        }
        Command::Keyboard { layout, output_dir } => build_ops::keyboard(&layout, &output_dir),
        Command::Info { file } => build_ops::info(&file),
        Command::ConfigValidate { file } => config_ops::validate(&file),
        Command::Lookup {
            data_dir,
            phrase,
            verbosity,
            previous,
            max_edit_distance,
            keyboard,
        } => {
            let options = query_ops::QueryOptions {
                max_edit_distance,
                keyboard_layout: keyboard,
            };
            query_ops::lookup(&data_dir, &phrase, &verbosity, previous.as_deref(), &options);
        }
        Command::Prefix {
            data_dir,
            prefix,
            limit,
            min_frequency,
        } => {
            let options = query_ops::QueryOptions {
                max_edit_distance: None,
                keyboard_layout: None,
            };
            query_ops::prefix(&data_dir, &prefix, limit, min_frequency, &options);
        }
        Command::Autocorrect {
            data_dir,
            word,
            min_confidence,
            keyboard,
        } => {
            let options = query_ops::QueryOptions {
                max_edit_distance: None,
                keyboard_layout: keyboard,
            };
            query_ops::autocorrect(&data_dir, &word, min_confidence, &options);
        }
        Command::Compound {
            data_dir,
            phrase,
            max_edit_distance,
        } => {
            let options = query_ops::QueryOptions {
                max_edit_distance,
                keyboard_layout: None,
            };
            query_ops::compound(&data_dir, &phrase, &options);
        }
        Command::Segment {
            data_dir,
            phrase,
            beam_width,
            max_segment_len,
        } => {
            let options = query_ops::QueryOptions {
                max_edit_distance: None,
                keyboard_layout: None,
            };
            query_ops::segment(&data_dir, &phrase, beam_width, max_segment_len, &options);
        }
    }
}
