//! Parsing of whitespace-delimited frequency dictionaries.
//!
//! Unigram files carry `term count` per line, bigram files
//! `word1 word2 count`. Malformed lines are skipped and counted; the
//! caller decides whether to report them.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub struct ParsedDictionary {
    pub entries: Vec<(String, u64)>,
    pub skipped: usize,
}

/// Parse a `term count` frequency file.
pub fn parse_unigrams(path: &Path) -> io::Result<ParsedDictionary> {
    parse(path, 1)
}

/// Parse a `word1 word2 count` bigram file into `"w1 w2"` keys.
pub fn parse_bigrams(path: &Path) -> io::Result<ParsedDictionary> {
    parse(path, 2)
}

fn parse(path: &Path, term_words: usize) -> io::Result<ParsedDictionary> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != term_words + 1 {
            if !line.trim().is_empty() {
                skipped += 1;
            }
            continue;
        }
        let Ok(count) = fields[term_words].parse::<u64>() else {
            skipped += 1;
            continue;
        };
        entries.push((fields[..term_words].join(" "), count));
    }

    Ok(ParsedDictionary { entries, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_unigrams() {
        let file = write_temp("the 23135851162\nof 13151942776\n");
        let parsed = parse_unigrams(file.path()).unwrap();
        assert_eq!(parsed.skipped, 0);
        assert_eq!(
            parsed.entries,
            vec![
                ("the".to_string(), 23135851162),
                ("of".to_string(), 13151942776)
            ]
        );
    }

    #[test]
    fn parses_bigrams_into_joined_keys() {
        let file = write_temp("abcs of 10956800\naaron and 10721728\n");
        let parsed = parse_bigrams(file.path()).unwrap();
        assert_eq!(parsed.entries[0], ("abcs of".to_string(), 10956800));
        assert_eq!(parsed.entries[1], ("aaron and".to_string(), 10721728));
    }

    #[test]
    fn skips_malformed_lines() {
        let file = write_temp("the 100\nbroken\nalso broken here ok\nnotanumber x\n\nok 5\n");
        let parsed = parse_unigrams(file.path()).unwrap();
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.skipped, 3);
    }
}
