use std::ops::Range;

use super::lexicon::{readings, MAX_KEY_CHARS};

/// A run of source characters and the phonetic text it was converted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Char indices into the source text.
    pub source: Range<usize>,
    pub phonetic: String,
}

/// Normalize mixed-script text to hiragana using the fixed reading table.
pub fn convert(source: &str) -> String {
    convert_segments(source)
        .into_iter()
        .map(|s| s.phonetic)
        .collect()
}

/// Longest-match conversion, keeping the source range of each match.
pub fn convert_segments(source: &str) -> Vec<Segment> {
    let chars: Vec<char> = source.chars().collect();
    let table = readings();
    let mut segments = Vec::with_capacity(chars.len());
    let mut key = String::with_capacity(MAX_KEY_CHARS * 4);
    let mut i = 0;

    while i < chars.len() {
        let longest = MAX_KEY_CHARS.min(chars.len() - i);
        let matched = (1..=longest).rev().find_map(|len| {
            key.clear();
            key.extend(&chars[i..i + len]);
            table.get(key.as_str()).map(|reading| (len, *reading))
        });

        let (len, phonetic) = match matched {
            Some((len, reading)) => (len, reading.to_string()),
            None => (1, chars[i].to_string()),
        };
        segments.push(Segment {
            source: i..i + len,
            phonetic,
        });
        i += len;
    }

    segments
}
