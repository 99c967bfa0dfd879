//! Japanese text to romaji keystrokes.
//!
//! Conversion runs in two stages: [`hiragana::convert`] normalizes kanji and katakana to
//! hiragana with a fixed reading table, then [`romaji::romanize`] turns the hiragana into
//! the uppercase romaji the typist has to enter.

pub mod hiragana;
pub mod lexicon;
pub mod romaji;

use std::ops::Range;

pub use hiragana::{convert, convert_segments, Segment};
pub use romaji::{romanize, romanize_tokens, RomajiToken};

/// The keystroke that enters `expected`, if one exists on an ASCII keyboard.
pub fn keystroke_for(expected: char) -> Option<char> {
    match expected {
        'ー' => Some('-'),
        ' ' => Some(' '),
        c if c.is_ascii_graphic() => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Whether every character of `romaji` can be typed.
pub fn is_typeable(romaji: &str) -> bool {
    romaji.chars().all(|c| keystroke_for(c).is_some())
}

/// A source character and the slice of expected romaji it accounts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSpan {
    pub ch: char,
    /// Char indices into the expected romaji.
    pub romaji: Range<usize>,
}

/// A source text with its phonetic and romaji forms, computed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliteration {
    pub source: String,
    pub phonetic: String,
    pub romaji: String,
    pub spans: Vec<CharSpan>,
}

impl Transliteration {
    pub fn new(source: &str) -> Self {
        let segments = convert_segments(source);
        let phonetic: String = segments.iter().map(|s| s.phonetic.as_str()).collect();
        let tokens = romanize_tokens(&phonetic);
        let romaji: String = tokens.iter().map(|t| t.romaji.as_str()).collect();

        // offsets[k] = romaji chars produced by tokens starting before kana index k
        let kana_len = phonetic.chars().count();
        let mut offsets = Vec::with_capacity(kana_len + 1);
        let mut emitted = 0;
        let mut pending = tokens.iter().peekable();
        for k in 0..=kana_len {
            while let Some(token) = pending.next_if(|t| t.kana.start < k) {
                emitted += token.romaji.chars().count();
            }
            offsets.push(emitted);
        }

        let source_chars: Vec<char> = source.chars().collect();
        let mut spans = Vec::with_capacity(source_chars.len());
        let mut kana_pos = 0;
        for seg in &segments {
            let kana_end = kana_pos + seg.phonetic.chars().count();
            let range = offsets[kana_pos]..offsets[kana_end];
            spans.extend(seg.source.clone().map(|i| CharSpan {
                ch: source_chars[i],
                romaji: range.clone(),
            }));
            kana_pos = kana_end;
        }

        Self {
            source: source.to_string(),
            phonetic,
            romaji,
            spans,
        }
    }

    pub fn is_typeable(&self) -> bool {
        is_typeable(&self.romaji)
    }
}
