use std::collections::HashMap;
use std::ops::Range;
use std::sync::OnceLock;

/// Marker that doubles the next consonant.
pub const SOKUON: char = 'っ';

#[rustfmt::skip]
const MONOGRAPHS: &[(&str, &str)] = &[
    ("あ", "a"), ("い", "i"), ("う", "u"), ("え", "e"), ("お", "o"),
    ("か", "ka"), ("き", "ki"), ("く", "ku"), ("け", "ke"), ("こ", "ko"),
    ("が", "ga"), ("ぎ", "gi"), ("ぐ", "gu"), ("げ", "ge"), ("ご", "go"),
    ("さ", "sa"), ("し", "shi"), ("す", "su"), ("せ", "se"), ("そ", "so"),
    ("ざ", "za"), ("じ", "ji"), ("ず", "zu"), ("ぜ", "ze"), ("ぞ", "zo"),
    ("た", "ta"), ("ち", "chi"), ("つ", "tsu"), ("て", "te"), ("と", "to"),
    ("だ", "da"), ("ぢ", "di"), ("づ", "du"), ("で", "de"), ("ど", "do"),
    ("な", "na"), ("に", "ni"), ("ぬ", "nu"), ("ね", "ne"), ("の", "no"),
    ("は", "ha"), ("ひ", "hi"), ("ふ", "fu"), ("へ", "he"), ("ほ", "ho"),
    ("ば", "ba"), ("び", "bi"), ("ぶ", "bu"), ("べ", "be"), ("ぼ", "bo"),
    ("ぱ", "pa"), ("ぴ", "pi"), ("ぷ", "pu"), ("ぺ", "pe"), ("ぽ", "po"),
    ("ま", "ma"), ("み", "mi"), ("む", "mu"), ("め", "me"), ("も", "mo"),
    ("や", "ya"), ("ゆ", "yu"), ("よ", "yo"),
    ("ら", "ra"), ("り", "ri"), ("る", "ru"), ("れ", "re"), ("ろ", "ro"),
    ("わ", "wa"), ("ゐ", "wi"), ("ゑ", "we"), ("を", "wo"), ("ん", "n"), ("ゔ", "vu"),
    ("ゃ", "ya"), ("ゅ", "yu"), ("ょ", "yo"),
    ("ぁ", "xa"), ("ぃ", "xi"), ("ぅ", "xu"), ("ぇ", "xe"), ("ぉ", "xo"), ("ゎ", "xwa"),
    // punctuation
    ("。", "."), ("、", ","), ("？", "?"), ("！", "!"), ("（", "("), ("）", ")"),
    ("「", "\""), ("」", "\""), ("　", " "),
];

#[rustfmt::skip]
const DIGRAPHS: &[(&str, &str)] = &[
    ("きゃ", "kya"), ("きゅ", "kyu"), ("きょ", "kyo"),
    ("しゃ", "sha"), ("しゅ", "shu"), ("しょ", "sho"),
    ("ちゃ", "cha"), ("ちゅ", "chu"), ("ちょ", "cho"),
    ("にゃ", "nya"), ("にゅ", "nyu"), ("にょ", "nyo"),
    ("ひゃ", "hya"), ("ひゅ", "hyu"), ("ひょ", "hyo"),
    ("みゃ", "mya"), ("みゅ", "myu"), ("みょ", "myo"),
    ("りゃ", "rya"), ("りゅ", "ryu"), ("りょ", "ryo"),
    ("ぎゃ", "gya"), ("ぎゅ", "gyu"), ("ぎょ", "gyo"),
    ("じゃ", "ja"), ("じゅ", "ju"), ("じょ", "jo"),
    ("びゃ", "bya"), ("びゅ", "byu"), ("びょ", "byo"),
    ("ぴゃ", "pya"), ("ぴゅ", "pyu"), ("ぴょ", "pyo"),
    // small-vowel combinations, mostly from loanwords
    ("しぇ", "she"), ("じぇ", "je"), ("ちぇ", "che"),
    ("てぃ", "thi"), ("でぃ", "dhi"), ("とぅ", "twu"), ("どぅ", "dwu"),
    ("ふぁ", "fa"), ("ふぃ", "fi"), ("ふぇ", "fe"), ("ふぉ", "fo"),
    ("うぃ", "wi"), ("うぇ", "we"), ("うぉ", "who"),
    ("ゔぁ", "va"), ("ゔぃ", "vi"), ("ゔぇ", "ve"), ("ゔぉ", "vo"),
];

fn table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| MONOGRAPHS.iter().chain(DIGRAPHS).copied().collect())
}

/// One unit of romanized output and the kana (by char index) that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomajiToken {
    pub kana: Range<usize>,
    pub romaji: String,
}

/// Romanize hiragana into uppercase romaji.
pub fn romanize(phonetic: &str) -> String {
    romanize_tokens(phonetic)
        .into_iter()
        .map(|t| t.romaji)
        .collect()
}

/// Same as [`romanize`] but keeps the kana range each piece of romaji came from.
///
/// Every input character belongs to exactly one token; a token's romaji may be empty
/// (a geminate marker with nothing to double).
pub fn romanize_tokens(phonetic: &str) -> Vec<RomajiToken> {
    let chars: Vec<char> = phonetic.chars().collect();
    let table = table();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut key = String::with_capacity(8);
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == SOKUON {
            let doubled = chars
                .get(i + 1)
                .and_then(|next| lookup(table, &mut key, std::slice::from_ref(next)))
                .and_then(leading_consonant);
            tokens.push(RomajiToken {
                kana: i..i + 1,
                romaji: doubled.map(|c| c.to_ascii_uppercase().to_string()).unwrap_or_default(),
            });
            i += 1;
            continue;
        }

        let matched = (1..=2).rev().find_map(|len| {
            let window = chars.get(i..i + len)?;
            lookup(table, &mut key, window).map(|romaji| (len, romaji))
        });

        match matched {
            Some((len, romaji)) => {
                tokens.push(RomajiToken {
                    kana: i..i + len,
                    romaji: romaji.to_uppercase(),
                });
                i += len;
            }
            None => {
                tokens.push(RomajiToken {
                    kana: i..i + 1,
                    romaji: chars[i].to_uppercase().collect(),
                });
                i += 1;
            }
        }
    }

    tokens
}

fn lookup(
    table: &'static HashMap<&'static str, &'static str>,
    key: &mut String,
    window: &[char],
) -> Option<&'static str> {
    key.clear();
    key.extend(window);
    table.get(key.as_str()).copied()
}

fn leading_consonant(romaji: &str) -> Option<char> {
    romaji
        .chars()
        .next()
        .filter(|c| c.is_ascii_alphabetic() && !matches!(c, 'a' | 'i' | 'u' | 'e' | 'o'))
}
