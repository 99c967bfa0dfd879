use serde::Serialize;

use crate::util::round_to;

/// Letter grade for a practice run, E (lowest) to S.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, strum_macros::Display,
)]
pub enum Rank {
    #[default]
    E,
    D,
    C,
    B,
    A,
    S,
}

/// Minimum (wpm, accuracy, score) per rank, checked from the top down.
const RANK_THRESHOLDS: [(Rank, f64, f64, u32); 5] = [
    (Rank::S, 80.0, 98.0, 1500),
    (Rank::A, 60.0, 95.0, 1000),
    (Rank::B, 40.0, 90.0, 600),
    (Rank::C, 25.0, 80.0, 300),
    (Rank::D, 15.0, 70.0, 0),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TypingStats {
    pub wpm: f64,
    pub accuracy: f64,
    pub total_chars: usize,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub score: u32,
    pub rank: Rank,
}

/// Snapshot of speed, accuracy, score and rank for the current input.
///
/// `typed` is compared position by position with `expected`; wpm counts five correct
/// characters as a word.
pub fn compute_stats(
    typed: &str,
    expected: &str,
    elapsed_minutes: f64,
    retry_count: u32,
) -> TypingStats {
    let total_chars = typed.chars().count();
    let correct_chars = typed
        .chars()
        .zip(expected.chars())
        .filter(|(t, e)| t == e)
        .count();
    let incorrect_chars = total_chars - correct_chars;

    let accuracy = if total_chars > 0 {
        correct_chars as f64 / total_chars as f64 * 100.0
    } else {
        0.0
    };
    let wpm = if elapsed_minutes > 0.0 {
        (correct_chars as f64 / 5.0) / elapsed_minutes
    } else {
        0.0
    };

    let wpm = round_to(wpm, 2);
    let accuracy = round_to(accuracy, 2);
    let score = score(wpm, accuracy, expected.chars().count(), retry_count);

    TypingStats {
        wpm,
        accuracy,
        total_chars,
        correct_chars,
        incorrect_chars,
        score,
        rank: rank(wpm, accuracy, score),
    }
}

/// `wpm * (accuracy/100)^2 * length bonus`, reduced by 10% per retry, times ten.
pub fn score(wpm: f64, accuracy: f64, expected_len: usize, retry_count: u32) -> u32 {
    let length_bonus = (expected_len as f64 / 100.0).min(2.0);
    let base = wpm * (accuracy / 100.0).powi(2) * length_bonus;
    let retry_penalty = (1.0 - retry_count as f64 * 0.1).max(0.0);
    let score = (base * retry_penalty * 10.0).round();

    if score.is_finite() && score > 0.0 {
        score as u32
    } else {
        0
    }
}

pub fn rank(wpm: f64, accuracy: f64, score: u32) -> Rank {
    RANK_THRESHOLDS
        .iter()
        .find(|&&(_, min_wpm, min_acc, min_score)| {
            wpm >= min_wpm && accuracy >= min_acc && score >= min_score
        })
        .map_or(Rank::E, |&(rank, ..)| rank)
}
