use std::ops::Range;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tracing::{debug, info};

use crate::corpus::{Category, Length, TextSource};
use crate::cues::{Cue, CueSink};
use crate::kana::Transliteration;
use crate::matcher::{KeyInput, Matcher, Phase, Verdict};
use crate::stats::{compute_stats, TypingStats};
use crate::time_series::TimeSeriesPoint;

/// How long a rejected keystroke keeps the error highlight on.
pub const ERROR_PULSE: Duration = Duration::from_millis(500);

/// Which texts the session draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub category: Category,
    pub length: Length,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub started_at: Option<Instant>,
    pub retry_count: u32,
    pub is_completed: bool,
    pub elapsed_secs: f64,
    pub error_until: Option<Instant>,
    pub confirming_reset: bool,
    pub stats: TypingStats,
    pub wpm_coords: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// A fresh text is loaded.
    Restarted,
    /// Progress would be lost; call `confirm_reset` or `cancel_reset`.
    NeedsConfirmation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharState {
    Pending,
    Current,
    Correct,
    Error,
}

/// A source character ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharDecoration {
    pub ch: char,
    pub romaji: Range<usize>,
    pub state: CharState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomajiState {
    Typed,
    Next,
    NextError,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomajiDecoration {
    pub ch: char,
    pub state: RomajiState,
}

/// One practice run over one text, plus the retries on it.
pub struct Session {
    source: Box<dyn TextSource>,
    cues: Box<dyn CueSink>,
    selection: Selection,
    text: Transliteration,
    matcher: Matcher,
    state: SessionState,
}

impl Session {
    pub fn new(
        source: Box<dyn TextSource>,
        cues: Box<dyn CueSink>,
        selection: Selection,
    ) -> Self {
        let mut session = Self {
            source,
            cues,
            selection,
            text: Transliteration::new(""),
            matcher: Matcher::new(""),
            state: SessionState::default(),
        };
        session.start_session(selection.category, selection.length);
        session
    }

    /// Load a fresh text for `category`/`length` and forget everything, retries included.
    pub fn start_session(&mut self, category: Category, length: Length) {
        self.selection = Selection { category, length };
        self.load_text();
        self.state.retry_count = 0;
        info!(
            %category,
            %length,
            romaji_len = self.matcher.expected_len(),
            "session started"
        );
    }

    /// Start over on a fresh text. Asks for confirmation first when there is progress to lose.
    pub fn reset(&mut self) -> ResetOutcome {
        if self.has_progress() {
            self.state.confirming_reset = true;
            return ResetOutcome::NeedsConfirmation;
        }
        self.load_text();
        info!(retry_count = self.state.retry_count, "session reset");
        ResetOutcome::Restarted
    }

    /// Discard the current progress, count it as a retry and load a fresh text.
    pub fn confirm_reset(&mut self) {
        if self.has_progress() {
            self.state.retry_count += 1;
        }
        self.load_text();
        info!(retry_count = self.state.retry_count, "session reset");
    }

    pub fn cancel_reset(&mut self) {
        self.state.confirming_reset = false;
    }

    pub fn on_category_or_length_change(&mut self, category: Category, length: Length) {
        debug!(from = ?self.selection, %category, %length, "selection changed");
        self.start_session(category, length);
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Verdict {
        self.handle_key_at(key, Instant::now())
    }

    pub fn handle_key_at(&mut self, key: &KeyEvent, now: Instant) -> Verdict {
        match KeyInput::from_key_event(key) {
            Some(input) => self.handle_input_at(input, now),
            None => Verdict::Ignored,
        }
    }

    pub fn handle_input_at(&mut self, input: KeyInput, now: Instant) -> Verdict {
        if self.state.confirming_reset {
            return Verdict::Ignored;
        }

        let verdict = self.matcher.accept(input);
        match verdict {
            Verdict::Ignored => {}
            Verdict::Rejected => {
                self.state.error_until = Some(now + ERROR_PULSE);
                self.cues.play(Cue::Incorrect);
            }
            Verdict::Erased => {
                self.state.error_until = None;
                self.refresh_stats(now);
            }
            Verdict::Accepted | Verdict::Completed => {
                self.state.error_until = None;
                self.state.started_at.get_or_insert(now);
                self.cues.play(Cue::Correct);
                self.refresh_stats(now);
                self.state
                    .wpm_coords
                    .push(TimeSeriesPoint::new(self.state.elapsed_secs, self.state.stats.wpm));
                if verdict == Verdict::Completed {
                    self.complete();
                }
            }
        }
        verdict
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    /// Refresh the timer readout and drop an expired error highlight.
    pub fn on_tick_at(&mut self, now: Instant) {
        if self.state.error_until.is_some_and(|until| now >= until) {
            self.state.error_until = None;
        }
        if !self.state.is_completed {
            self.state.elapsed_secs = self.elapsed_at(now);
        }
    }

    pub fn has_input_error(&self, now: Instant) -> bool {
        self.state.error_until.is_some_and(|until| now < until)
    }

    pub fn has_progress(&self) -> bool {
        self.matcher.typed_len() > 0
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed
    }

    pub fn is_confirming_reset(&self) -> bool {
        self.state.confirming_reset
    }

    pub fn phase(&self) -> Phase {
        self.matcher.phase()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stats(&self) -> &TypingStats {
        &self.state.stats
    }

    pub fn text(&self) -> &Transliteration {
        &self.text
    }

    pub fn source_text(&self) -> &str {
        &self.text.source
    }

    pub fn expected(&self) -> &str {
        &self.text.romaji
    }

    pub fn typed(&self) -> &str {
        self.matcher.typed()
    }

    pub fn next_key(&self) -> Option<char> {
        self.matcher.next_key()
    }

    /// State of every source character, judged by how far the flat romaji prefix reaches.
    pub fn char_decorations(&self, now: Instant) -> Vec<CharDecoration> {
        let typed = self.matcher.typed_len();
        let error = self.has_input_error(now);
        self.text
            .spans
            .iter()
            .map(|span| {
                let state = if span.romaji.end <= typed {
                    CharState::Correct
                } else if span.romaji.start < typed {
                    CharState::Current
                } else if span.romaji.start == typed {
                    if error {
                        CharState::Error
                    } else {
                        CharState::Current
                    }
                } else {
                    CharState::Pending
                };
                CharDecoration {
                    ch: span.ch,
                    romaji: span.romaji.clone(),
                    state,
                }
            })
            .collect()
    }

    pub fn romaji_decorations(&self, now: Instant) -> Vec<RomajiDecoration> {
        let typed = self.matcher.typed_len();
        let error = self.has_input_error(now);
        self.matcher
            .expected_chars()
            .iter()
            .enumerate()
            .map(|(i, &ch)| {
                let state = match i.cmp(&typed) {
                    std::cmp::Ordering::Less => RomajiState::Typed,
                    std::cmp::Ordering::Equal if error => RomajiState::NextError,
                    std::cmp::Ordering::Equal => RomajiState::Next,
                    std::cmp::Ordering::Greater => RomajiState::Pending,
                };
                RomajiDecoration { ch, state }
            })
            .collect()
    }

    fn load_text(&mut self) {
        let Selection { category, length } = self.selection;
        let source = self.source.pick(category, length);
        self.text = Transliteration::new(&source);
        self.matcher = Matcher::new(&self.text.romaji);
        let retry_count = self.state.retry_count;
        self.state = SessionState {
            retry_count,
            is_completed: self.matcher.is_completed(),
            ..SessionState::default()
        };
        debug!(source = %self.text.source, romaji = %self.text.romaji, "text loaded");
    }

    fn elapsed_at(&self, now: Instant) -> f64 {
        self.state
            .started_at
            .map_or(0.0, |start| now.saturating_duration_since(start).as_secs_f64())
    }

    fn refresh_stats(&mut self, now: Instant) {
        if !self.state.is_completed {
            self.state.elapsed_secs = self.elapsed_at(now);
        }
        self.state.stats = compute_stats(
            self.matcher.typed(),
            &self.text.romaji,
            self.state.elapsed_secs / 60.0,
            self.state.retry_count,
        );
    }

    fn complete(&mut self) {
        self.state.is_completed = true;
        self.cues.play(Cue::Completion);
        let stats = &self.state.stats;
        info!(
            elapsed_secs = self.state.elapsed_secs,
            retry_count = self.state.retry_count,
            stats = %serde_json::to_string(stats).unwrap_or_default(),
            "session completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::FixedText;
    use crate::cues::RecordingCues;
    use assert_matches::assert_matches;

    fn session(text: &str) -> (Session, RecordingCues) {
        let cues = RecordingCues::new();
        let session = Session::new(
            Box::new(FixedText(text.into())),
            Box::new(cues.clone()),
            Selection::default(),
        );
        (session, cues)
    }

    fn type_str(s: &mut Session, keys: &str, start: Instant, step: Duration) -> Vec<Verdict> {
        keys.chars()
            .enumerate()
            .map(|(i, c)| s.handle_input_at(KeyInput::Char(c), start + step * i as u32))
            .collect()
    }

    #[test]
    fn new_session_is_idle() {
        let (s, _) = session("こんにちは");
        assert_eq!(s.expected(), "KONNICHIHA");
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.state().started_at.is_none());
        assert_eq!(s.next_key(), Some('k'));
        assert_eq!(s.stats(), &TypingStats::default());
    }

    #[test]
    fn typing_the_whole_text_completes() {
        let (mut s, cues) = session("こんにちは");
        let t0 = Instant::now();
        let verdicts = type_str(&mut s, "konnichiha", t0, Duration::from_millis(600));
        assert_eq!(verdicts.last(), Some(&Verdict::Completed));
        assert!(s.is_completed());
        assert_eq!(s.typed(), "KONNICHIHA");
        assert_eq!(s.stats().incorrect_chars, 0);
        assert_eq!(s.stats().accuracy, 100.0);
        // 10 chars over 5.4 seconds
        assert_eq!(s.state().elapsed_secs, 5.4);
        assert_eq!(s.stats().wpm, 22.22);
        assert_eq!(
            cues.cues().iter().filter(|c| **c == Cue::Correct).count(),
            10
        );
        assert_eq!(cues.cues().last(), Some(&Cue::Completion));
    }

    #[test]
    fn timer_starts_on_first_accepted_key() {
        let (mut s, _) = session("か");
        let t0 = Instant::now();
        assert_eq!(s.handle_input_at(KeyInput::Char('x'), t0), Verdict::Rejected);
        assert!(s.state().started_at.is_none());
        let t1 = t0 + Duration::from_secs(1);
        s.handle_input_at(KeyInput::Char('k'), t1);
        assert_eq!(s.state().started_at, Some(t1));
    }

    #[test]
    fn rejection_raises_a_short_error_pulse() {
        let (mut s, cues) = session("か");
        let t0 = Instant::now();
        s.handle_input_at(KeyInput::Char('x'), t0);
        assert!(s.has_input_error(t0));
        assert!(s.has_input_error(t0 + Duration::from_millis(499)));
        assert!(!s.has_input_error(t0 + ERROR_PULSE));
        assert_eq!(cues.cues(), vec![Cue::Incorrect]);

        s.on_tick_at(t0 + Duration::from_millis(600));
        assert!(s.state().error_until.is_none());
    }

    #[test]
    fn rejection_does_not_touch_stats() {
        let (mut s, _) = session("かき");
        let t0 = Instant::now();
        type_str(&mut s, "ka", t0, Duration::from_secs(1));
        let before = *s.stats();
        s.handle_input_at(KeyInput::Char('z'), t0 + Duration::from_secs(5));
        assert_eq!(*s.stats(), before);
        assert_eq!(s.typed(), "KA");
    }

    #[test]
    fn correct_key_clears_error() {
        let (mut s, _) = session("か");
        let t0 = Instant::now();
        s.handle_input_at(KeyInput::Char('x'), t0);
        s.handle_input_at(KeyInput::Char('k'), t0 + Duration::from_millis(10));
        assert!(!s.has_input_error(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn completed_session_ignores_input_and_freezes_time() {
        let (mut s, _) = session("あ");
        let t0 = Instant::now();
        s.handle_input_at(KeyInput::Char('a'), t0);
        assert!(s.is_completed());
        assert_eq!(
            s.handle_input_at(KeyInput::Char('a'), t0 + Duration::from_secs(1)),
            Verdict::Ignored
        );
        s.on_tick_at(t0 + Duration::from_secs(30));
        assert_eq!(s.state().elapsed_secs, 0.0);
    }

    #[test]
    fn tick_advances_the_clock_only_once_started() {
        let (mut s, _) = session("かき");
        let t0 = Instant::now();
        s.on_tick_at(t0 + Duration::from_secs(3));
        assert_eq!(s.state().elapsed_secs, 0.0);
        s.handle_input_at(KeyInput::Char('k'), t0);
        s.on_tick_at(t0 + Duration::from_secs(3));
        assert_eq!(s.state().elapsed_secs, 3.0);
        assert_eq!(s.phase(), Phase::InProgress);
    }

    #[test]
    fn reset_without_progress_restarts_immediately() {
        let (mut s, _) = session("かき");
        assert_eq!(s.reset(), ResetOutcome::Restarted);
        assert_eq!(s.state().retry_count, 0);
        assert!(!s.is_confirming_reset());
    }

    #[test]
    fn reset_with_progress_needs_confirmation() {
        let (mut s, _) = session("かき");
        let t0 = Instant::now();
        type_str(&mut s, "ka", t0, Duration::from_millis(100));
        assert_eq!(s.reset(), ResetOutcome::NeedsConfirmation);
        assert!(s.is_confirming_reset());
        // input is held while the question is open
        assert_eq!(
            s.handle_input_at(KeyInput::Char('k'), t0 + Duration::from_secs(1)),
            Verdict::Ignored
        );

        s.cancel_reset();
        assert_eq!(s.typed(), "KA");

        s.reset();
        s.confirm_reset();
        assert_eq!(s.typed(), "");
        assert_eq!(s.state().retry_count, 1);
        assert!(s.state().started_at.is_none());
        assert!(!s.is_confirming_reset());
    }

    #[test]
    fn retries_survive_resets_and_lower_the_score() {
        let (mut s, _) = session("あいうえお");
        let t0 = Instant::now();
        let step = Duration::from_millis(200);
        type_str(&mut s, "aiueo", t0, step);
        let first = s.stats().score;

        for _ in 0..2 {
            s.handle_input_at(KeyInput::Char('a'), t0);
            s.reset();
            s.confirm_reset();
        }
        // completed sessions count as progress too
        assert_eq!(s.state().retry_count, 2);

        type_str(&mut s, "aiueo", t0, step);
        assert!(s.stats().score <= first);
    }

    #[test]
    fn start_session_clears_retries() {
        let (mut s, _) = session("かき");
        s.handle_input_at(KeyInput::Char('k'), Instant::now());
        s.reset();
        s.confirm_reset();
        assert_eq!(s.state().retry_count, 1);
        s.start_session(Category::News, Length::Long);
        assert_eq!(s.state().retry_count, 0);
        assert_eq!(s.selection().category, Category::News);
    }

    #[test]
    fn selection_change_starts_a_new_session() {
        let (mut s, _) = session("かき");
        s.handle_input_at(KeyInput::Char('k'), Instant::now());
        s.on_category_or_length_change(Category::General, Length::Long);
        assert_eq!(s.typed(), "");
        assert_eq!(s.selection().length, Length::Long);
    }

    #[test]
    fn backspace_recomputes_stats() {
        let (mut s, _) = session("かき");
        let t0 = Instant::now();
        type_str(&mut s, "kak", t0, Duration::from_secs(1));
        assert_eq!(s.stats().correct_chars, 3);
        let v = s.handle_input_at(KeyInput::Backspace, t0 + Duration::from_secs(3));
        assert_matches!(v, Verdict::Erased);
        assert_eq!(s.stats().correct_chars, 2);
        assert_eq!(s.typed(), "KA");
    }

    #[test]
    fn wpm_series_grows_per_accepted_key() {
        let (mut s, _) = session("かき");
        let t0 = Instant::now();
        type_str(&mut s, "kxa", t0, Duration::from_secs(1));
        let coords = &s.state().wpm_coords;
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[0].t, 0.0);
        assert_eq!(coords[1].t, 2.0);
    }

    #[test]
    fn char_decorations_follow_the_flat_prefix() {
        let (mut s, _) = session("がっこう");
        let t0 = Instant::now();
        let states = |s: &Session, now| {
            s.char_decorations(now)
                .into_iter()
                .map(|d| d.state)
                .collect::<Vec<_>>()
        };
        use CharState::*;
        assert_eq!(states(&s, t0), [Current, Pending, Pending, Pending]);

        type_str(&mut s, "ga", t0, Duration::ZERO);
        assert_eq!(states(&s, t0), [Correct, Current, Pending, Pending]);

        s.handle_input_at(KeyInput::Char('x'), t0);
        assert_eq!(states(&s, t0), [Correct, Error, Pending, Pending]);

        type_str(&mut s, "kko", t0, Duration::ZERO);
        assert_eq!(states(&s, t0), [Correct, Correct, Correct, Current]);
    }

    #[test]
    fn compound_characters_share_their_state() {
        let (mut s, _) = session("今日");
        let t0 = Instant::now();
        type_str(&mut s, "ky", t0, Duration::ZERO);
        let decorations = s.char_decorations(t0);
        assert_eq!(decorations[0].state, CharState::Current);
        assert_eq!(decorations[1].state, CharState::Current);
        assert_eq!(decorations[0].romaji, 0..4);
    }

    #[test]
    fn romaji_decorations_mark_the_next_key() {
        let (mut s, _) = session("かき");
        let t0 = Instant::now();
        s.handle_input_at(KeyInput::Char('k'), t0);
        let states: Vec<_> = s.romaji_decorations(t0).iter().map(|d| d.state).collect();
        use RomajiState::*;
        assert_eq!(states, [Typed, Next, Pending, Pending]);

        s.handle_input_at(KeyInput::Char('q'), t0);
        assert_eq!(s.romaji_decorations(t0)[1].state, NextError);
        assert_eq!(s.romaji_decorations(t0)[1].ch, 'A');
    }

    #[test]
    fn empty_text_is_complete_at_once() {
        let (s, _) = session("");
        assert!(s.is_completed());
        assert!(s.char_decorations(Instant::now()).is_empty());
    }
}
