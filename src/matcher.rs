use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::kana::keystroke_for;

/// A single input event the matcher understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
}

impl KeyInput {
    /// Translate a terminal key event, dropping anything the matcher must ignore:
    /// releases, modified keys, and keys outside printable ASCII.
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.intersects(
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::META | KeyModifiers::SUPER,
        ) {
            return None;
        }
        match key.code {
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Char(c) if is_accepted_char(c) => Some(Self::Char(c)),
            _ => None,
        }
    }
}

/// Letters, digits, punctuation and space.
pub fn is_accepted_char(c: char) -> bool {
    c == ' ' || c.is_ascii_graphic()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InProgress,
    Completed,
}

/// What happened to one input event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Dropped without looking at it.
    Ignored,
    Accepted,
    /// The accepted key finished the text.
    Completed,
    Rejected,
    Erased,
}

/// Compares keystrokes against the expected romaji.
///
/// `typed` only ever holds characters copied from `expected`, so it is always a
/// prefix of it.
#[derive(Debug, Clone)]
pub struct Matcher {
    expected: Vec<char>,
    typed: String,
    typed_len: usize,
}

impl Matcher {
    pub fn new(expected: &str) -> Self {
        Self {
            expected: expected.chars().collect(),
            typed: String::with_capacity(expected.len()),
            typed_len: 0,
        }
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn typed_len(&self) -> usize {
        self.typed_len
    }

    pub fn expected_len(&self) -> usize {
        self.expected.len()
    }

    pub fn expected_chars(&self) -> &[char] {
        &self.expected
    }

    pub fn next_expected(&self) -> Option<char> {
        self.expected.get(self.typed_len).copied()
    }

    /// The key to press next, lowercase.
    pub fn next_key(&self) -> Option<char> {
        self.next_expected().and_then(keystroke_for)
    }

    pub fn phase(&self) -> Phase {
        if self.typed_len == self.expected.len() {
            Phase::Completed
        } else if self.typed_len == 0 {
            Phase::Idle
        } else {
            Phase::InProgress
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase() == Phase::Completed
    }

    pub fn accept_key_event(&mut self, key: &KeyEvent) -> Verdict {
        match KeyInput::from_key_event(key) {
            Some(input) => self.accept(input),
            None => Verdict::Ignored,
        }
    }

    pub fn accept(&mut self, input: KeyInput) -> Verdict {
        if self.is_completed() {
            return Verdict::Ignored;
        }

        match input {
            KeyInput::Backspace => self.backspace(),
            KeyInput::Char(c) if is_accepted_char(c) => self.write(c),
            KeyInput::Char(_) => Verdict::Ignored,
        }
    }

    fn write(&mut self, c: char) -> Verdict {
        let Some(expected) = self.next_expected() else {
            return Verdict::Ignored;
        };

        if keystroke_for(expected) != Some(c.to_ascii_lowercase()) {
            debug!(key = %c, %expected, pos = self.typed_len, "rejected keystroke");
            return Verdict::Rejected;
        }

        self.typed.push(expected);
        self.typed_len += 1;

        if self.is_completed() {
            Verdict::Completed
        } else {
            Verdict::Accepted
        }
    }

    fn backspace(&mut self) -> Verdict {
        match self.typed.pop() {
            Some(_) => {
                self.typed_len -= 1;
                Verdict::Erased
            }
            None => Verdict::Ignored,
        }
    }
}
