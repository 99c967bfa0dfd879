use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::config::{Config, ConfigStore};
use crate::runtime::AppEvent;
use crate::session::{ResetOutcome, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// What the main loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    pub session: Session,
    pub config: Config,
    store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(session: Session, config: Config, store: Box<dyn ConfigStore>) -> Self {
        Self {
            session,
            config,
            store,
        }
    }

    pub fn state(&self) -> AppState {
        if self.session.is_completed() && !self.session.expected().is_empty() {
            AppState::Results
        } else {
            AppState::Typing
        }
    }

    pub fn on_event(&mut self, event: AppEvent) -> Control {
        self.on_event_at(event, Instant::now())
    }

    pub fn on_event_at(&mut self, event: AppEvent, now: Instant) -> Control {
        match event {
            AppEvent::Key(key) => self.on_key_at(key, now),
            AppEvent::Tick => {
                self.session.on_tick_at(now);
                Control::Continue
            }
            AppEvent::Resize => Control::Continue,
        }
    }

    pub fn on_key_at(&mut self, key: KeyEvent, now: Instant) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        if self.session.is_confirming_reset() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.session.confirm_reset()
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.session.cancel_reset()
                }
                _ => {}
            }
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Left => self.request_reset(),
            KeyCode::Char('r') if ctrl => self.request_reset(),
            KeyCode::Right => self.new_text(),
            KeyCode::Tab => self.cycle_category(),
            KeyCode::BackTab => self.toggle_length(),
            KeyCode::Char('r') if self.state() == AppState::Results => self.request_reset(),
            KeyCode::Char('n') if self.state() == AppState::Results => self.new_text(),
            _ => {
                self.session.handle_key_at(&key, now);
            }
        }
        Control::Continue
    }

    fn request_reset(&mut self) {
        if self.session.reset() == ResetOutcome::NeedsConfirmation {
            debug!("reset waits for confirmation");
        }
    }

    fn new_text(&mut self) {
        let selection = self.session.selection();
        self.session
            .start_session(selection.category, selection.length);
    }

    fn cycle_category(&mut self) {
        let selection = self.session.selection();
        self.config.category = selection.category.next();
        self.config.length = selection.length;
        self.apply_selection();
    }

    fn toggle_length(&mut self) {
        let selection = self.session.selection();
        self.config.category = selection.category;
        self.config.length = selection.length.toggle();
        self.apply_selection();
    }

    fn apply_selection(&mut self) {
        self.session
            .on_category_or_length_change(self.config.category, self.config.length);
        // command-line overrides for the other fields stay out of the file
        let mut stored = self.store.load();
        stored.category = self.config.category;
        stored.length = self.config.length;
        if let Err(err) = self.store.save(&stored) {
            warn!(%err, "could not save preferences");
        }
    }
}
