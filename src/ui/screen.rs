use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::{App, AppState};

/// One full-screen view of the app
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::render_typing(app, area, buf);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        super::render_results(app, area, buf);
    }
}

pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Typing => Box::new(TypingScreen),
        AppState::Results => Box::new(ResultsScreen),
    }
}
