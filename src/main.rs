use std::error::Error;
use std::io::{self, stdin};
use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use kanatype::app::{App, Control};
use kanatype::config::{Config, ConfigStore, FileConfigStore};
use kanatype::corpus::{Category, Corpus, FixedText, Length, TextSource};
use kanatype::cues::TerminalBell;
use kanatype::kana::Transliteration;
use kanatype::logging;
use kanatype::runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker};
use kanatype::session::{Selection, Session};

/// japanese typing practice: read the kana, type the romaji
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing TUI for Japanese: texts are converted to romaji on the fly, every keystroke is checked as you type, and each run ends with a speed chart, a score and a rank."
)]
pub struct Cli {
    /// category to draw texts from
    #[clap(short = 'c', long, value_enum)]
    category: Option<Category>,

    /// length of the texts
    #[clap(short = 'l', long, value_enum)]
    length: Option<Length>,

    /// custom text to practice instead of the built-in ones
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// topic the custom category writes about
    #[clap(short = 't', long)]
    topic: Option<String>,

    /// do not ring the terminal bell
    #[clap(long)]
    no_sound: bool,

    /// hide the romaji line
    #[clap(long)]
    hide_romaji: bool,

    /// write logs to this file (filter with KANATYPE_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command-line flags over the stored preferences.
    fn apply(&self, config: &mut Config) {
        if let Some(category) = self.category {
            config.category = category;
        }
        if let Some(length) = self.length {
            config.length = length;
        }
        if self.no_sound {
            config.sound = false;
        }
        if self.hide_romaji {
            config.show_romaji = false;
        }
    }

    fn text_source(&self) -> Result<Box<dyn TextSource>, Box<dyn Error>> {
        match &self.prompt {
            Some(prompt) => Ok(Box::new(FixedText(prompt.clone()))),
            None => Ok(Box::new(
                Corpus::builtin()?.with_topic(self.topic.clone()),
            )),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _log_guard = match &cli.log_file {
        Some(path) => Some(logging::init(path)?),
        None => None,
    };

    if let Some(prompt) = &cli.prompt {
        if prompt.trim().is_empty() || !Transliteration::new(prompt).is_typeable() {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::InvalidValue,
                "prompt contains characters that cannot be typed as romaji",
            )
            .exit();
        }
    }

    if let Some(topic) = &cli.topic {
        if !Transliteration::new(topic.trim()).is_typeable() {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::InvalidValue,
                "topic contains characters that cannot be typed as romaji",
            )
            .exit();
        }
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply(&mut config);
    info!(?config, "starting");

    let session = Session::new(
        cli.text_source()?,
        Box::new(TerminalBell::new(config.sound)),
        Selection {
            category: config.category,
            length: config.length,
        },
    );
    let mut app = App::new(session, config, Box::new(store));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = run_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        if app.on_event(runner.step()) == Control::Quit {
            info!("quit");
            return Ok(());
        }
    }
}
