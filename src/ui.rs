pub mod charting;
pub mod screen;

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::session::{CharState, RomajiState};
use crate::stats::Rank;
use crate::time_series::to_coords;
use crate::util::{format_clock, whole_seconds};

use self::charting::{compute_chart_params, format_label};
use self::screen::current_screen;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        current_screen(self.state()).render(self, area, buf);

        if self.session.is_confirming_reset() {
            render_reset_prompt(area, buf);
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

/// Rows needed to show `text` wrapped at `width` columns.
fn occupied_lines(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.width().div_ceil(width).max(1) as u16
}

fn header_line(app: &App) -> Line<'static> {
    let selection = app.session.selection();
    let retries = app.session.state().retry_count;
    let mut spans = vec![
        Span::styled(selection.category.title(), bold().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(selection.length.to_string(), dim_bold()),
    ];
    if retries > 0 {
        spans.push(Span::styled(
            format!("  retry {retries}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn char_style(state: CharState) -> Style {
    match state {
        CharState::Correct => bold().fg(Color::Green),
        CharState::Current => bold().add_modifier(Modifier::UNDERLINED),
        CharState::Error => bold()
            .fg(Color::Red)
            .add_modifier(Modifier::UNDERLINED | Modifier::REVERSED),
        CharState::Pending => dim_bold(),
    }
}

fn romaji_style(state: RomajiState) -> Style {
    match state {
        RomajiState::Typed => Style::default().fg(Color::Green),
        RomajiState::Next => bold().add_modifier(Modifier::UNDERLINED),
        RomajiState::NextError => bold().fg(Color::Red).add_modifier(Modifier::REVERSED),
        RomajiState::Pending => Style::default().add_modifier(Modifier::DIM),
    }
}

fn key_label(key: char) -> String {
    match key {
        ' ' => "space".to_string(),
        c => c.to_string(),
    }
}

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop-", "asdfghjkl", "zxcvbnm,."];

/// A staggered three-row keyboard with `next` highlighted. Rows are padded to one width
/// so the stagger survives centering.
fn keyboard_lines(next: Option<char>, error: bool) -> Vec<Line<'static>> {
    let color = if error { Color::Red } else { Color::Magenta };
    let highlight = bold().fg(color).add_modifier(Modifier::REVERSED);
    let next = next.map(|k| k.to_ascii_lowercase());
    let width = KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| indent + row.len() * 3)
        .max()
        .unwrap_or(0);

    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let mut spans = vec![Span::raw(" ".repeat(indent))];
            spans.extend(row.chars().map(|k| {
                let style = if next == Some(k) { highlight } else { dim_bold() };
                Span::styled(format!(" {k} "), style)
            }));
            spans.push(Span::raw(" ".repeat(width - indent - row.len() * 3)));
            Line::from(spans)
        })
        .collect()
}

pub(crate) fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let now = Instant::now();
    let session = &app.session;
    let text_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);

    let source_lines = occupied_lines(session.source_text(), text_width);
    let romaji_lines = if app.config.show_romaji {
        occupied_lines(session.expected(), text_width)
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(0),
            Constraint::Length(source_lines),
            Constraint::Length(1),
            Constraint::Length(romaji_lines),
            Constraint::Length(1),
            Constraint::Length(1), // next key
            Constraint::Length(KEYBOARD_ROWS.len() as u16),
            Constraint::Length(1), // stats
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(header_line(app)).render(chunks[0], buf);

    // a single line reads best centered, wrapped text reads best from the left
    let alignment = if source_lines == 1 {
        Alignment::Center
    } else {
        Alignment::Left
    };

    let source_spans: Vec<Span> = session
        .char_decorations(now)
        .into_iter()
        .map(|d| Span::styled(d.ch.to_string(), char_style(d.state)))
        .collect();
    Paragraph::new(Line::from(source_spans))
        .alignment(alignment)
        .wrap(Wrap { trim: false })
        .render(chunks[2], buf);

    if app.config.show_romaji {
        let romaji_spans: Vec<Span> = session
            .romaji_decorations(now)
            .into_iter()
            .map(|d| Span::styled(d.ch.to_string(), romaji_style(d.state)))
            .collect();
        Paragraph::new(Line::from(romaji_spans))
            .alignment(if romaji_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[4], buf);
    }

    if let Some(key) = session.next_key() {
        let error = session.has_input_error(now);
        let style = if error {
            bold().fg(Color::Red)
        } else {
            bold().fg(Color::Magenta)
        };
        Paragraph::new(Line::from(vec![
            Span::styled("next ", dim_bold()),
            Span::styled(format!("[{}]", key_label(key)), style),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

        Paragraph::new(keyboard_lines(Some(key), error))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }

    let stats = session.stats();
    let elapsed = whole_seconds(session.state().elapsed_secs);
    Paragraph::new(Span::styled(
        format!(
            "{}   {} wpm   {}% acc   score {}",
            format_clock(elapsed),
            stats.wpm,
            stats.accuracy,
            stats.score
        ),
        dim_bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);

    Paragraph::new(Span::styled(
        "(←) reset / (→) new / (tab) category / (shift+tab) length / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[10], buf);
}

fn rank_color(rank: Rank) -> Color {
    match rank {
        Rank::S => Color::Yellow,
        Rank::A => Color::Magenta,
        Rank::B => Color::Cyan,
        Rank::C => Color::Green,
        Rank::D => Color::Blue,
        Rank::E => Color::Gray,
    }
}

pub(crate) fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let state = session.state();
    let stats = session.stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // rank
            Constraint::Length(1), // retries and time
            Constraint::Length(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let coords = to_coords(&state.wpm_coords);
    let (overall_duration, highest_wpm) = compute_chart_params(&coords);

    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&coords)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, overall_duration])
                .labels(vec![
                    Span::styled("0", bold()),
                    Span::styled(format_label(overall_duration), bold()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold()),
                    Span::styled(format_label(highest_wpm), bold()),
                ]),
        )
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {} correct   {} incorrect   score {}",
            stats.wpm, stats.accuracy, stats.correct_chars, stats.incorrect_chars, stats.score
        ),
        bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("rank {}", stats.rank),
        bold().fg(rank_color(stats.rank)),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        format!(
            "{}   retries {}",
            format_clock(whole_seconds(state.elapsed_secs)),
            state.retry_count
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "(r)etry / (n)ew / (tab) category / (shift+tab) length / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[5], buf);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_reset_prompt(area: Rect, buf: &mut Buffer) {
    let popup = centered(area, 44, 5);
    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from("Your progress will be lost."),
        Line::from(Span::styled("Reset? (y/n)", bold())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" reset ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::config::{Config, FileConfigStore};
    use crate::corpus::FixedText;
    use crate::cues::NullCues;
    use crate::session::{Selection, Session};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app(text: &str) -> App {
        let session = Session::new(
            Box::new(FixedText(text.into())),
            Box::new(NullCues),
            Selection::default(),
        );
        let dir = std::env::temp_dir().join("kanatype-ui-tests");
        App::new(
            session,
            Config::default(),
            Box::new(FileConfigStore::with_path(dir.join("config.json"))),
        )
    }

    fn type_keys(app: &mut App, keys: &str) {
        let now = Instant::now();
        for c in keys.chars() {
            app.on_key_at(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), now);
        }
    }

    fn rendered(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn typing_screen_shows_romaji_and_next_key() {
        let app = create_test_app("こんにちは");
        let content = rendered(&app);
        assert!(content.contains("KONNICHIHA"));
        assert!(content.contains("[k]"));
        assert!(content.contains("00:00"));
    }

    #[test]
    fn hidden_romaji_is_not_drawn() {
        let mut app = create_test_app("こんにちは");
        app.config.show_romaji = false;
        assert!(!rendered(&app).contains("KONNICHIHA"));
    }

    #[test]
    fn results_screen_shows_rank_and_stats() {
        let mut app = create_test_app("かき");
        type_keys(&mut app, "kaki");
        assert_eq!(app.state(), AppState::Results);
        let content = rendered(&app);
        assert!(content.contains("rank"));
        assert!(content.contains("100% acc"));
        assert!(content.contains("retries 0"));
    }

    #[test]
    fn reset_prompt_overlays_the_screen() {
        let mut app = create_test_app("かき");
        type_keys(&mut app, "k");
        app.on_key_at(
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            Instant::now(),
        );
        assert!(rendered(&app).contains("Reset? (y/n)"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = create_test_app("今日は良い天気ですね。");
        let area = Rect::new(0, 0, 8, 3);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
    }

    #[test]
    fn wrapped_lines_are_counted_by_display_width() {
        // each kana is two columns wide
        assert_eq!(occupied_lines("あいうえお", 10), 1);
        assert_eq!(occupied_lines("あいうえおか", 10), 2);
        assert_eq!(occupied_lines("", 10), 1);
        assert_eq!(occupied_lines("abc", 0), 3);
    }

    #[test]
    fn keyboard_highlights_the_next_key() {
        let app = create_test_app("こんにちは");
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);

        let highlighted: Vec<&str> = buffer
            .content
            .iter()
            .filter(|c| c.modifier.contains(Modifier::REVERSED) && c.symbol() != " ")
            .map(|c| c.symbol())
            .collect();
        assert_eq!(highlighted, vec!["k"]);
        assert!(rendered(&app).contains(" q  w  e "));
    }

    #[test]
    fn keyboard_turns_red_on_error() {
        let highlighted = |lines: Vec<Line<'static>>| {
            lines
                .into_iter()
                .flat_map(|l| l.spans)
                .find(|s| s.style.add_modifier.contains(Modifier::REVERSED))
        };

        let ok = highlighted(keyboard_lines(Some('-'), false)).unwrap();
        assert_eq!(ok.content, " - ");
        assert_eq!(ok.style.fg, Some(Color::Magenta));

        let err = highlighted(keyboard_lines(Some('K'), true)).unwrap();
        assert_eq!(err.content, " k ");
        assert_eq!(err.style.fg, Some(Color::Red));

        assert!(highlighted(keyboard_lines(Some(' '), false)).is_none());
    }

    #[test]
    fn keyboard_rows_share_a_width() {
        let widths: Vec<usize> = keyboard_lines(None, false)
            .iter()
            .map(|l| l.width())
            .collect();
        assert_eq!(widths, vec![33, 33, 33]);
    }

    #[test]
    fn space_key_has_a_name() {
        assert_eq!(key_label(' '), "space");
        assert_eq!(key_label('k'), "k");
    }
}
