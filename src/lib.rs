//! Japanese typing practice in the terminal: Japanese text is shown, romaji is typed.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod cues;
pub mod kana;
pub mod logging;
pub mod matcher;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod time_series;
pub mod ui;
pub mod util;
