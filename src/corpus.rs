use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::kana::Transliteration;

static CORPUS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/corpus");

const DATE_PLACEHOLDER: &str = "{date}";
const TOPIC_PLACEHOLDER: &str = "{topic}";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    News,
    Yamanashi,
    Literature,
    It,
    Custom,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::General,
        Category::News,
        Category::Yamanashi,
        Category::Literature,
        Category::It,
        Category::Custom,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Display name used in the UI
    pub fn title(self) -> &'static str {
        match self {
            Category::General => "一般文章",
            Category::News => "今日のニュース",
            Category::Yamanashi => "山梨県のお題",
            Category::Literature => "日本文学",
            Category::It => "IT用語",
            Category::Custom => "カスタム文章",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Length {
    #[default]
    Short,
    Long,
}

impl Length {
    pub fn toggle(self) -> Self {
        match self {
            Length::Short => Length::Long,
            Length::Long => Length::Short,
        }
    }
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus file {0} not found")]
    Missing(String),
    #[error("corpus file {0} is not valid utf-8")]
    NotUtf8(String),
    #[error("corpus file {file} is malformed: {source}")]
    Malformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("corpus {category} has no {length} texts")]
    Empty { category: Category, length: Length },
}

/// Texts of one category, as stored in `src/corpus/<name>.json`
#[derive(Deserialize, Clone, Debug)]
pub struct TextSet {
    pub name: String,
    pub short: Vec<String>,
    pub long: Vec<String>,
}

impl TextSet {
    pub fn texts(&self, length: Length) -> &[String] {
        match length {
            Length::Short => &self.short,
            Length::Long => &self.long,
        }
    }
}

/// Supplies the source text for a new session.
pub trait TextSource {
    fn pick(&mut self, category: Category, length: Length) -> String;
}

/// The bundled texts. `news` texts are stamped with the current date and `custom` texts
/// are written around a user topic.
#[derive(Debug, Clone)]
pub struct Corpus {
    sets: HashMap<Category, TextSet>,
    topic: Option<String>,
    today: Option<NaiveDate>,
}

impl Corpus {
    pub fn builtin() -> Result<Self, CorpusError> {
        let mut sets = HashMap::new();
        for category in Category::ALL {
            let set = read_text_set(category)?;
            for length in [Length::Short, Length::Long] {
                if set.texts(length).is_empty() {
                    return Err(CorpusError::Empty { category, length });
                }
            }
            sets.insert(category, set);
        }
        Ok(Self {
            sets,
            topic: None,
            today: None,
        })
    }

    pub fn with_topic(mut self, topic: Option<String>) -> Self {
        self.set_topic(topic);
        self
    }

    /// Set the custom topic. Blank topics, and topics with characters that have no romaji,
    /// are dropped and the custom category falls back to the general texts.
    pub fn set_topic(&mut self, topic: Option<String>) {
        self.topic = topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .filter(|t| {
                let typeable = Transliteration::new(t).is_typeable();
                if !typeable {
                    warn!(topic = %t, "topic cannot be typed, using general texts");
                }
                typeable
            });
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Pin the date used for news texts.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    pub fn texts(&self, category: Category, length: Length) -> Vec<String> {
        match (category, self.topic.as_deref()) {
            (Category::News, _) => {
                let stamp = self.date_stamp();
                self.templates(category, length)
                    .iter()
                    .map(|t| t.replace(DATE_PLACEHOLDER, &stamp))
                    .collect()
            }
            (Category::Custom, Some(topic)) => self
                .templates(category, length)
                .iter()
                .map(|t| t.replace(TOPIC_PLACEHOLDER, topic))
                .collect(),
            // no topic yet, practice on general texts instead
            (Category::Custom, None) => self.templates(Category::General, length).to_vec(),
            _ => self.templates(category, length).to_vec(),
        }
    }

    fn templates(&self, category: Category, length: Length) -> &[String] {
        self.sets
            .get(&category)
            .map(|set| set.texts(length))
            .unwrap_or_default()
    }

    fn date_stamp(&self) -> String {
        let date = self.today.unwrap_or_else(|| Local::now().date_naive());
        format!("{}月{}日", date.month(), date.day())
    }
}

impl TextSource for Corpus {
    fn pick(&mut self, category: Category, length: Length) -> String {
        let texts = self.texts(category, length);
        let mut rng = rand::thread_rng();
        let text = texts.choose(&mut rng).cloned().unwrap_or_default();
        debug!(%category, %length, chars = text.chars().count(), "picked text");
        text
    }
}

/// Always returns the same text, whatever is asked for
#[derive(Debug, Clone)]
pub struct FixedText(pub String);

impl TextSource for FixedText {
    fn pick(&mut self, _category: Category, _length: Length) -> String {
        self.0.clone()
    }
}

fn read_text_set(category: Category) -> Result<TextSet, CorpusError> {
    let file_name = format!("{category}.json");
    let file = CORPUS_DIR
        .get_file(&file_name)
        .ok_or_else(|| CorpusError::Missing(file_name.clone()))?;
    let contents = file
        .contents_utf8()
        .ok_or_else(|| CorpusError::NotUtf8(file_name.clone()))?;
    serde_json::from_str(contents).map_err(|source| CorpusError::Malformed {
        file: file_name,
        source,
    })
}
