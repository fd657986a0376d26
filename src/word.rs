use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Display classification of a word's progress, derived from the review
/// state on every read.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Proficiency {
    New,
    Learning,
    Review,
    Mastered,
}

impl Proficiency {
    pub fn from_progress(repetitions: u32, reviewed: bool) -> Self {
        if repetitions > 5 {
            Proficiency::Mastered
        } else if repetitions > 2 {
            Proficiency::Review
        } else if reviewed || repetitions > 0 {
            Proficiency::Learning
        } else {
            Proficiency::New
        }
    }
}

/// The SM-2 memory parameters of a word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewState {
    pub easiness_factor: f64,
    /// Days until the next review.
    pub interval: u32,
    /// Consecutive passing reviews since the last lapse.
    pub repetitions: u32,
    pub next_review_date: DateTime<Utc>,
    pub last_review_date: Option<DateTime<Utc>>,
}

impl ReviewState {
    /// State of a word that has never been reviewed. It is due immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            easiness_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_review_date: now,
            last_review_date: None,
        }
    }

    pub fn proficiency(&self) -> Proficiency {
        Proficiency::from_progress(self.repetitions, self.last_review_date.is_some())
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub sentence: String,
    pub translation: String,
}

/// A vocabulary item under spaced-repetition tracking.
///
/// Content fields are public and never touched by scheduling. The review
/// state is only replaced wholesale, by the scheduler or when restoring
/// imported progress through [`Word::with_review_state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WordRecord", into = "WordRecord")]
pub struct Word {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub phonetic: Option<String>,
    pub example: String,
    pub example_translation: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub additional_examples: Vec<Example>,
    state: ReviewState,
}

impl Word {
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            term: term.into(),
            definition: definition.into(),
            phonetic: None,
            example: example.into(),
            example_translation: None,
            tags: Vec::new(),
            is_favorite: false,
            additional_examples: Vec::new(),
            state: ReviewState::new(now),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_review_state(mut self, state: ReviewState) -> Self {
        self.state = state;
        self.state.easiness_factor = self.state.easiness_factor.max(MIN_EASE_FACTOR);
        self
    }

    pub fn review_state(&self) -> &ReviewState {
        &self.state
    }

    pub fn easiness_factor(&self) -> f64 {
        self.state.easiness_factor
    }

    pub fn interval(&self) -> u32 {
        self.state.interval
    }

    pub fn repetitions(&self) -> u32 {
        self.state.repetitions
    }

    pub fn next_review_date(&self) -> DateTime<Utc> {
        self.state.next_review_date
    }

    pub fn last_review_date(&self) -> Option<DateTime<Utc>> {
        self.state.last_review_date
    }

    pub fn proficiency(&self) -> Proficiency {
        self.state.proficiency()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.state.is_due(now)
    }
}

/// Persisted shape of a [`Word`]: camelCase keys, millisecond timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordRecord {
    id: String,
    term: String,
    definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phonetic: Option<String>,
    #[serde(default)]
    example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    example_translation: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    // Written for readers of the file; recomputed on load.
    #[allow(dead_code)]
    #[serde(default = "new_proficiency")]
    proficiency: Proficiency,
    easiness_factor: f64,
    interval: u32,
    repetitions: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    next_review_date: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    last_review_date: Option<DateTime<Utc>>,
    #[serde(default)]
    is_favorite: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    additional_examples: Vec<Example>,
}

fn new_proficiency() -> Proficiency {
    Proficiency::New
}

impl From<Word> for WordRecord {
    fn from(word: Word) -> Self {
        let proficiency = word.proficiency();
        let Word {
            id,
            term,
            definition,
            phonetic,
            example,
            example_translation,
            tags,
            is_favorite,
            additional_examples,
            state,
        } = word;
        Self {
            id,
            term,
            definition,
            phonetic,
            example,
            example_translation,
            tags,
            proficiency,
            easiness_factor: state.easiness_factor,
            interval: state.interval,
            repetitions: state.repetitions,
            next_review_date: state.next_review_date,
            last_review_date: state.last_review_date,
            is_favorite,
            additional_examples,
        }
    }
}

impl From<WordRecord> for Word {
    fn from(record: WordRecord) -> Self {
        Word {
            id: record.id,
            term: record.term,
            definition: record.definition,
            phonetic: record.phonetic,
            example: record.example,
            example_translation: record.example_translation,
            tags: record.tags,
            is_favorite: record.is_favorite,
            additional_examples: record.additional_examples,
            state: ReviewState {
                easiness_factor: record.easiness_factor.max(MIN_EASE_FACTOR),
                interval: record.interval,
                repetitions: record.repetitions,
                next_review_date: record.next_review_date,
                last_review_date: record.last_review_date,
            },
        }
    }
}
