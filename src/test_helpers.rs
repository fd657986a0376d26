use chrono::{DateTime, TimeZone, Utc};

use crate::word::{ReviewState, Word};

/// Midnight UTC on the given day.
pub(crate) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub(crate) fn word_with_state(
    id: &str,
    easiness_factor: f64,
    repetitions: u32,
    interval: u32,
    next_review_date: DateTime<Utc>,
    last_review_date: Option<DateTime<Utc>>,
) -> Word {
    Word::new(id, format!("definition of {id}"), "", next_review_date)
        .with_id(id)
        .with_review_state(ReviewState {
            easiness_factor,
            interval,
            repetitions,
            next_review_date,
            last_review_date,
        })
}

/// A word with default ease, due at `next` and last reviewed at `last`.
pub(crate) fn scheduled(id: &str, next: DateTime<Utc>, last: Option<DateTime<Utc>>) -> Word {
    word_with_state(id, 2.5, 1, 1, next, last)
}

pub(crate) fn ids(words: &[Word]) -> Vec<&str> {
    words.iter().map(|w| w.id.as_str()).collect()
}

pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
