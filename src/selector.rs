use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::word::Word;

/// How many words a session falls back to when nothing is due.
pub const DEFAULT_FALLBACK_SIZE: usize = 10;

/// Words whose next review is at or before `now`, most overdue first.
/// Words due at the same instant keep their collection order.
pub fn due_words(words: &[Word], now: DateTime<Utc>) -> Vec<Word> {
    words
        .iter()
        .filter(|word| word.is_due(now))
        .sorted_by_key(|word| word.next_review_date())
        .cloned()
        .collect()
}

pub fn due_count(words: &[Word], now: DateTime<Utc>) -> usize {
    words.iter().filter(|word| word.is_due(now)).count()
}

/// The `limit` words reviewed longest ago. Words never reviewed come first.
pub fn least_recently_reviewed(words: &[Word], limit: usize) -> Vec<Word> {
    words
        .iter()
        .sorted_by_key(|word| word.last_review_date())
        .take(limit)
        .cloned()
        .collect()
}

/// Queue for a review session: the due words, or when none are due the
/// `fallback_size` least recently reviewed ones.
pub fn session_queue(words: &[Word], now: DateTime<Utc>, fallback_size: usize) -> Vec<Word> {
    let due = due_words(words, now);
    if due.is_empty() {
        least_recently_reviewed(words, fallback_size)
    } else {
        due
    }
}
