//! Simplified SuperMemo-2 scheduling.
//!
//! A passing review (quality 3 or better) grows the interval from 1 day to
//! 6 days and then by the ease factor. A lapse resets the repetition streak
//! and brings the word back the next day.

use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::error::{InvalidQualitySnafu, Result, WordMasterError};
use crate::word::{MIN_EASE_FACTOR, ReviewState, Word};

const PASSING_QUALITY: u8 = 3;
const MAX_QUALITY: u8 = 5;

/// Self-assessed recall for one review, 0 (blackout) to 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    /// "Don't know"
    pub const FORGOT: Self = Self(1);
    /// "Blurry"
    pub const BLURRY: Self = Self(3);
    /// "Know"
    pub const KNOW: Self = Self(5);

    /// The three answers a learner can give.
    pub const ANSWERS: [Self; 3] = [Self::FORGOT, Self::BLURRY, Self::KNOW];

    pub fn new(value: u8) -> Result<Self> {
        ensure!(value <= MAX_QUALITY, InvalidQualitySnafu { value });
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= PASSING_QUALITY
    }
}

impl TryFrom<u8> for Quality {
    type Error = WordMasterError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// The state a word would have after each possible answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NextStates {
    pub forgot: ReviewState,
    pub blurry: ReviewState,
    pub know: ReviewState,
}

pub fn next_easiness_factor(easiness_factor: f64, quality: Quality) -> f64 {
    let shortfall = f64::from(MAX_QUALITY - quality.value());
    easiness_factor + (0.1 - shortfall * (0.08 + shortfall * 0.02))
}

pub fn next_state(state: &ReviewState, quality: Quality, now: DateTime<Utc>) -> ReviewState {
    let mut easiness_factor = state.easiness_factor;
    let (interval, repetitions) = if quality.is_pass() {
        let interval = match state.repetitions {
            0 => 1,
            1 => 6,
            _ => (f64::from(state.interval) * state.easiness_factor).round() as u32,
        };
        easiness_factor = next_easiness_factor(easiness_factor, quality);
        (interval, state.repetitions + 1)
    } else {
        (1, 0)
    };

    ReviewState {
        easiness_factor: easiness_factor.max(MIN_EASE_FACTOR),
        interval,
        repetitions,
        next_review_date: add_days(now, interval),
        last_review_date: Some(now),
    }
}

/// Apply one review to `word`, returning the updated record. Content fields
/// are carried over unchanged.
pub fn review(word: &Word, quality: Quality, now: DateTime<Utc>) -> Word {
    let state = next_state(word.review_state(), quality, now);
    word.clone().with_review_state(state)
}

pub fn preview(state: &ReviewState, now: DateTime<Utc>) -> NextStates {
    NextStates {
        forgot: next_state(state, Quality::FORGOT, now),
        blurry: next_state(state, Quality::BLURRY, now),
        know: next_state(state, Quality::KNOW, now),
    }
}

fn add_days(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_add_days(Days::new(days.into()))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_close, at, word_with_state};
    use crate::word::Proficiency;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn quality_bounds() {
        assert_eq!(Quality::new(0).map(Quality::value).ok(), Some(0));
        assert_eq!(Quality::new(5).map(Quality::value).ok(), Some(5));
        assert!(matches!(
            Quality::new(6),
            Err(WordMasterError::InvalidQuality { value: 6 })
        ));
        assert!(!Quality::FORGOT.is_pass());
        assert!(Quality::BLURRY.is_pass());
        assert!(Quality::KNOW.is_pass());
    }

    #[test]
    fn quality_serde() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Quality::BLURRY)?, "3");
        assert_eq!(serde_json::from_str::<Quality>("5")?, Quality::KNOW);
        assert!(serde_json::from_str::<Quality>("9").is_err());
        Ok(())
    }

    #[test]
    fn first_review_known() {
        let now = at(2024, 1, 1);
        let word = word_with_state("w", 2.5, 0, 0, now, None);
        let next = review(&word, Quality::KNOW, now);
        assert_eq!(next.easiness_factor(), 2.6);
        assert_eq!(next.repetitions(), 1);
        assert_eq!(next.interval(), 1);
        assert_eq!(next.proficiency(), Proficiency::Learning);
        assert_eq!(next.last_review_date(), Some(now));
        assert_eq!(next.next_review_date(), at(2024, 1, 2));
    }

    #[test]
    fn second_review_is_six_days() {
        let now = at(2024, 1, 2);
        let word = word_with_state("w", 2.36, 1, 1, now, Some(at(2024, 1, 1)));
        let next = review(&word, Quality::BLURRY, now);
        assert_eq!(next.interval(), 6);
        assert_eq!(next.repetitions(), 2);
        assert_close(next.easiness_factor(), 2.22);
    }

    #[test]
    fn later_reviews_multiply_by_old_ease() {
        let now = at(2024, 1, 8);
        let word = word_with_state("w", 2.5, 2, 6, now, Some(at(2024, 1, 2)));
        let next = review(&word, Quality::KNOW, now);
        assert_eq!(next.interval(), 15);
        assert_eq!(next.repetitions(), 3);
        assert_eq!(next.proficiency(), Proficiency::Review);

        let word = word_with_state("w", 2.36, 4, 13, now, Some(at(2024, 1, 2)));
        let next = review(&word, Quality::new(4).unwrap(), now);
        // 13 * 2.36 = 30.68
        assert_eq!(next.interval(), 31);
        assert_close(next.easiness_factor(), 2.36);
    }

    #[test]
    fn lapse_resets_streak() {
        let now = at(2024, 2, 1);
        let word = word_with_state("w", 2.5, 2, 6, now, Some(at(2024, 1, 26)));
        let next = review(&word, Quality::FORGOT, now);
        assert_eq!(next.repetitions(), 0);
        assert_eq!(next.interval(), 1);
        assert_eq!(next.easiness_factor(), 2.5);
        assert_eq!(next.proficiency(), Proficiency::Learning);

        let word = word_with_state("w", 1.9, 9, 240, now, Some(at(2023, 6, 1)));
        for value in 0..3 {
            let next = review(&word, Quality::new(value).unwrap(), now);
            assert_eq!((next.repetitions(), next.interval()), (0, 1));
        }
    }

    #[test]
    fn ease_floor_on_hard_answer() {
        let now = at(2024, 3, 1);
        let word = word_with_state("w", 1.3, 3, 10, now, Some(at(2024, 2, 20)));
        let next = review(&word, Quality::BLURRY, now);
        assert_eq!(next.easiness_factor(), 1.3);
        assert_eq!(next.interval(), 13);
        assert_eq!(next.repetitions(), 4);
        assert_eq!(next.proficiency(), Proficiency::Review);
    }

    #[test]
    fn mastered_after_six_passes() {
        let mut now = at(2024, 1, 1);
        let mut word = Word::new("w", "", "", now);
        let mut tiers = vec![];
        for _ in 0..7 {
            word = review(&word, Quality::KNOW, now);
            tiers.push(word.proficiency());
            now = word.next_review_date();
        }
        use Proficiency::*;
        assert_eq!(
            tiers,
            [Learning, Learning, Review, Review, Review, Mastered, Mastered]
        );
        assert_eq!(word.repetitions(), 7);
    }

    #[test]
    fn next_review_adds_calendar_days() {
        let now = Utc.with_ymd_and_hms(2024, 2, 27, 21, 30, 0).unwrap();
        let word = word_with_state("w", 2.5, 1, 1, now, Some(now - Duration::days(1)));
        let next = review(&word, Quality::KNOW, now);
        assert_eq!(
            next.next_review_date(),
            Utc.with_ymd_and_hms(2024, 3, 4, 21, 30, 0).unwrap()
        );
    }

    #[test]
    fn content_is_untouched() {
        let now = at(2024, 1, 1);
        let mut word = Word::new("gregarious", "sociable", "She is gregarious.", now)
            .with_tag("imported");
        word.is_favorite = true;
        let next = review(&word, Quality::KNOW, now);
        assert_eq!(next.id, word.id);
        assert_eq!(next.term, word.term);
        assert_eq!(next.example, word.example);
        assert_eq!(next.tags, word.tags);
        assert!(next.is_favorite);
    }

    #[test]
    fn preview_each_answer() {
        let now = at(2024, 4, 10);
        let word = word_with_state("w", 2.5, 2, 6, now, Some(at(2024, 4, 4)));
        let NextStates {
            forgot,
            blurry,
            know,
        } = preview(word.review_state(), now);
        assert_eq!(forgot.interval, 1);
        assert_eq!(blurry.interval, 15);
        assert_eq!(know.interval, 15);
        assert_close(blurry.easiness_factor, 2.36);
        assert_close(know.easiness_factor, 2.6);
        // preview does not commit anything
        assert_eq!(word.repetitions(), 2);
    }

    #[test]
    fn random_histories_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut now = at(2024, 1, 1);
        let mut word = Word::new("w", "", "", now);
        for _ in 0..2000 {
            let before = *word.review_state();
            let quality = Quality::new(rng.random_range(0..=5)).unwrap();
            word = review(&word, quality, now);
            let after = word.review_state();

            assert!(after.easiness_factor >= MIN_EASE_FACTOR);
            assert_ne!(word.proficiency(), Proficiency::New);
            assert_eq!(after.last_review_date, Some(now));
            assert_eq!(
                after.next_review_date,
                now + Duration::days(after.interval.into())
            );
            if quality.is_pass() {
                assert_eq!(after.repetitions, before.repetitions + 1);
                let expected = match before.repetitions {
                    0 => 1,
                    1 => 6,
                    _ => (f64::from(before.interval) * before.easiness_factor).round() as u32,
                };
                assert_eq!(after.interval, expected);
            } else {
                assert_eq!((after.repetitions, after.interval), (0, 1));
            }
            // keep intervals bounded so the dates stay representable
            if after.interval > 3650 {
                word = word_with_state("w", 2.5, 0, 0, now, None);
            }
            now += Duration::hours(rng.random_range(1..96));
        }
    }
}
