use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::scheduler::Quality;
use crate::word::{Proficiency, Word};

/// Learner-wide counters, updated once per review.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    /// Passing reviews over all time.
    pub total_learned: u32,
    pub study_time_seconds: f64,
    /// Consecutive calendar days (UTC) with at least one review.
    pub streak_days: u32,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_study_date: Option<DateTime<Utc>>,
}

impl UserStats {
    pub fn record_review(&mut self, quality: Quality, duration_seconds: f64, now: DateTime<Utc>) {
        if quality.is_pass() {
            self.total_learned += 1;
        }
        self.study_time_seconds += duration_seconds.max(0.0);

        let today = now.date_naive();
        match self.last_study_date.map(|last| last.date_naive()) {
            Some(last) if today <= last => {}
            Some(last) if (today - last).num_days() == 1 => self.streak_days += 1,
            _ => self.streak_days = 1,
        }
        if self.streak_days == 0 {
            self.streak_days = 1;
        }
        self.last_study_date = Some(now);
    }

    /// Progress towards today's goal, 0 to 100.
    pub fn daily_progress_percent(&self, daily_goal: u32) -> u32 {
        if daily_goal == 0 {
            return 0;
        }
        let done = f64::from(self.total_learned % daily_goal);
        ((done / f64::from(daily_goal) * 100.0).round() as u32).min(100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProficiencyCounts {
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub mastered: usize,
}

impl ProficiencyCounts {
    pub fn from_words(words: &[Word]) -> Self {
        let counts = words.iter().map(Word::proficiency).counts();
        let get = |p: Proficiency| counts.get(&p).copied().unwrap_or_default();
        Self {
            new: get(Proficiency::New),
            learning: get(Proficiency::Learning),
            review: get(Proficiency::Review),
            mastered: get(Proficiency::Mastered),
        }
    }

    pub fn get(&self, proficiency: Proficiency) -> usize {
        match proficiency {
            Proficiency::New => self.new,
            Proficiency::Learning => self.learning,
            Proficiency::Review => self.review,
            Proficiency::Mastered => self.mastered,
        }
    }

    pub fn total(&self) -> usize {
        self.new + self.learning + self.review + self.mastered
    }
}
