use chrono::{DateTime, Utc};
use log::{debug, info};
use snafu::OptionExt;

use crate::clock::Clock;
use crate::error::{Result, SessionFinishedSnafu};
use crate::scheduler::{self, NextStates, Quality};
use crate::selector::session_queue;
use crate::store::Store;
use crate::word::Word;

/// One answered word.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEvent {
    pub word_id: String,
    pub term: String,
    pub quality: Quality,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionSummary {
    pub reviewed: usize,
    pub known: usize,
    pub blurry: usize,
    pub forgot: usize,
    pub study_seconds: f64,
}

/// Drives one study session against a [`Store`].
///
/// The queue is fixed when the session starts. Every answer is scheduled,
/// written back to the store by id and counted in the learner's stats
/// before the next word is shown.
pub struct ReviewSession<'a, S: Store + ?Sized, C: Clock> {
    store: &'a mut S,
    clock: C,
    queue: Vec<Word>,
    position: usize,
    events: Vec<ReviewEvent>,
    started_at: DateTime<Utc>,
}

impl<'a, S: Store + ?Sized, C: Clock> ReviewSession<'a, S, C> {
    pub fn start(store: &'a mut S, clock: C) -> Result<Self> {
        let settings = store.load_settings()?;
        let words = store.load_words()?;
        let now = clock.now();
        let queue = session_queue(&words, now, settings.review_fallback_size);
        info!(
            "review session with {} of {} words",
            queue.len(),
            words.len()
        );
        Ok(Self {
            store,
            clock,
            queue,
            position: 0,
            events: Vec::new(),
            started_at: now,
        })
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn current(&self) -> Option<&Word> {
        self.queue.get(self.position)
    }

    /// What each answer would do to the current word.
    pub fn preview(&self) -> Option<NextStates> {
        let now = self.clock.now();
        self.current()
            .map(|word| scheduler::preview(word.review_state(), now))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len() - self.position
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Record the learner's answer for the current word and move on.
    /// Returns the updated word as stored.
    pub fn review(&mut self, quality: Quality, duration_seconds: f64) -> Result<Word> {
        let word = self.queue.get(self.position).context(SessionFinishedSnafu)?;
        let now = self.clock.now();
        let updated = scheduler::review(word, quality, now);
        self.store.replace_word(&updated)?;

        let mut stats = self.store.load_stats()?;
        stats.record_review(quality, duration_seconds, now);
        self.store.save_stats(&stats)?;

        debug!(
            "{} q={} -> interval {}d, ease {:.2}, {}",
            updated.term,
            quality.value(),
            updated.interval(),
            updated.easiness_factor(),
            updated.proficiency()
        );
        self.events.push(ReviewEvent {
            word_id: updated.id.clone(),
            term: updated.term.clone(),
            quality,
            duration_seconds,
        });
        self.position += 1;
        Ok(updated)
    }

    pub fn events(&self) -> &[ReviewEvent] {
        &self.events
    }

    pub fn summary(&self) -> SessionSummary {
        self.events
            .iter()
            .fold(SessionSummary::default(), |mut summary, event| {
                summary.reviewed += 1;
                summary.study_seconds += event.duration_seconds;
                match event.quality.value() {
                    5 => summary.known += 1,
                    3 | 4 => summary.blurry += 1,
                    _ => summary.forgot += 1,
                }
                summary
            })
    }
}
