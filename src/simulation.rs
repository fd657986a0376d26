use std::collections::HashMap;

use chrono::{DateTime, Days, Utc};
use itertools::Itertools;
use log::info;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;

use crate::error::{InvalidInputSnafu, Result};
use crate::scheduler::{Quality, review};
use crate::selector::{DEFAULT_FALLBACK_SIZE, session_queue};
use crate::word::{Proficiency, Word};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Words available to be introduced.
    pub deck_size: usize,
    /// Days to simulate.
    pub learn_span: usize,
    /// New words added to the collection per day.
    pub learn_limit: usize,
    /// Most words reviewed per day.
    pub review_limit: usize,
    /// Relative odds of answering forgot, blurry and know.
    pub answer_prob: [f32; 3],
    /// Session size on days with nothing due. Zero studies nothing on those days.
    pub fallback_size: usize,
    pub start: DateTime<Utc>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            deck_size: 1000,
            learn_span: 365,
            learn_limit: 20,
            review_limit: usize::MAX,
            answer_prob: [0.15, 0.25, 0.6],
            fallback_size: DEFAULT_FALLBACK_SIZE,
            start: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

#[derive(Debug)]
pub struct SimulationResult {
    pub review_cnt_per_day: Vec<usize>,
    /// Reviews of words seen for the first time.
    pub learn_cnt_per_day: Vec<usize>,
    pub lapse_cnt_per_day: Vec<usize>,
    pub mastered_cnt_per_day: Vec<usize>,
    pub words: Vec<Word>,
}

/// Run one session per day over a growing collection, answering with the
/// configured odds. The same seed always gives the same result.
pub fn simulate(
    config: &SimulatorConfig,
    existing_words: Option<Vec<Word>>,
    seed: Option<u64>,
) -> Result<SimulationResult> {
    let answers =
        WeightedIndex::new(config.answer_prob).map_err(|_| InvalidInputSnafu.build())?;
    let mut rng = StdRng::seed_from_u64(seed.unwrap_or(42));

    let mut words = existing_words.unwrap_or_default();
    let mut index = words
        .iter()
        .enumerate()
        .map(|(i, word)| (word.id.clone(), i))
        .collect::<HashMap<_, _>>();
    let mut introduced = 0;

    let mut review_cnt_per_day = vec![0; config.learn_span];
    let mut learn_cnt_per_day = vec![0; config.learn_span];
    let mut lapse_cnt_per_day = vec![0; config.learn_span];
    let mut mastered_cnt_per_day = vec![0; config.learn_span];

    for today in 0..config.learn_span {
        let Some(now) = config.start.checked_add_days(Days::new(today as u64)) else {
            return InvalidInputSnafu.fail();
        };

        let new_today = config.learn_limit.min(config.deck_size - introduced);
        for n in introduced..introduced + new_today {
            let word = Word::new(format!("word {n}"), "", "", now).with_id(format!("sim-{n}"));
            index.insert(word.id.clone(), words.len());
            words.push(word);
        }
        introduced += new_today;

        let queue = session_queue(&words, now, config.fallback_size);
        for word in queue.iter().take(config.review_limit) {
            let quality = Quality::ANSWERS[answers.sample(&mut rng)];
            if word.proficiency() == Proficiency::New {
                learn_cnt_per_day[today] += 1;
            }
            if !quality.is_pass() {
                lapse_cnt_per_day[today] += 1;
            }
            review_cnt_per_day[today] += 1;
            words[index[&word.id]] = review(word, quality, now);
        }

        mastered_cnt_per_day[today] = words
            .iter()
            .filter(|word| word.proficiency() == Proficiency::Mastered)
            .count();
    }

    info!(
        "simulated {} days: {} reviews, {} lapses, {} of {} words mastered",
        config.learn_span,
        review_cnt_per_day.iter().sum::<usize>(),
        lapse_cnt_per_day.iter().sum::<usize>(),
        mastered_cnt_per_day.last().copied().unwrap_or_default(),
        words.len()
    );

    Ok(SimulationResult {
        review_cnt_per_day,
        learn_cnt_per_day,
        lapse_cnt_per_day,
        mastered_cnt_per_day,
        words,
    })
}

/// Average reviews per day over the last `days` simulated days.
pub fn steady_workload(result: &SimulationResult, days: usize) -> f32 {
    let tail = result
        .review_cnt_per_day
        .iter()
        .rev()
        .take(days)
        .collect_vec();
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().copied().sum::<usize>() as f32 / tail.len() as f32
}
