use serde::{Deserialize, Serialize};

use crate::selector::DEFAULT_FALLBACK_SIZE;

/// Learner settings. Keys missing from a stored settings file take their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Passing reviews per day the learner aims for.
    pub daily_goal: u32,
    /// Queue size for a session started when nothing is due.
    pub review_fallback_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal: 20,
            review_fallback_size: DEFAULT_FALLBACK_SIZE,
        }
    }
}
