mod clock;
mod config;
mod error;
mod scheduler;
mod selector;
mod session;
mod simulation;
mod stats;
mod store;
#[cfg(test)]
mod test_helpers;
mod word;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Settings;
pub use error::{Result, WordMasterError};
pub use scheduler::{NextStates, Quality, next_easiness_factor, next_state, preview, review};
pub use selector::{
    DEFAULT_FALLBACK_SIZE, due_count, due_words, least_recently_reviewed, session_queue,
};
pub use session::{ReviewEvent, ReviewSession, SessionSummary};
pub use simulation::{SimulationResult, SimulatorConfig, simulate, steady_workload};
pub use stats::{ProficiencyCounts, UserStats};
pub use store::{AddedWords, JsonStore, MemoryStore, Store};
pub use word::{DEFAULT_EASE_FACTOR, Example, MIN_EASE_FACTOR, Proficiency, ReviewState, Word};
