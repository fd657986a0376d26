//! Persistence boundary for words, stats and settings.
//!
//! The scheduler and selector never touch a store; a session driver loads a
//! snapshot, hands it to them and writes the updated record back by id.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use snafu::{OptionExt, ResultExt};

use crate::config::Settings;
use crate::error::{IoSnafu, JsonSnafu, Result, WordNotFoundSnafu};
use crate::stats::UserStats;
use crate::word::Word;

/// Outcome of adding a batch of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddedWords {
    pub added: usize,
    /// Words skipped because their term was already in the collection.
    pub duplicates: usize,
}

pub trait Store {
    fn load_words(&self) -> Result<Vec<Word>>;
    fn save_words(&mut self, words: &[Word]) -> Result<()>;
    fn load_stats(&self) -> Result<UserStats>;
    fn save_stats(&mut self, stats: &UserStats) -> Result<()>;
    fn load_settings(&self) -> Result<Settings>;
    fn save_settings(&mut self, settings: &Settings) -> Result<()>;

    /// Replace the stored word that has the same id as `word`.
    fn replace_word(&mut self, word: &Word) -> Result<()> {
        let mut words = self.load_words()?;
        let slot = words
            .iter_mut()
            .find(|w| w.id == word.id)
            .context(WordNotFoundSnafu { id: &word.id })?;
        *slot = word.clone();
        self.save_words(&words)
    }

    /// Append `new_words`, skipping any whose term (case and surrounding
    /// whitespace ignored) is already present.
    fn add_words(&mut self, new_words: Vec<Word>) -> Result<AddedWords> {
        let mut words = self.load_words()?;
        let mut terms = words
            .iter()
            .map(|w| normalize_term(&w.term))
            .collect::<HashSet<_>>();
        let offered = new_words.len();
        let before = words.len();
        words.extend(
            new_words
                .into_iter()
                .filter(|w| terms.insert(normalize_term(&w.term))),
        );
        let added = words.len() - before;
        if added > 0 {
            self.save_words(&words)?;
        }
        Ok(AddedWords {
            added,
            duplicates: offered - added,
        })
    }

    fn delete_word(&mut self, id: &str) -> Result<Word> {
        let mut words = self.load_words()?;
        let index = words
            .iter()
            .position(|w| w.id == id)
            .context(WordNotFoundSnafu { id })?;
        let removed = words.remove(index);
        self.save_words(&words)?;
        Ok(removed)
    }

    /// Flip the favorite flag of a word, returning the new value.
    fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let mut words = self.load_words()?;
        let word = words
            .iter_mut()
            .find(|w| w.id == id)
            .context(WordNotFoundSnafu { id })?;
        word.is_favorite = !word.is_favorite;
        let favorite = word.is_favorite;
        self.save_words(&words)?;
        Ok(favorite)
    }

    fn clear_words(&mut self) -> Result<()> {
        self.save_words(&[])
    }
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    words: Vec<Word>,
    stats: UserStats,
    settings: Settings,
}

impl MemoryStore {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            ..Default::default()
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl Store for MemoryStore {
    fn load_words(&self) -> Result<Vec<Word>> {
        Ok(self.words.clone())
    }

    fn save_words(&mut self, words: &[Word]) -> Result<()> {
        self.words = words.to_vec();
        Ok(())
    }

    fn load_stats(&self) -> Result<UserStats> {
        Ok(self.stats)
    }

    fn save_stats(&mut self, stats: &UserStats) -> Result<()> {
        self.stats = *stats;
        Ok(())
    }

    fn load_settings(&self) -> Result<Settings> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.settings = settings.clone();
        Ok(())
    }
}

const WORDS_FILE: &str = "words.json";
const STATS_FILE: &str = "stats.json";
const SETTINGS_FILE: &str = "settings.json";

/// Stores each collection as a JSON document in one directory. A missing
/// file reads as an empty collection or default value.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        if !path.exists() {
            debug!("{} not found, using defaults", path.display());
            return Ok(T::default());
        }
        let data = fs::read_to_string(&path).context(IoSnafu { path: &path })?;
        serde_json::from_str(&data).context(JsonSnafu { path })
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir).context(IoSnafu { path: &self.dir })?;
        let path = self.dir.join(name);
        let data = serde_json::to_string_pretty(value).context(JsonSnafu { path: &path })?;
        // readers never see a partially written file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data).context(IoSnafu { path: &tmp })?;
        fs::rename(&tmp, &path).context(IoSnafu { path: &path })?;
        debug!("saved {}", path.display());
        Ok(())
    }
}

impl Store for JsonStore {
    fn load_words(&self) -> Result<Vec<Word>> {
        self.read(WORDS_FILE)
    }

    fn save_words(&mut self, words: &[Word]) -> Result<()> {
        self.write(WORDS_FILE, words)
    }

    fn load_stats(&self) -> Result<UserStats> {
        self.read(STATS_FILE)
    }

    fn save_stats(&mut self, stats: &UserStats) -> Result<()> {
        self.write(STATS_FILE, stats)
    }

    fn load_settings(&self) -> Result<Settings> {
        self.read(SETTINGS_FILE)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.write(SETTINGS_FILE, settings)
    }
}
