use serde::Serialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::distance::distance;
use crate::error::SpellError;
use crate::hashmap::ChainedHashMap;
use crate::tokenizer::words;
use crate::top_k::TopK;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub word: String,
    pub distance: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Correct {
        word: String,
    },
    Misspelled {
        word: String,
        suggestions: Vec<Suggestion>,
    },
}

impl CheckOutcome {
    pub fn word(&self) -> &str {
        match self {
            CheckOutcome::Correct { word } | CheckOutcome::Misspelled { word, .. } => word,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, CheckOutcome::Correct { .. })
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            CheckOutcome::Correct { .. } => &[],
            CheckOutcome::Misspelled { suggestions, .. } => suggestions,
        }
    }
}

/// Dictionary held in a [`ChainedHashMap`].
///
/// Each entry's value caches the distance from that word to the most recent
/// misspelled query (`None` until the first miss). A miss rescans the whole
/// table, so the cache is always refreshed before it is read.
#[derive(Debug, Clone)]
pub struct SpellChecker {
    dictionary: ChainedHashMap<Option<usize>>,
    config: Config,
}

impl SpellChecker {
    pub fn new(config: Config) -> Result<Self, SpellError> {
        let dictionary = ChainedHashMap::with_hasher(config.initial_capacity, config.hash)?;
        Ok(SpellChecker { dictionary, config })
    }

    pub fn from_words<I>(words: I, config: Config) -> Result<Self, SpellError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut checker = Self::new(config)?;
        for word in words {
            checker.add_word_to_dictionary(word.as_ref());
        }
        Ok(checker)
    }

    pub fn from_reader<R: Read>(reader: R, config: Config) -> Result<Self, SpellError> {
        let start = Instant::now();
        let mut checker = Self::new(config)?;
        for word in words(reader) {
            checker.add_word_to_dictionary(&word?);
        }
        checker.log_loaded(start);
        Ok(checker)
    }

    pub fn from_file(path: impl AsRef<Path>, config: Config) -> Result<Self, SpellError> {
        let path = path.as_ref();
        let unreadable = |source: io::Error| SpellError::DictionaryUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unreadable)?;
        let start = Instant::now();
        let mut checker = Self::new(config)?;
        for word in words(file) {
            checker.add_word_to_dictionary(&word.map_err(unreadable)?);
        }
        checker.log_loaded(start);
        Ok(checker)
    }

    fn log_loaded(&self, start: Instant) {
        tracing::info!(
            words = self.dictionary.len(),
            capacity = self.dictionary.capacity(),
            empty_buckets = self.dictionary.empty_bucket_count(),
            elapsed = ?start.elapsed(),
            "dictionary loaded"
        );
    }

    /// Adds `word` to the dictionary. Returns `false` if it was already
    /// present; its cached distance is reset either way.
    pub fn add_word_to_dictionary(&mut self, word: &str) -> bool {
        self.dictionary.put(self.config.normalize(word), None).is_none()
    }

    pub fn remove_word(&mut self, word: &str) -> bool {
        self.dictionary
            .remove(&self.config.normalize(word))
            .is_some()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.dictionary.contains_key(&self.config.normalize(word))
    }

    /// Checks a single word, returning up to five suggestions when it is not
    /// in the dictionary.
    pub fn check(&mut self, word: &str) -> CheckOutcome {
        let query = self.config.normalize(word);
        if self.dictionary.contains_key(&query) {
            return CheckOutcome::Correct { word: query };
        }

        self.score_against(&query);

        let mut top: TopK<&str> = TopK::new();
        for (candidate, cached) in self.dictionary.iter() {
            // score_against has just filled every entry
            debug_assert!(cached.is_some(), "entry {candidate:?} was not scored");
            if let Some(d) = *cached {
                if top.offer(candidate, d) {
                    tracing::trace!(candidate, distance = d, "candidate kept");
                }
            }
        }
        let suggestions: Vec<Suggestion> = top
            .iter()
            .map(|(candidate, d)| Suggestion {
                word: (*candidate).to_owned(),
                distance: d,
            })
            .collect();

        tracing::debug!(
            query = %query,
            scanned = self.dictionary.len(),
            suggestions = suggestions.len(),
            "misspelled word scanned"
        );
        CheckOutcome::Misspelled {
            word: query,
            suggestions,
        }
    }

    pub fn check_words<S: AsRef<str>>(&mut self, words: &[S]) -> Vec<CheckOutcome> {
        words.iter().map(|word| self.check(word.as_ref())).collect()
    }

    fn score_against(&mut self, query: &str) {
        if self.config.parallel_scoring {
            self.dictionary
                .par_for_each_value_mut(|key, cached| *cached = Some(distance(key, query)));
        } else {
            for (key, cached) in self.dictionary.iter_mut() {
                *cached = Some(distance(key, query));
            }
        }
    }

    /// Distance cached for `word` by the most recent miss.
    pub fn last_distance(&self, word: &str) -> Option<usize> {
        self.dictionary
            .get(&self.config.normalize(word))
            .copied()
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    pub fn dictionary(&self) -> &ChainedHashMap<Option<usize>> {
        &self.dictionary
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
