use crate::hashmap::HashFunction;

/// Initial bucket count used when none is given.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Settings for building a [`SpellChecker`](crate::SpellChecker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub initial_capacity: usize,
    pub hash: HashFunction,
    /// Lowercase dictionary words and queries alike.
    pub normalize_case: bool,
    /// Score dictionary entries on the rayon pool. Selection order is
    /// unaffected.
    pub parallel_scoring: bool,
}

impl Config {
    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_hash(mut self, hash: HashFunction) -> Self {
        self.hash = hash;
        self
    }

    pub fn with_normalize_case(mut self, normalize_case: bool) -> Self {
        self.normalize_case = normalize_case;
        self
    }

    pub fn with_parallel_scoring(mut self, parallel_scoring: bool) -> Self {
        self.parallel_scoring = parallel_scoring;
        self
    }

    pub fn normalize(&self, word: &str) -> String {
        if self.normalize_case {
            word.to_lowercase()
        } else {
            word.to_owned()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            hash: HashFunction::Sum,
            normalize_case: true,
            parallel_scoring: false,
        }
    }
}
