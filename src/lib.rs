//! Dictionary spell checker backed by a chained hash table.
//!
//! Known words are reported as correct. Anything else is compared against
//! every dictionary word by Levenshtein distance and the five closest are
//! returned.
//!
//! ```
//! use hashspell::{Config, SpellChecker};
//!
//! let mut checker = SpellChecker::from_words(["cat", "cot", "dog"], Config::default()).unwrap();
//! assert!(checker.check("Cat").is_correct());
//! assert_eq!(checker.check("cit").suggestions()[0].word, "cat");
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod hashmap;
pub mod spellcheck;
pub mod tokenizer;
pub mod top_k;

pub use config::Config;
pub use distance::distance;
pub use error::{InvariantError, SpellError};
pub use hashmap::{ChainedHashMap, HashFunction};
pub use spellcheck::{CheckOutcome, SpellChecker, Suggestion};
pub use tokenizer::{Words, words};
pub use top_k::TopK;

#[cfg(test)]
mod proptests;
