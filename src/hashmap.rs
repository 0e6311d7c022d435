//! String-keyed hash table with separate chaining.
//!
//! ## Layout
//! - `capacity` buckets, each an owned `VecDeque` of entries.
//! - New entries are pushed at the bucket head, so a bucket reads newest
//!   first.
//! - Bucket index is `hash(key).rem_euclid(capacity)`.
//!
//! ## Growth
//! Before inserting a *new* key, if `len / capacity >= 0.75` the table doubles
//! and every entry is re-hashed into the new bucket array. Old buckets are
//! walked in index order, head first, and each entry is prepended to its new
//! bucket. Overwriting an existing key never grows the table.
//!
//! ## Iteration order
//! Bucket index order, then head-first within a bucket. Deterministic for a
//! given hash function, capacity and insertion history.

use std::collections::VecDeque;
use std::fmt;

use rayon::prelude::*;

use crate::error::{InvariantError, SpellError};

/// Load factor at or above which the next new-key insert doubles the table.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

/// Hash functions over the characters of a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashFunction {
    /// Sum of character codes.
    #[default]
    Sum,
    /// Sum of character codes weighted by their 1-based position.
    PositionWeighted,
}

impl HashFunction {
    pub fn hash(self, key: &str) -> i64 {
        match self {
            HashFunction::Sum => key
                .chars()
                .fold(0i64, |acc, c| acc.wrapping_add(c as i64)),
            HashFunction::PositionWeighted => {
                key.chars().enumerate().fold(0i64, |acc, (i, c)| {
                    acc.wrapping_add((i as i64 + 1).wrapping_mul(c as i64))
                })
            }
        }
    }

    fn index(self, key: &str, capacity: usize) -> usize {
        self.hash(key).rem_euclid(capacity as i64) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    key: String,
    value: V,
}

impl<V> Entry<V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

type Bucket<V> = VecDeque<Entry<V>>;

#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    buckets: Vec<Bucket<V>>,
    len: usize,
    hasher: HashFunction,
}

impl<V> ChainedHashMap<V> {
    pub fn with_capacity(capacity: usize) -> Result<Self, SpellError> {
        Self::with_hasher(capacity, HashFunction::default())
    }

    pub fn with_hasher(capacity: usize, hasher: HashFunction) -> Result<Self, SpellError> {
        if capacity == 0 {
            return Err(SpellError::InvalidCapacity(capacity));
        }
        Ok(Self {
            buckets: empty_buckets(capacity),
            len: 0,
            hasher,
        })
    }

    fn bucket_index(&self, key: &str) -> usize {
        self.hasher.index(key, self.buckets.len())
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or overwrites `key`.
    ///
    /// Returns the previous value if the key was already present, in which
    /// case the table is left structurally untouched.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }

        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.grow();
        }

        let index = self.bucket_index(&key);
        self.buckets[index].push_front(Entry { key, value });
        self.len += 1;
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|entry| entry.key == key)?;
        let entry = bucket.remove(position)?;
        self.len -= 1;
        Some(entry.value)
    }

    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old.into_iter().flatten() {
            let index = self.hasher.index(&entry.key, new_capacity);
            self.buckets[index].push_front(entry);
        }
        tracing::debug!(
            old_capacity,
            new_capacity,
            len = self.len,
            "hash table grown"
        );
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn empty_bucket_count(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    pub fn hasher(&self) -> HashFunction {
        self.hasher
    }

    /// Removes every entry. Capacity is kept.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(VecDeque::clear);
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut V)> {
        self.buckets
            .iter_mut()
            .flatten()
            .map(|entry| (entry.key.as_str(), &mut entry.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry<V>> {
        self.buckets.iter().flatten()
    }

    /// Verifies that `len` matches the bucket contents, that every entry sits
    /// in the bucket its key hashes to, and that no key appears twice.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.buckets.is_empty() {
            return Err(InvariantError::new("table has zero buckets"));
        }
        let counted: usize = self.buckets.iter().map(VecDeque::len).sum();
        if counted != self.len {
            return Err(InvariantError::new(format!(
                "len {} does not match {} entries in buckets",
                self.len, counted
            )));
        }
        for (index, bucket) in self.buckets.iter().enumerate() {
            for (pos, entry) in bucket.iter().enumerate() {
                let expected = self.bucket_index(&entry.key);
                if expected != index {
                    return Err(InvariantError::new(format!(
                        "key {:?} stored in bucket {} but hashes to {}",
                        entry.key, index, expected
                    )));
                }
                if bucket.iter().skip(pos + 1).any(|other| other.key == entry.key) {
                    return Err(InvariantError::new(format!(
                        "key {:?} appears more than once",
                        entry.key
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<V: Send> ChainedHashMap<V> {
    /// Calls `f` with every key and a mutable reference to its value, spread
    /// across the rayon pool one bucket at a time. The table's structure is
    /// not changed.
    pub fn par_for_each_value_mut<F>(&mut self, f: F)
    where
        F: Fn(&str, &mut V) + Sync + Send,
    {
        self.buckets.par_iter_mut().for_each(|bucket| {
            for entry in bucket.iter_mut() {
                f(&entry.key, &mut entry.value);
            }
        });
    }
}

impl<V: fmt::Debug> fmt::Display for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            write!(f, "[{index}]:")?;
            for entry in bucket {
                write!(f, " {}={:?}", entry.key, entry.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn empty_buckets<V>(capacity: usize) -> Vec<Bucket<V>> {
    (0..capacity).map(|_| VecDeque::new()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(capacity: usize) -> ChainedHashMap<i32> {
        ChainedHashMap::with_capacity(capacity).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = ChainedHashMap::<i32>::with_capacity(0).unwrap_err();
        assert!(matches!(err, SpellError::InvalidCapacity(0)));
    }

    #[test]
    fn test_put_get_independent_values() {
        let mut map = table(16);
        map.put("alpha", 1);
        map.put("beta", 2);
        assert_eq!(map.get("alpha"), Some(&1));
        assert_eq!(map.get("beta"), Some(&2));
        assert_eq!(map.get("gamma"), None);
    }

    #[test]
    fn test_reput_overwrites_without_growing_len() {
        let mut map = table(16);
        assert_eq!(map.put("alpha", 1), None);
        assert_eq!(map.put("alpha", 7), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("alpha"), Some(&7));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut map = table(4);
        map.put("word", -1);
        *map.get_mut("word").unwrap() = 3;
        assert_eq!(map.get("word"), Some(&3));
        assert!(map.get_mut("missing").is_none());
    }

    #[test]
    fn test_remove_head_middle_and_tail() {
        // anagrams share a bucket under the sum hash
        let mut map = table(1000);
        for (k, v) in [("abc", 1), ("bca", 2), ("cab", 3)] {
            map.put(k, v);
        }
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["cab", "bca", "abc"]);

        assert_eq!(map.remove("bca"), Some(2));
        assert_eq!(map.remove("cab"), Some(3));
        assert_eq!(map.remove("abc"), Some(1));
        assert_eq!(map.remove("abc"), None);
        assert!(map.is_empty());
        map.check_invariants().unwrap();
    }

    #[test]
    fn test_len_after_puts_and_removes() {
        let mut map = table(8);
        for i in 0..50 {
            map.put(format!("key{i}"), i);
        }
        assert_eq!(map.len(), 50);
        for i in 0..20 {
            map.remove(&format!("key{i}"));
        }
        assert_eq!(map.len(), 30);
        map.check_invariants().unwrap();
    }

    #[test]
    fn test_growth_doubles_once_per_crossing() {
        let mut map = table(4);
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);
        assert_eq!(map.capacity(), 4);
        // 3/4 == 0.75 before this insert
        map.put("d", 4);
        assert_eq!(map.capacity(), 8);
        map.put("e", 5);
        map.put("f", 6);
        assert_eq!(map.capacity(), 8);
        // 6/8 == 0.75
        map.put("g", 7);
        assert_eq!(map.capacity(), 16);
        for (i, key) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            assert_eq!(map.get(key), Some(&(i as i32 + 1)));
        }
        map.check_invariants().unwrap();
    }

    #[test]
    fn test_overwrite_at_threshold_does_not_grow() {
        let mut map = table(4);
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);
        map.put("a", 10);
        assert_eq!(map.capacity(), 4);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_bucket_order_is_newest_first() {
        let mut map = table(1000);
        // same sum of codes: 97 + 98 == 98 + 97
        map.put("ab", 1);
        map.put("ba", 2);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["ba", "ab"]);
    }

    #[test]
    fn test_iteration_in_bucket_index_order() {
        let mut map = table(1000);
        for word in ["cat", "cot", "dog", "cap", "bat"] {
            map.put(word, -1);
        }
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["cap", "bat", "cat", "dog", "cot"]);
    }

    #[test]
    fn test_load_factor_and_empty_buckets() {
        let mut map = table(10);
        assert_eq!(map.empty_bucket_count(), 10);
        map.put("ab", 1);
        map.put("ba", 1);
        map.put("z", 1);
        assert!((map.load_factor() - 0.3).abs() < f64::EPSILON);
        assert_eq!(map.empty_bucket_count(), 8);
    }

    #[test]
    fn test_position_weighted_separates_anagrams() {
        let h = HashFunction::PositionWeighted;
        assert_ne!(h.hash("ab"), h.hash("ba"));
        assert_eq!(HashFunction::Sum.hash("ab"), HashFunction::Sum.hash("ba"));
        assert_eq!(h.hash("ab"), 97 + 2 * 98);
    }

    #[test]
    fn test_index_is_non_negative() {
        let key = "\u{10FFFF}".repeat(4096);
        let index = HashFunction::PositionWeighted.index(&key, 7);
        assert!(index < 7);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut map = table(4);
        for i in 0..10 {
            map.put(i.to_string(), i);
        }
        let capacity = map.capacity();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map.empty_bucket_count(), capacity);
    }

    #[test]
    fn test_par_for_each_value_mut_visits_everything() {
        let mut map = table(3);
        for i in 0..100 {
            map.put(format!("w{i}"), 0);
        }
        map.par_for_each_value_mut(|key, value| *value = key.len() as i32);
        assert!(map.iter().all(|(key, value)| *value == key.len() as i32));
        assert_eq!(map.len(), 100);
    }

    #[test]
    fn test_display_lists_buckets() {
        let mut map = table(2);
        map.put("a", 1);
        let dump = map.to_string();
        assert_eq!(dump, "[0]:\n[1]: a=1\n");
    }
}
