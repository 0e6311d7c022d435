//! Bounded selection of the `K` lowest-scored candidates from a stream.
//!
//! Slots are filled left to right. An incoming candidate walks the slots and
//! swaps into the first one whose resident scores strictly higher; the evicted
//! resident keeps walking right with the same rule, so evictions cascade until
//! something lands in an empty slot or falls off the end. Equal scores never
//! displace, which makes tie order depend on the order candidates were offered.

use std::mem;

/// Number of suggestions reported for a misspelled word.
pub const DEFAULT_K: usize = 5;

#[derive(Debug, Clone)]
pub struct TopK<T, const K: usize = DEFAULT_K> {
    slots: [Option<(T, usize)>; K],
}

impl<T, const K: usize> TopK<T, K> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Offers `candidate` with `score`. Returns `true` if the tracked set
    /// changed (the candidate filled a slot or displaced a resident).
    pub fn offer(&mut self, candidate: T, score: usize) -> bool {
        let mut incoming = (candidate, score);
        let mut changed = false;
        for slot in self.slots.iter_mut() {
            match *slot {
                None => {
                    *slot = Some(incoming);
                    return true;
                }
                Some(ref mut resident) => {
                    if resident.1 > incoming.1 {
                        mem::swap(resident, &mut incoming);
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    /// Filled slots in order, with their scores.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.slots
            .iter()
            .map_while(|slot| slot.as_ref())
            .map(|(candidate, score)| (candidate, *score))
    }

    /// Candidates in ascending score order.
    pub fn results(&self) -> Vec<&T> {
        self.iter().map(|(candidate, _)| candidate).collect()
    }

    pub fn into_scored(self) -> Vec<(T, usize)> {
        self.slots.into_iter().map_while(|slot| slot).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        K
    }
}

impl<T, const K: usize> Default for TopK<T, K> {
    fn default() -> Self {
        Self::new()
    }
}
