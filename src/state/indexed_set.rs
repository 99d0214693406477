//! Dense vertex set with stable, indexable order.

use rand::Rng;

const ABSENT: usize = usize::MAX;

/// Set of vertex indices in `0..n` with O(1) insert, remove, membership and
/// uniform random choice.
///
/// Members live in a dense vector; removal swaps the last member into the
/// hole. The order therefore depends only on the sequence of operations,
/// which keeps random draws reproducible for a fixed seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedSet {
    items: Vec<usize>,
    position: Vec<usize>,
}

impl IndexedSet {
    /// Creates an empty set over the universe `0..universe`.
    pub fn new(universe: usize) -> Self {
        Self {
            items: Vec::new(),
            position: vec![ABSENT; universe],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.position[v] != ABSENT
    }

    /// Inserts `v`. Returns `false` if it was already present.
    pub fn insert(&mut self, v: usize) -> bool {
        if self.contains(v) {
            return false;
        }
        self.position[v] = self.items.len();
        self.items.push(v);
        true
    }

    /// Removes `v`. Returns `false` if it was not present.
    pub fn remove(&mut self, v: usize) -> bool {
        let idx = self.position[v];
        if idx == ABSENT {
            return false;
        }
        self.items.swap_remove(idx);
        if let Some(&moved) = self.items.get(idx) {
            self.position[moved] = idx;
        }
        self.position[v] = ABSENT;
        true
    }

    /// Members in their current internal order.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().copied()
    }

    /// Picks a member uniformly at random, or `None` if the set is empty.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items[rng.random_range(0..self.items.len())])
        }
    }
}
