//! Entity pools with O(1) unordered removal
//!
//! Removal moves the last live entity into the freed slot. Loops that remove
//! while iterating must not advance their index after a removal, so the
//! entity that was swapped in gets processed too:
//!
//! ```
//! # use bricks::sim::Pool;
//! let mut pool = Pool::fixed(4);
//! for v in [1, 5, 2, 6] {
//!     pool.push(v);
//! }
//! let mut i = 0;
//! while i < pool.len() {
//!     if pool[i] > 4 {
//!         pool.swap_remove(i);
//!         continue;
//!     }
//!     i += 1;
//! }
//! assert_eq!(pool.as_slice(), &[1, 2]);
//! ```

use std::ops::{Index, IndexMut};

use serde::Serialize;

/// A homogeneous entity collection, either capped or growable
#[derive(Debug, Clone, Serialize)]
pub struct Pool<T> {
    items: Vec<T>,
    /// Hard cap, `None` for growable pools
    #[serde(skip)]
    max: Option<usize>,
}

impl<T> Pool<T> {
    /// Pool that never holds more than `max` entities
    pub fn fixed(max: usize) -> Self {
        Self {
            items: Vec::with_capacity(max),
            max: Some(max),
        }
    }

    /// Pool that grows (doubling) as entities are added
    pub fn growable(initial_capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(initial_capacity),
            max: None,
        }
    }

    /// Add an entity; returns false and drops it if the pool is full
    pub fn push(&mut self, item: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the entity at `index`, moving the last entity into its slot
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.items.swap_remove(index)
    }

    /// Keep only the first `len` entities
    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a fixed pool has reached its cap (growable pools never are)
    #[inline]
    pub fn is_full(&self) -> bool {
        self.max.is_some_and(|max| self.items.len() >= max)
    }

    /// Currently allocated slots
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone> Pool<T> {
    /// Replace the contents with a copy of `items`, respecting the cap
    pub fn fill_from(&mut self, items: &[T]) {
        self.items.clear();
        for item in items {
            if !self.push(item.clone()) {
                break;
            }
        }
    }
}

impl<T> Index<usize> for Pool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Pool<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
