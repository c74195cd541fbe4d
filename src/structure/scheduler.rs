//! Pending worklist for piece expansion
//!
//! Pieces wait here until they get to spawn children. The next one is drawn
//! uniformly at random, so growth is neither depth- nor breadth-first.

use crate::rng::JavaRandom;

/// Indices of pieces that have not spawned children yet
#[derive(Clone, Debug, Default)]
pub struct Worklist {
    items: Vec<usize>,
}

impl Worklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, piece: usize) {
        self.items.push(piece);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove and return a uniformly drawn entry, keeping the others in order.
    ///
    /// Draws exactly once when non-empty and never when empty.
    pub fn pop_random(&mut self, rng: &mut JavaRandom) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let i = rng.next_int_bound(self.items.len() as i32) as usize;
        Some(self.items.remove(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pop_draws_nothing() {
        let mut list = Worklist::new();
        let mut rng = JavaRandom::new(4);
        let before = rng.clone();
        assert_eq!(list.pop_random(&mut rng), None);
        assert_eq!(rng, before);
    }

    #[test]
    fn test_pop_uses_one_bounded_draw() {
        let mut list = Worklist::new();
        for i in [10, 11, 12, 13] {
            list.push(i);
        }
        let mut rng = JavaRandom::new(42);
        let mut mirror = JavaRandom::new(42);
        let expected = [10, 11, 12, 13][mirror.next_int_bound(4) as usize];
        assert_eq!(list.pop_random(&mut rng), Some(expected));
        assert_eq!(list.len(), 3);
        assert_eq!(rng, mirror);
    }

    #[test]
    fn test_drains_every_entry_once() {
        let mut list = Worklist::new();
        for i in 0..20 {
            list.push(i);
        }
        let mut rng = JavaRandom::new(-9);
        let mut seen = Vec::new();
        while let Some(i) = list.pop_random(&mut rng) {
            seen.push(i);
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }
}
