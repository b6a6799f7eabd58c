//! Random source for favored-receiver selection.

use rand::Rng;

/// Picks the favored receiver's index.
pub trait RandomSource {
    /// Return an index uniformly distributed over `[0, len)`.
    ///
    /// Only called with `len >= 1`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Production source: the thread-local OS-seeded RNG, fetched per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Scripted source that replays a fixed list of indices, cycling when it
/// runs out. For tests and reproducible demos.
#[derive(Clone, Debug)]
pub struct FixedRandom {
    picks: Vec<usize>,
    next: usize,
}

impl FixedRandom {
    /// Replay `picks` in order. An empty list always picks index 0.
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }

    /// Always pick `index`.
    pub fn always(index: usize) -> Self {
        Self::new(vec![index])
    }
}

impl RandomSource for FixedRandom {
    fn pick_index(&mut self, _len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.next % self.picks.len()];
        self.next = self.next.wrapping_add(1);
        pick
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}
