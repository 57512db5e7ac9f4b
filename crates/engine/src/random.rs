// Randomness provider for the probability gate and note selection.

use std::collections::VecDeque;

use rand::Rng;

/// Source of the two random choices made per run.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn choose(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn choose(&mut self, len: usize) -> usize {
        (**self).choose(len)
    }
}

/// Process entropy via `rand::thread_rng`. Runs are not reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn choose(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Replays fixed draws in order. Once a queue is exhausted it yields 0.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    units: VecDeque<f64>,
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(units: impl IntoIterator<Item = f64>, picks: impl IntoIterator<Item = usize>) -> Self {
        Self { units: units.into_iter().collect(), picks: picks.into_iter().collect() }
    }

    /// Draws not yet consumed, as `(units, picks)`.
    pub fn remaining(&self) -> (usize, usize) {
        (self.units.len(), self.picks.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.0)
    }

    fn choose(&mut self, len: usize) -> usize {
        match (self.picks.pop_front(), len) {
            (_, 0) | (None, _) => 0,
            (Some(index), len) => index % len,
        }
    }
}
