//! Random number sources.
//!
//! Every stochastic decision in the annealer goes through [`RandomSource`],
//! which is passed in explicitly. Any [`rand::Rng`] is a source; unit
//! tests substitute a scripted source to replay exact draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(test)]
use std::collections::VecDeque;

/// An injectable source of uniform floats and bounded indices.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform index in `[0, bound)`. `bound` must be positive.
    fn index(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Creates a seeded, reproducible generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Replays a fixed sequence of draws. Test builds only.
///
/// Floats and indices are consumed from two independent queues in the
/// order they were supplied.
///
/// # Panics
///
/// Panics when a queue runs dry or when a scripted index is out of the
/// requested bound.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedRandom {
    uniforms: VecDeque<f64>,
    indices: VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(uniforms: Vec<f64>, indices: Vec<usize>) -> Self {
        Self {
            uniforms: uniforms.into(),
            indices: indices.into(),
        }
    }

    pub(crate) fn with_indices(indices: Vec<usize>) -> Self {
        Self::new(Vec::new(), indices)
    }

    /// Number of scripted draws not consumed yet, as `(uniforms, indices)`.
    pub(crate) fn remaining(&self) -> (usize, usize) {
        (self.uniforms.len(), self.indices.len())
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        self.uniforms
            .pop_front()
            .expect("scripted uniform draws exhausted")
    }

    fn index(&mut self, bound: usize) -> usize {
        let i = self
            .indices
            .pop_front()
            .expect("scripted index draws exhausted");
        assert!(i < bound, "scripted index {i} out of bound {bound}");
        i
    }
}
