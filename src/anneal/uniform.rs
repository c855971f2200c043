//! Uniform candidate selection.

use super::selector::{is_degenerate, CandidateSelector, Proposal, SelectorParams};
use crate::random::RandomSource;
use crate::tour::Tour;

/// Draws both endpoints independently and uniformly over all positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSelector;

impl UniformSelector {
    pub fn new() -> Self {
        Self
    }
}

impl CandidateSelector for UniformSelector {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn propose<R: RandomSource>(&mut self, tour: &Tour, rng: &mut R) -> Proposal {
        let n = tour.len();
        loop {
            let a = rng.index(n);
            let b = rng.index(n);
            if !is_degenerate(a, b, n) {
                return Proposal::ordered(a, b, None);
            }
        }
    }

    fn on_accept(&mut self, _proposal: &Proposal) {}

    fn params(&self) -> SelectorParams {
        SelectorParams::default()
    }
}
