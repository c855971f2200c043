//! Candidate-pair selection for 2-opt moves.

use std::fmt;

use super::neighbors::NeighborSelector;
use super::size_neighbors::SizeNeighborSelector;
use super::size_scale::SizeScaleSelector;
use super::uniform::UniformSelector;
use crate::error::Result;
use crate::random::RandomSource;
use crate::tour::Tour;

/// A proposed reversal of tour positions `begin..=end`.
///
/// `pool_slot` carries the pool entry a pool-based selector drew `begin`
/// (or the pooled endpoint) from, so [`CandidateSelector::on_accept`] can
/// update that entry without any hidden per-selector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    pub begin: usize,
    pub end: usize,
    pub pool_slot: Option<usize>,
}

impl Proposal {
    /// Orders two distinct positions so that `begin < end`.
    #[inline]
    pub fn ordered(a: usize, b: usize, pool_slot: Option<usize>) -> Self {
        debug_assert_ne!(a, b, "proposal endpoints must differ");
        let (begin, end) = if a < b { (a, b) } else { (b, a) };
        Self {
            begin,
            end,
            pool_slot,
        }
    }
}

/// True for pairs that must not be proposed: equal positions, or the
/// first and last positions (reversing everything between them is a
/// no-op on a closed cycle).
#[inline]
pub(crate) fn is_degenerate(a: usize, b: usize, n: usize) -> bool {
    a == b || (a.min(b) == 0 && a.max(b) == n - 1)
}

/// Snapshot of the selector-controlled annealing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectorParams {
    /// Current size-scale threshold.
    pub size_scale: Option<f64>,
    /// Current (fractional) neighbor count.
    pub k_neighbors: Option<f64>,
    /// Number of positions in the candidate pool.
    pub pool_size: Option<usize>,
}

impl fmt::Display for SelectorParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(scale) = self.size_scale {
            parts.push(format!("size_scale={scale:.6}"));
        }
        if let Some(pool) = self.pool_size {
            parts.push(format!("n_pool={pool}"));
        }
        if let Some(k) = self.k_neighbors {
            parts.push(format!("k_nbrs={k:.2}"));
        }
        f.write_str(&parts.join(" "))
    }
}

/// Strategy for proposing 2-opt candidate pairs.
///
/// The annealer calls, per step: [`cool`](Self::cool), then
/// [`propose`](Self::propose), and [`on_accept`](Self::on_accept) after
/// it has reversed the tour for an accepted proposal.
pub trait CandidateSelector {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Proposes positions with `begin < end`.
    fn propose<R: RandomSource>(&mut self, tour: &Tour, rng: &mut R) -> Proposal;

    /// Bookkeeping after `tour` has been reversed over the proposal.
    fn on_accept(&mut self, proposal: &Proposal);

    /// Geometric per-step decay of selector parameters.
    fn cool(&mut self) {}

    /// Re-derives any state that depends on the current tour geometry.
    fn warm_restart(&mut self, _tour: &Tour) -> Result<()> {
        Ok(())
    }

    /// Rejects a tour this selector was not built for.
    fn check_tour(&self, _tour: &Tour) -> Result<()> {
        Ok(())
    }

    fn params(&self) -> SelectorParams;
}

/// The closed set of selection strategies.
#[derive(Debug)]
pub enum Selector {
    Uniform(UniformSelector),
    SizeScale(SizeScaleSelector),
    Neighbors(NeighborSelector),
    SizeNeighbors(SizeNeighborSelector),
}

impl CandidateSelector for Selector {
    fn name(&self) -> &'static str {
        match self {
            Selector::Uniform(s) => s.name(),
            Selector::SizeScale(s) => s.name(),
            Selector::Neighbors(s) => s.name(),
            Selector::SizeNeighbors(s) => s.name(),
        }
    }

    fn propose<R: RandomSource>(&mut self, tour: &Tour, rng: &mut R) -> Proposal {
        match self {
            Selector::Uniform(s) => s.propose(tour, rng),
            Selector::SizeScale(s) => s.propose(tour, rng),
            Selector::Neighbors(s) => s.propose(tour, rng),
            Selector::SizeNeighbors(s) => s.propose(tour, rng),
        }
    }

    fn on_accept(&mut self, proposal: &Proposal) {
        match self {
            Selector::Uniform(s) => s.on_accept(proposal),
            Selector::SizeScale(s) => s.on_accept(proposal),
            Selector::Neighbors(s) => s.on_accept(proposal),
            Selector::SizeNeighbors(s) => s.on_accept(proposal),
        }
    }

    fn cool(&mut self) {
        match self {
            Selector::Uniform(s) => s.cool(),
            Selector::SizeScale(s) => s.cool(),
            Selector::Neighbors(s) => s.cool(),
            Selector::SizeNeighbors(s) => s.cool(),
        }
    }

    fn warm_restart(&mut self, tour: &Tour) -> Result<()> {
        match self {
            Selector::Uniform(s) => s.warm_restart(tour),
            Selector::SizeScale(s) => s.warm_restart(tour),
            Selector::Neighbors(s) => s.warm_restart(tour),
            Selector::SizeNeighbors(s) => s.warm_restart(tour),
        }
    }

    fn check_tour(&self, tour: &Tour) -> Result<()> {
        match self {
            Selector::Uniform(s) => s.check_tour(tour),
            Selector::SizeScale(s) => s.check_tour(tour),
            Selector::Neighbors(s) => s.check_tour(tour),
            Selector::SizeNeighbors(s) => s.check_tour(tour),
        }
    }

    fn params(&self) -> SelectorParams {
        match self {
            Selector::Uniform(s) => s.params(),
            Selector::SizeScale(s) => s.params(),
            Selector::Neighbors(s) => s.params(),
            Selector::SizeNeighbors(s) => s.params(),
        }
    }
}

impl From<UniformSelector> for Selector {
    fn from(s: UniformSelector) -> Self {
        Selector::Uniform(s)
    }
}

impl From<SizeScaleSelector> for Selector {
    fn from(s: SizeScaleSelector) -> Self {
        Selector::SizeScale(s)
    }
}

impl From<NeighborSelector> for Selector {
    fn from(s: NeighborSelector) -> Self {
        Selector::Neighbors(s)
    }
}

impl From<SizeNeighborSelector> for Selector {
    fn from(s: SizeNeighborSelector) -> Self {
        Selector::SizeNeighbors(s)
    }
}

/// Validates a multiplicative cooling factor.
pub(crate) fn check_cooling(name: &str, factor: f64) -> Result<()> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(crate::error::TspError::InvalidConfig(format!(
            "{name} must be positive and finite, got {factor}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_swaps() {
        let p = Proposal::ordered(5, 2, Some(1));
        assert_eq!((p.begin, p.end, p.pool_slot), (2, 5, Some(1)));
    }

    #[test]
    fn test_degenerate_pairs() {
        assert!(is_degenerate(3, 3, 10));
        assert!(is_degenerate(0, 9, 10));
        assert!(is_degenerate(9, 0, 10));
        assert!(!is_degenerate(0, 8, 10));
        assert!(!is_degenerate(1, 9, 10));
    }

    #[test]
    fn test_params_display() {
        let params = SelectorParams {
            size_scale: Some(0.5),
            k_neighbors: Some(12.0),
            pool_size: Some(40),
        };
        assert_eq!(params.to_string(), "size_scale=0.500000 n_pool=40 k_nbrs=12.00");
        assert_eq!(SelectorParams::default().to_string(), "");
    }

    #[test]
    fn test_check_cooling() {
        assert!(check_cooling("temp_cool", 0.99).is_ok());
        assert!(check_cooling("temp_cool", 0.0).is_err());
        assert!(check_cooling("temp_cool", f64::NAN).is_err());
    }
}
