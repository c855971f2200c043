//! Combined size-scale pool and nearest-neighbor selection.

use super::mapping::IndexMapping;
use super::neighbors::NeighborSearch;
use super::selector::{is_degenerate, CandidateSelector, Proposal, SelectorParams};
use super::size_scale::ScalePool;
use crate::error::Result;
use crate::random::RandomSource;
use crate::tour::Tour;

/// Neighbor draws per proposal before falling back to a uniform partner.
const MAX_NEIGHBOR_ATTEMPTS: usize = 64;

/// First endpoint from the size-scale pool, second among its nearest
/// neighbors.
///
/// The pool slot the first endpoint came from travels in the
/// [`Proposal`]; on acceptance that slot is moved to wherever the pooled
/// vertex landed, keeping the pool aligned with the vertex it was
/// admitted for without a full rebuild.
#[derive(Debug)]
pub struct SizeNeighborSelector {
    pool: ScalePool,
    search: NeighborSearch,
}

impl SizeNeighborSelector {
    /// # Errors
    ///
    /// Any error of [`SizeScaleSelector::new`](super::SizeScaleSelector::new)
    /// or [`NeighborSelector::new`](super::NeighborSelector::new).
    pub fn new(
        tour: &Tour,
        size_scale: f64,
        size_cool: f64,
        k_neighbors: f64,
        nbrs_cool: f64,
    ) -> Result<Self> {
        Ok(Self {
            search: NeighborSearch::new(tour, k_neighbors, nbrs_cool)?,
            pool: ScalePool::new(tour, size_scale, size_cool)?,
        })
    }

    /// Recomputes the pool from the current tour.
    pub fn rebuild_pool(&mut self, tour: &Tour) -> Result<()> {
        self.pool.rebuild(tour)
    }

    /// Sets the threshold used by the next pool rebuild. The neighbor
    /// count and index mapping are unaffected.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`](crate::TspError::InvalidConfig) for a
    /// non-positive or non-finite scale.
    pub fn set_size_scale(&mut self, size_scale: f64) -> Result<()> {
        self.pool.set_size_scale(size_scale)
    }

    pub fn pool(&self) -> &[usize] {
        &self.pool.positions
    }

    pub fn mapping(&self) -> &IndexMapping {
        &self.search.mapping
    }

    pub fn size_scale(&self) -> f64 {
        self.pool.size_scale
    }

    pub fn k_neighbors(&self) -> f64 {
        self.search.k_neighbors
    }
}

impl CandidateSelector for SizeNeighborSelector {
    fn name(&self) -> &'static str {
        "size_neighbors"
    }

    fn propose<R: RandomSource>(&mut self, tour: &Tour, rng: &mut R) -> Proposal {
        let n = tour.len();
        let mut last_slot = 0;
        for _ in 0..MAX_NEIGHBOR_ATTEMPTS {
            let slot = self.pool.draw_slot(rng);
            let begin = self.pool.positions[slot];
            let end = self.search.pick(tour, begin, rng);
            if !is_degenerate(begin, end, n) {
                return Proposal::ordered(begin, end, Some(slot));
            }
            last_slot = slot;
        }

        // Every neighbor draw was degenerate, e.g. a two-entry pool at the
        // first and last positions with k = 2. Pair with any position.
        let begin = self.pool.positions[last_slot];
        loop {
            let end = rng.index(n);
            if !is_degenerate(begin, end, n) {
                return Proposal::ordered(begin, end, Some(last_slot));
            }
        }
    }

    fn on_accept(&mut self, proposal: &Proposal) {
        let (begin, end) = (proposal.begin, proposal.end);
        self.search.on_reverse(begin, end);
        if let Some(slot) = proposal.pool_slot {
            // The reversal mirrors positions inside [begin, end].
            let pooled = self.pool.positions[slot];
            self.pool.positions[slot] = begin + end - pooled;
        }
    }

    fn cool(&mut self) {
        self.pool.cool();
        self.search.cool();
    }

    fn warm_restart(&mut self, tour: &Tour) -> Result<()> {
        self.pool.rebuild(tour)
    }

    fn check_tour(&self, tour: &Tour) -> Result<()> {
        self.search.check_tour(tour)
    }

    fn params(&self) -> SelectorParams {
        SelectorParams {
            size_scale: Some(self.pool.size_scale),
            k_neighbors: Some(self.search.k_neighbors),
            pool_size: Some(self.pool.len()),
        }
    }
}
