//! Nearest-neighbor candidate selection.
//!
//! The second endpoint of a move is drawn from the `k` spatial neighbors
//! of the first, which biases the search toward local corrections. `k`
//! decays geometrically so the search narrows as the tour settles.
//!
//! The spatial index is built over the vertices in the order they had
//! when the selector was created; an [`IndexMapping`] translates its
//! results to current tour positions and is kept in sync after every
//! accepted reversal.

use super::mapping::IndexMapping;
use super::selector::{
    check_cooling, is_degenerate, CandidateSelector, Proposal, SelectorParams,
};
use crate::error::{Result, TspError};
use crate::random::RandomSource;
use crate::spatial::SpatialIndex;
use crate::tour::Tour;

/// Smallest neighbor query: the query vertex plus one other.
pub(crate) const MIN_QUERY_NEIGHBORS: usize = 2;

/// Spatial index, index mapping and the decaying neighbor count.
#[derive(Debug)]
pub(crate) struct NeighborSearch {
    pub(crate) index: SpatialIndex,
    pub(crate) mapping: IndexMapping,
    pub(crate) k_neighbors: f64,
    nbrs_cool: f64,
    scratch: Vec<usize>,
}

impl NeighborSearch {
    pub(crate) fn new(tour: &Tour, k_neighbors: f64, nbrs_cool: f64) -> Result<Self> {
        let n = tour.len();
        if !(k_neighbors.is_finite() && k_neighbors >= 1.0) {
            return Err(TspError::InvalidConfig(format!(
                "k_neighbors must be at least 1, got {k_neighbors}"
            )));
        }
        if k_neighbors >= n as f64 {
            return Err(TspError::InvalidConfig(format!(
                "k_neighbors ({k_neighbors}) must be less than the vertex count ({n})"
            )));
        }
        check_cooling("nbrs_cool", nbrs_cool)?;

        Ok(Self {
            index: SpatialIndex::build(tour.points()),
            mapping: IndexMapping::identity(n),
            k_neighbors,
            nbrs_cool,
            scratch: Vec::new(),
        })
    }

    /// Neighbor count actually queried: `floor(k)` clamped to `[2, n]`.
    #[inline]
    pub(crate) fn effective_k(&self) -> usize {
        (self.k_neighbors as usize).clamp(MIN_QUERY_NEIGHBORS, self.index.len())
    }

    /// Current position of a random spatial neighbor of the vertex at
    /// `begin`. May return `begin` itself.
    pub(crate) fn pick<R: RandomSource>(&mut self, tour: &Tour, begin: usize, rng: &mut R) -> usize {
        let k = self.effective_k();
        self.index.nearest_into(tour.point(begin), k, &mut self.scratch);
        let original = self.scratch[rng.index(self.scratch.len())];
        self.mapping.to_current(original)
    }

    #[inline]
    pub(crate) fn on_reverse(&mut self, begin: usize, end: usize) {
        self.mapping.reverse(begin, end);
    }

    #[inline]
    pub(crate) fn cool(&mut self) {
        self.k_neighbors *= self.nbrs_cool;
    }

    pub(crate) fn check_tour(&self, tour: &Tour) -> Result<()> {
        if tour.len() == self.mapping.len() {
            Ok(())
        } else {
            Err(TspError::InvalidConfig(format!(
                "selector built for {} vertices, tour has {}",
                self.mapping.len(),
                tour.len()
            )))
        }
    }
}

/// Uniform first endpoint, second endpoint among its `k` nearest neighbors.
#[derive(Debug)]
pub struct NeighborSelector {
    search: NeighborSearch,
}

impl NeighborSelector {
    /// Indexes the vertices of `tour` in their current order.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`] if `k_neighbors` is below 1 or not
    /// below the vertex count, or `nbrs_cool` is not positive.
    pub fn new(tour: &Tour, k_neighbors: f64, nbrs_cool: f64) -> Result<Self> {
        Ok(Self {
            search: NeighborSearch::new(tour, k_neighbors, nbrs_cool)?,
        })
    }

    pub fn mapping(&self) -> &IndexMapping {
        &self.search.mapping
    }

    pub fn k_neighbors(&self) -> f64 {
        self.search.k_neighbors
    }
}

impl CandidateSelector for NeighborSelector {
    fn name(&self) -> &'static str {
        "neighbors"
    }

    fn propose<R: RandomSource>(&mut self, tour: &Tour, rng: &mut R) -> Proposal {
        let n = tour.len();
        loop {
            let begin = rng.index(n);
            let end = self.search.pick(tour, begin, rng);
            if !is_degenerate(begin, end, n) {
                return Proposal::ordered(begin, end, None);
            }
        }
    }

    fn on_accept(&mut self, proposal: &Proposal) {
        self.search.on_reverse(proposal.begin, proposal.end);
    }

    fn cool(&mut self) {
        self.search.cool();
    }

    fn check_tour(&self, tour: &Tour) -> Result<()> {
        self.search.check_tour(tour)
    }

    fn params(&self) -> SelectorParams {
        SelectorParams {
            size_scale: None,
            k_neighbors: Some(self.search.k_neighbors),
            pool_size: None,
        }
    }
}
