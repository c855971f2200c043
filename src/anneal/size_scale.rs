//! Size-scale candidate pool.
//!
//! Restricts proposals to tour positions touching an edge longer than a
//! threshold, so early annealing concentrates on the largest defects of
//! the tour. The threshold decays geometrically every step, but the pool
//! itself is only recomputed on a warm restart: rebuilding it per step
//! would cost O(n).

use tracing::debug;

use super::selector::{check_cooling, CandidateSelector, Proposal, SelectorParams};
use crate::error::{Result, TspError};
use crate::random::RandomSource;
use crate::tour::Tour;

/// Positions whose forward or backward edge exceeds `size_scale`.
#[derive(Debug, Clone)]
pub(crate) struct ScalePool {
    pub(crate) size_scale: f64,
    size_cool: f64,
    pub(crate) positions: Vec<usize>,
}

impl ScalePool {
    pub(crate) fn new(tour: &Tour, size_scale: f64, size_cool: f64) -> Result<Self> {
        check_scale(size_scale)?;
        check_cooling("size_cool", size_cool)?;

        let mut pool = Self {
            size_scale,
            size_cool,
            positions: Vec::new(),
        };
        pool.rebuild(tour)?;
        Ok(pool)
    }

    /// Recomputes membership against the current tour order.
    ///
    /// On failure the previous pool is kept.
    pub(crate) fn rebuild(&mut self, tour: &Tour) -> Result<()> {
        let positions: Vec<usize> = (0..tour.len())
            .filter(|&i| {
                let forward = tour.edge_length(i);
                let backward = tour.edge_length(tour.prev(i));
                forward > self.size_scale || backward > self.size_scale
            })
            .collect();

        debug!(
            size_scale = self.size_scale,
            pool_size = positions.len(),
            "rebuilt size-scale pool"
        );

        if positions.len() < 2 {
            return Err(TspError::PoolTooSmall {
                pool_size: positions.len(),
                size_scale: self.size_scale,
            });
        }
        self.positions = positions;
        Ok(())
    }

    /// Replaces the threshold. Membership changes at the next rebuild.
    pub(crate) fn set_size_scale(&mut self, size_scale: f64) -> Result<()> {
        check_scale(size_scale)?;
        self.size_scale = size_scale;
        Ok(())
    }

    #[inline]
    pub(crate) fn cool(&mut self) {
        self.size_scale *= self.size_cool;
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    /// Uniform slot in the pool.
    #[inline]
    pub(crate) fn draw_slot<R: RandomSource>(&self, rng: &mut R) -> usize {
        rng.index(self.positions.len())
    }
}

fn check_scale(size_scale: f64) -> Result<()> {
    if size_scale.is_finite() && size_scale > 0.0 {
        Ok(())
    } else {
        Err(TspError::InvalidConfig(format!(
            "size_scale must be positive and finite, got {size_scale}"
        )))
    }
}

/// Proposes pairs drawn uniformly from the size-scale pool.
///
/// Unlike the other selectors this one does not exclude the
/// first/last position pair; reversing it leaves the cycle unchanged.
#[derive(Debug, Clone)]
pub struct SizeScaleSelector {
    pool: ScalePool,
}

impl SizeScaleSelector {
    /// Builds the selector and its initial pool from `tour`.
    ///
    /// # Errors
    ///
    /// - [`TspError::InvalidConfig`] for a non-positive scale or cooling
    /// - [`TspError::PoolTooSmall`] if fewer than two positions qualify
    pub fn new(tour: &Tour, size_scale: f64, size_cool: f64) -> Result<Self> {
        Ok(Self {
            pool: ScalePool::new(tour, size_scale, size_cool)?,
        })
    }

    /// Recomputes the pool from the current tour.
    ///
    /// # Errors
    ///
    /// [`TspError::PoolTooSmall`]; the previous pool is kept.
    pub fn rebuild_pool(&mut self, tour: &Tour) -> Result<()> {
        self.pool.rebuild(tour)
    }

    /// Sets the threshold used by the next pool rebuild, typically to
    /// lower it after a warm restart failed with
    /// [`TspError::PoolTooSmall`]. Cooling continues from the new value.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`] for a non-positive or non-finite scale.
    pub fn set_size_scale(&mut self, size_scale: f64) -> Result<()> {
        self.pool.set_size_scale(size_scale)
    }

    pub fn pool(&self) -> &[usize] {
        &self.pool.positions
    }

    pub fn size_scale(&self) -> f64 {
        self.pool.size_scale
    }
}

impl CandidateSelector for SizeScaleSelector {
    fn name(&self) -> &'static str {
        "size_scale"
    }

    fn propose<R: RandomSource>(&mut self, _tour: &Tour, rng: &mut R) -> Proposal {
        loop {
            let a = self.pool.positions[self.pool.draw_slot(rng)];
            let b = self.pool.positions[self.pool.draw_slot(rng)];
            if a != b {
                return Proposal::ordered(a, b, None);
            }
        }
    }

    // A reversal permutes positions inside [begin, end] among themselves,
    // so the pooled position set is unchanged.
    fn on_accept(&mut self, _proposal: &Proposal) {}

    fn cool(&mut self) {
        self.pool.cool();
    }

    fn warm_restart(&mut self, tour: &Tour) -> Result<()> {
        self.pool.rebuild(tour)
    }

    fn params(&self) -> SelectorParams {
        SelectorParams {
            size_scale: Some(self.pool.size_scale),
            k_neighbors: None,
            pool_size: Some(self.pool.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::random::{create_rng, ScriptedRandom};

    fn ladder() -> Tour {
        let coords = [
            (0.0, 0.0),
            (1.0, 0.0),
            (3.0, 0.0),
            (4.0, 0.0),
            (5.0, 0.0),
            (5.0, 3.0),
            (4.0, 3.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ];
        Tour::new(coords.iter().map(|&c| Point::from(c)).collect()).unwrap()
    }

    #[test]
    fn test_pool_membership() {
        let sel = SizeScaleSelector::new(&ladder(), 1.0, 0.99).unwrap();
        assert_eq!(sel.pool(), &[0, 1, 2, 4, 5, 10]);
        assert_eq!(sel.params().pool_size, Some(6));
    }

    #[test]
    fn test_pool_too_small() {
        let err = SizeScaleSelector::new(&ladder(), 3.0, 0.99).unwrap_err();
        assert_eq!(
            err,
            TspError::PoolTooSmall {
                pool_size: 0,
                size_scale: 3.0
            }
        );
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_pool() {
        let tour = ladder();
        let mut sel = SizeScaleSelector::new(&tour, 1.0, 0.99).unwrap();
        sel.pool.size_scale = 3.0;
        assert!(matches!(
            sel.rebuild_pool(&tour),
            Err(TspError::PoolTooSmall { .. })
        ));
        assert_eq!(sel.pool(), &[0, 1, 2, 4, 5, 10]);
    }

    #[test]
    fn test_propose_from_pool() {
        let mut sel = SizeScaleSelector::new(&ladder(), 1.0, 0.99).unwrap();
        // Slots (0,0) and (1,1) repeat a position; (5,3) maps to positions (10,4).
        let mut rng = ScriptedRandom::with_indices(vec![0, 0, 1, 1, 5, 3]);
        let p = sel.propose(&ladder(), &mut rng);
        assert_eq!((p.begin, p.end), (4, 10));
    }

    #[test]
    fn test_exactly_two_qualify() {
        let tour = Tour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.8, 0.0),
            Point::new(2.0, 1.0),
            Point::new(1.0, 1.0),
        ])
        .unwrap();
        let mut sel = SizeScaleSelector::new(&tour, 1.5, 0.99).unwrap();
        assert_eq!(sel.pool(), &[1, 2]);

        let mut rng = create_rng(11);
        for _ in 0..100 {
            let p = sel.propose(&tour, &mut rng);
            assert_eq!((p.begin, p.end), (1, 2));
        }
    }

    #[test]
    fn test_cool_decays_scale() {
        let mut sel = SizeScaleSelector::new(&ladder(), 1.0, 0.5).unwrap();
        sel.cool();
        sel.cool();
        assert!((sel.size_scale() - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            SizeScaleSelector::new(&ladder(), 0.0, 0.99),
            Err(TspError::InvalidConfig(_))
        ));
        assert!(matches!(
            SizeScaleSelector::new(&ladder(), 1.0, -1.0),
            Err(TspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_lowered_scale_recovers_pool() {
        let tour = ladder();
        let mut sel = SizeScaleSelector::new(&tour, 1.0, 0.99).unwrap();
        sel.set_size_scale(3.0).unwrap();
        assert!(matches!(
            sel.warm_restart(&tour),
            Err(TspError::PoolTooSmall { .. })
        ));

        sel.set_size_scale(1.0).unwrap();
        sel.warm_restart(&tour).unwrap();
        assert_eq!(sel.pool(), &[0, 1, 2, 4, 5, 10]);

        assert!(matches!(
            sel.set_size_scale(-0.5),
            Err(TspError::InvalidConfig(_))
        ));
        assert!((sel.size_scale() - 1.0).abs() < 1e-15);
    }
}
