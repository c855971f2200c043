//! Cyclic tour over a fixed point set.
//!
//! A [`Tour`] stores the points in their current visiting order. The
//! cycle is logically closed: the last point connects back to the first.
//! The only mutation is [`Tour::reverse`], the 2-opt move.
//!
//! # Complexity
//!
//! - [`Tour::reversal_delta`]: O(1), touches exactly four points
//! - [`Tour::reverse`]: O(end - begin)
//! - [`Tour::energy`]: O(n)

use crate::error::{Result, TspError};
use crate::geometry::Point;

/// Smallest tour that admits a non-trivial 2-opt move.
pub const MIN_VERTICES: usize = 4;

/// A closed tour visiting every point exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    points: Vec<Point>,
}

impl Tour {
    /// Wraps `points` in their given order.
    ///
    /// # Errors
    ///
    /// [`TspError::TooFewVertices`] for fewer than [`MIN_VERTICES`] points.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < MIN_VERTICES {
            return Err(TspError::TooFewVertices {
                found: points.len(),
                required: MIN_VERTICES,
            });
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a tour holds at least [`MIN_VERTICES`] points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn point(&self, position: usize) -> Point {
        self.points[position]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Position before `position`, wrapping to the last.
    #[inline]
    pub fn prev(&self, position: usize) -> usize {
        if position == 0 {
            self.points.len() - 1
        } else {
            position - 1
        }
    }

    /// Position after `position`, wrapping to the first.
    #[inline]
    pub fn next(&self, position: usize) -> usize {
        if position + 1 == self.points.len() {
            0
        } else {
            position + 1
        }
    }

    /// Distance between two positions.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.points[a].distance(&self.points[b])
    }

    /// Length of the edge leaving `position` (towards [`Tour::next`]).
    #[inline]
    pub fn edge_length(&self, position: usize) -> f64 {
        self.distance(position, self.next(position))
    }

    /// Change in cycle length if `[begin, end]` were reversed.
    ///
    /// Only the two edges crossing the segment boundary change:
    ///
    /// ```text
    /// old = d(begin_parent, begin) + d(end, end_child)
    /// new = d(begin_parent, end)   + d(begin, end_child)
    /// ```
    ///
    /// Reversing the whole tour (`0..=n-1`) leaves the cycle unchanged
    /// and yields zero; the boundary edges coincide in that case.
    #[inline]
    pub fn reversal_delta(&self, begin: usize, end: usize) -> f64 {
        if begin == 0 && end + 1 == self.points.len() {
            return 0.0;
        }
        let begin_pt = self.points[begin];
        let end_pt = self.points[end];
        let begin_parent = self.points[self.prev(begin)];
        let end_child = self.points[self.next(end)];

        let old = begin_pt.distance(&begin_parent) + end_pt.distance(&end_child);
        let new = begin_pt.distance(&end_child) + end_pt.distance(&begin_parent);
        new - old
    }

    /// Reverses positions `begin..=end` in place.
    ///
    /// # Panics
    ///
    /// Panics if `begin > end` or `end` is out of range.
    #[inline]
    pub fn reverse(&mut self, begin: usize, end: usize) {
        self.points[begin..=end].reverse();
    }

    /// Total length of the closed cycle.
    pub fn energy(&self) -> f64 {
        let open: f64 = self
            .points
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum();
        open + self.points[self.points.len() - 1].distance(&self.points[0])
    }

    /// Points in visiting order with the first point repeated at the end.
    pub fn cycle(&self) -> Vec<Point> {
        let mut cycle = Vec::with_capacity(self.points.len() + 1);
        cycle.extend_from_slice(&self.points);
        cycle.push(self.points[0]);
        cycle
    }
}
