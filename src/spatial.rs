//! Nearest-neighbor queries over a fixed point set.
//!
//! Thin adapter over a `kiddo` k-d tree. The index is built once from the
//! points in their *original* order and never changes; results are
//! original indices, which callers translate to current tour positions
//! through an [`IndexMapping`](crate::anneal::IndexMapping).
//!
//! Coincident points share one tree entry (a *site*). A kiddo leaf holds
//! a bounded number of items at one exact coordinate, so inserting every
//! duplicate separately would overflow it.

use std::collections::HashMap;
use std::fmt;

use kiddo::{KdTree, NearestNeighbour, SquaredEuclidean};

use crate::geometry::Point;

/// Immutable k-nearest-neighbor index.
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    /// Original indices at each site, in input order.
    sites: Vec<Vec<usize>>,
    len: usize,
}

impl SpatialIndex {
    /// Builds the index; item `i` is `points[i]`.
    pub fn build(points: &[Point]) -> Self {
        let mut site_of: HashMap<(u64, u64), usize> = HashMap::with_capacity(points.len());
        let mut sites: Vec<Vec<usize>> = Vec::new();
        let mut tree: KdTree<f64, 2> = KdTree::with_capacity(points.len());

        for (i, p) in points.iter().enumerate() {
            let key = (p.x.to_bits(), p.y.to_bits());
            match site_of.get(&key) {
                Some(&site) => sites[site].push(i),
                None => {
                    let site = sites.len();
                    site_of.insert(key, site);
                    sites.push(vec![i]);
                    tree.add(&p.to_array(), site as u64);
                }
            }
        }

        Self {
            tree,
            sites,
            len: points.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct coordinates.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Original indices of the `k` points nearest to `query`, nearest first.
    ///
    /// A query at an indexed point includes that point itself. Coincident
    /// points are returned in input order.
    pub fn nearest(&self, query: Point, k: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(k);
        self.nearest_into(query, k, &mut out);
        out
    }

    /// Like [`SpatialIndex::nearest`], reusing `out`'s allocation.
    pub fn nearest_into(&self, query: Point, k: usize, out: &mut Vec<usize>) {
        out.clear();
        if k == 0 || self.len == 0 {
            return;
        }
        // Every site holds at least one point, so k sites always suffice.
        let k = k.min(self.len);
        let found: Vec<NearestNeighbour<f64, u64>> = self
            .tree
            .nearest_n::<SquaredEuclidean>(&query.to_array(), k.min(self.sites.len()));
        for nn in found {
            out.extend_from_slice(&self.sites[nn.item as usize]);
            if out.len() >= k {
                break;
            }
        }
        out.truncate(k);
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.len)
            .field("sites", &self.sites.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_nearest_includes_self_first() {
        let pts = line(10);
        let index = SpatialIndex::build(&pts);
        let nn = index.nearest(pts[4], 3);
        assert_eq!(nn.len(), 3);
        assert_eq!(nn[0], 4);
        let mut rest = nn[1..].to_vec();
        rest.sort_unstable();
        assert_eq!(rest, vec![3, 5]);
    }

    #[test]
    fn test_nearest_caps_at_len() {
        let pts = line(5);
        let index = SpatialIndex::build(&pts);
        let mut nn = index.nearest(pts[0], 50);
        nn.sort_unstable();
        assert_eq!(nn, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_nearest_zero_is_empty() {
        let index = SpatialIndex::build(&line(5));
        assert!(index.nearest(Point::new(0.0, 0.0), 0).is_empty());
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_coincident_points_share_a_site() {
        let mut pts = vec![Point::new(1.0, 1.0); 40];
        pts.extend((0..10).map(|i| Point::new(3.0 + i as f64, 2.0)));
        let index = SpatialIndex::build(&pts);
        assert_eq!(index.len(), 50);
        assert_eq!(index.site_count(), 11);

        let nn = index.nearest(Point::new(1.0, 1.0), 5);
        assert_eq!(nn, vec![0, 1, 2, 3, 4]);

        // All 40 duplicates come before the nearest distinct point.
        let nn = index.nearest(Point::new(1.0, 1.0), 41);
        assert_eq!(nn.len(), 41);
        assert!(nn[..40].iter().all(|&i| i < 40));
        assert_eq!(nn[40], 40);

        let mut all = index.nearest(Point::new(0.0, 0.0), 100);
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }
}
