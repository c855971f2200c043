//! Greedy initial tour construction.
//!
//! # Algorithm
//!
//! 1. **Pairing**: walk the points; pair each unpaired point with its
//!    nearest unpaired point, swapping the partner directly behind it so
//!    the unpaired points always form a contiguous suffix. This yields
//!    `n / 2` two-point segments.
//! 2. **Merging**: in passes, join each segment to the *later* segment
//!    whose endpoint is closest to one of its own endpoints, flipping
//!    either segment so the join is end-to-begin. Only looking forward
//!    keeps segments of a pass at similar sizes. Passes repeat until one
//!    segment remains; its order is the tour.
//!
//! An odd point count drops the last point. Nothing guarantees the final
//! segment's ends are close; annealing repairs that.
//!
//! # Complexity
//!
//! O(n²) distance evaluations for pairing and for each merge pass.

use tracing::debug;

use crate::error::{Result, TspError};
use crate::geometry::{normalize, Point};
use crate::tour::{Tour, MIN_VERTICES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Begin,
    End,
}

const ENDS: [End; 2] = [End::Begin, End::End];

#[derive(Debug, Clone)]
struct Segment {
    points: Vec<Point>,
}

impl Segment {
    #[inline]
    fn endpoint(&self, end: End) -> Point {
        match end {
            End::Begin => self.points[0],
            End::End => self.points[self.points.len() - 1],
        }
    }

    /// Appends `other` so that `self`'s `own_end` meets `other`'s `other_end`.
    fn absorb(&mut self, mut other: Segment, own_end: End, other_end: End) {
        if own_end == End::Begin {
            self.points.reverse();
        }
        if other_end == End::End {
            other.points.reverse();
        }
        self.points.append(&mut other.points);
    }
}

#[derive(Debug, Clone, Copy)]
struct Join {
    own_end: End,
    destination: usize,
    other_end: End,
}

/// Builds initial tours by greedy pairing and hierarchical merging.
pub struct GreedyConstructor;

impl GreedyConstructor {
    /// Normalizes `points` (see [`normalize`]) and constructs a tour.
    ///
    /// # Errors
    ///
    /// - [`TspError::InvalidInput`] if the points cannot be normalized
    /// - [`TspError::TooFewVertices`] for fewer than four points after
    ///   dropping an odd last point
    pub fn build(points: &[Point]) -> Result<Tour> {
        let normalized = normalize(points)?;
        Self::construct(normalized)
    }

    /// Constructs a tour from `points` as given, without normalizing.
    pub fn construct(mut points: Vec<Point>) -> Result<Tour> {
        let found = points.len();
        if points.len() % 2 == 1 {
            points.pop();
        }
        if points.len() < MIN_VERTICES {
            return Err(TspError::TooFewVertices {
                found,
                required: MIN_VERTICES,
            });
        }

        let mut segments = pair_nearest(&mut points);
        let mut passes = 0usize;
        while segments.len() > 1 {
            merge_pass(&mut segments);
            passes += 1;
        }
        debug!(vertices = points.len(), passes, "greedy tour constructed");

        let tour = segments
            .pop()
            .map(|segment| segment.points)
            .ok_or_else(|| TspError::InvalidInput("no segments to merge".into()))?;
        Tour::new(tour)
    }
}

/// Pairs every point with its nearest unpaired successor. `points.len()`
/// must be even.
fn pair_nearest(points: &mut [Point]) -> Vec<Segment> {
    let n = points.len();
    let mut segments = Vec::with_capacity(n / 2);

    let mut i = 0;
    while i < n {
        let current = points[i];
        let mut partner = i + 1;
        let mut best = current.distance(&points[partner]);
        for (j, candidate) in points.iter().enumerate().skip(i + 2) {
            let d = current.distance(candidate);
            if d < best {
                best = d;
                partner = j;
            }
        }
        points.swap(i + 1, partner);
        segments.push(Segment {
            points: vec![points[i], points[i + 1]],
        });
        i += 2;
    }

    segments
}

/// One pass joining each segment to its cheapest later partner.
fn merge_pass(segments: &mut Vec<Segment>) {
    let mut source = 0;
    while source + 1 < segments.len() {
        let join = shortest_join(segments, source);
        let other = segments.remove(join.destination);
        segments[source].absorb(other, join.own_end, join.other_end);
        source += 1;
    }
}

/// Cheapest endpoint-to-endpoint connection from `segments[source]` to
/// any segment after it. Ties keep the first candidate found.
fn shortest_join(segments: &[Segment], source: usize) -> Join {
    let mut best: Option<(f64, Join)> = None;

    for own_end in ENDS {
        let from = segments[source].endpoint(own_end);
        for other_end in ENDS {
            for (offset, segment) in segments[source + 1..].iter().enumerate() {
                let d = from.distance(&segment.endpoint(other_end));
                if best.as_ref().map_or(true, |(best_d, _)| d < *best_d) {
                    best = Some((
                        d,
                        Join {
                            own_end,
                            destination: source + 1 + offset,
                            other_end,
                        },
                    ));
                }
            }
        }
    }

    match best {
        Some((_, join)) => join,
        // Unreachable for `source + 1 < segments.len()`.
        None => Join {
            own_end: End::End,
            destination: source + 1,
            other_end: End::Begin,
        },
    }
}
