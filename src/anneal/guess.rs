//! Heuristic starting parameters.
//!
//! Derived from the statistics of the tour to be annealed, assuming the
//! points are normalized (see [`normalize`](crate::geometry::normalize))
//! and roughly fill their bounding box:
//!
//! - temperature starts at `3 * segment_length / ln 2` and cools by a
//!   factor of 3 over the whole run, where `segment_length` is the mean
//!   gap between consecutive points
//! - the size scale starts at the 99.8th percentile of edge lengths and
//!   decays to half the mean segment length
//! - the neighbor count decays from 50 to 3 (capped at `n - 1`)

use crate::error::{Result, TspError};
use crate::geometry::Point;
use crate::tour::MIN_VERTICES;

const TEMPERATURE_DECAY: f64 = 3.0;
const SIZE_SCALE_PERCENTILE: f64 = 99.8;
const INITIAL_NEIGHBORS: f64 = 50.0;
const FINAL_NEIGHBORS: f64 = 3.0;

/// Starting values and per-step cooling factors for every annealing
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealSettings {
    pub temperature: f64,
    pub temp_cool: f64,
    pub size_scale: f64,
    pub size_cool: f64,
    pub k_neighbors: f64,
    pub nbrs_cool: f64,
}

/// Guesses settings for annealing `points` (in tour order) over
/// `jobs_planned` jobs of `steps_per_job` steps.
///
/// # Errors
///
/// - [`TspError::TooFewVertices`] for fewer than four points
/// - [`TspError::InvalidConfig`] for a zero step or job count, or one
///   whose product overflows
/// - [`TspError::InvalidInput`] if all points coincide
pub fn guess_initial_parameters(
    points: &[Point],
    steps_per_job: usize,
    jobs_planned: usize,
) -> Result<AnnealSettings> {
    let n = points.len();
    if n < MIN_VERTICES {
        return Err(TspError::TooFewVertices {
            found: n,
            required: MIN_VERTICES,
        });
    }
    if steps_per_job == 0 || jobs_planned == 0 {
        return Err(TspError::InvalidConfig(
            "steps_per_job and jobs_planned must be positive".into(),
        ));
    }

    let mut distances: Vec<f64> = points.windows(2).map(|w| w[0].distance(&w[1])).collect();
    let segment_length = distances.iter().sum::<f64>() / n as f64;
    if !(segment_length.is_finite() && segment_length > 0.0) {
        return Err(TspError::InvalidInput(format!(
            "mean segment length must be positive, got {segment_length}"
        )));
    }

    let total_steps = steps_per_job.checked_mul(jobs_planned).ok_or_else(|| {
        TspError::InvalidConfig(format!(
            "total step count overflows: {steps_per_job} steps x {jobs_planned} jobs"
        ))
    })? as f64;
    let decay = |initial: f64, last: f64| ((last / initial).ln() / total_steps).exp();

    let temperature = TEMPERATURE_DECAY * segment_length / std::f64::consts::LN_2;
    let temp_cool = decay(1.0, 1.0 / TEMPERATURE_DECAY);

    distances.sort_by(|a, b| a.total_cmp(b));
    let mut size_scale = percentile(&distances, SIZE_SCALE_PERCENTILE);
    if size_scale <= 0.0 {
        size_scale = distances[distances.len() - 1];
    }
    let size_cool = decay(size_scale, segment_length / 2.0);

    let k_neighbors = INITIAL_NEIGHBORS.min((n - 1) as f64);
    let nbrs_cool = decay(k_neighbors, FINAL_NEIGHBORS.min(k_neighbors));

    Ok(AnnealSettings {
        temperature,
        temp_cool,
        size_scale,
        size_cool,
        k_neighbors,
        nbrs_cool,
    })
}

/// Percentile of sorted, non-empty data with linear interpolation
/// between closest ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}
