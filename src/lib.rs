//! Simulated annealing for planar traveling-salesman tours.
//!
//! Turns a cloud of 2-D points into a short closed tour, suitable for
//! drawing as a single continuous line:
//!
//! - **Greedy construction**: pairs nearest points, then merges segments
//!   hierarchically into one tour ([`greedy`]).
//! - **Annealing**: 2-opt reversals with O(1) length deltas under the
//!   Metropolis criterion, with pluggable candidate selectors that bias
//!   moves toward long edges and spatial neighbors ([`anneal`]).
//! - **Parameter guessing**: starting temperature, size scale and
//!   neighbor count derived from the tour itself
//!   ([`anneal::guess_initial_parameters`]).
//! - **Jobs**: runs of annealing jobs with warm restarts in between
//!   ([`jobs`]).
//!
//! # Examples
//!
//! ```
//! use tsp_anneal::anneal::{guess_initial_parameters, AnnealConfig, Annealer, SizeNeighborSelector};
//! use tsp_anneal::geometry::Point;
//! use tsp_anneal::greedy::GreedyConstructor;
//! use tsp_anneal::jobs::JobRunner;
//!
//! let points: Vec<Point> = (0..200)
//!     .map(|i| {
//!         let t = i as f64 * 2.39996;
//!         let r = (i as f64).sqrt();
//!         Point::new(r * t.cos() + 20.0, r * t.sin() + 20.0)
//!     })
//!     .collect();
//!
//! let tour = GreedyConstructor::build(&points)?;
//! let settings = guess_initial_parameters(tour.points(), 1_000, 3)?;
//! let selector = SizeNeighborSelector::new(
//!     &tour,
//!     settings.size_scale,
//!     settings.size_cool,
//!     settings.k_neighbors,
//!     settings.nbrs_cool,
//! )?;
//! let config = AnnealConfig::from_settings(&settings, 1_000).with_seed(7);
//! let mut annealer = Annealer::from_config(tour, selector, &config)?;
//!
//! let report = JobRunner::run(&mut annealer, 3)?;
//! assert_eq!(report.jobs_completed, 3);
//! # Ok::<(), tsp_anneal::TspError>(())
//! ```

pub mod anneal;
pub mod error;
pub mod geometry;
pub mod greedy;
pub mod jobs;
pub mod random;
pub mod spatial;
pub mod tour;

pub use error::{Result, TspError};
