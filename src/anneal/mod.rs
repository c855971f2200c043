//! Simulated annealing with 2-opt moves.
//!
//! An [`Annealer`] repeatedly asks a [`CandidateSelector`] for a segment
//! of the tour to reverse, computes the O(1) change in tour length and
//! applies the Metropolis criterion. Temperature and the selector's own
//! parameters (size scale, neighbor count) decay geometrically per step,
//! so the search narrows from large-scale disorder to local swaps.
//!
//! Selectors:
//!
//! - [`UniformSelector`]: both endpoints uniform
//! - [`SizeScaleSelector`]: endpoints from positions touching long edges
//! - [`NeighborSelector`]: second endpoint among the first's k nearest
//! - [`SizeNeighborSelector`]: pooled first endpoint, neighbor second
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"

mod config;
mod engine;
mod guess;
mod mapping;
mod neighbors;
mod selector;
mod size_neighbors;
mod size_scale;
mod uniform;

pub use config::AnnealConfig;
pub use engine::{AnnealSummary, Annealer, StepOutcome};
pub use guess::{guess_initial_parameters, AnnealSettings};
pub use mapping::IndexMapping;
pub use neighbors::NeighborSelector;
pub use selector::{CandidateSelector, Proposal, Selector, SelectorParams};
pub use size_neighbors::SizeNeighborSelector;
pub use size_scale::SizeScaleSelector;
pub use uniform::UniformSelector;
