//! Annealing state machine.
//!
//! # Step
//!
//! While `steps_processed < total_steps`:
//!
//! 1. cool: `T *= temp_cool`, selector parameters decay likewise
//! 2. the selector proposes positions `begin < end`
//! 3. `delta` = change in tour length from reversing `[begin, end]`
//! 4. accept if `delta < 0`, otherwise with probability `exp(-delta / T)`
//! 5. on acceptance reverse the tour and let the selector update its
//!    bookkeeping
//! 6. yield `delta`
//!
//! Once `total_steps` steps have run the annealer is exhausted and yields
//! nothing until [`Annealer::warm_restart`] starts another job.

use std::fmt;

use rand::rngs::StdRng;
use tracing::debug;

use super::config::AnnealConfig;
use super::selector::{CandidateSelector, SelectorParams};
use crate::error::{Result, TspError};
use crate::geometry::Point;
use crate::random::{create_rng, RandomSource};
use crate::tour::Tour;

/// Result of a single annealing step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Change in tour length the proposed reversal would cause.
    pub delta: f64,
    /// Whether the reversal was applied.
    pub accepted: bool,
}

/// Point-in-time description of an annealer, for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealSummary {
    pub energy: f64,
    pub temperature: f64,
    pub steps_processed: usize,
    pub total_steps: usize,
    pub accepted_moves: usize,
    pub selector: &'static str,
    pub params: SelectorParams,
}

impl fmt::Display for AnnealSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "energy={:.6} temperature={:.6e} selector={}",
            self.energy, self.temperature, self.selector
        )?;
        let params = self.params.to_string();
        if !params.is_empty() {
            write!(f, " {params}")?;
        }
        Ok(())
    }
}

/// Simulated annealing over a [`Tour`] with 2-opt moves.
///
/// The annealer owns the tour, the selector and the random source for the
/// duration of a run. It is a finite iterator of energy deltas.
///
/// # Examples
///
/// ```
/// use tsp_anneal::anneal::{AnnealConfig, Annealer, UniformSelector};
/// use tsp_anneal::geometry::Point;
/// use tsp_anneal::random::create_rng;
/// use tsp_anneal::tour::Tour;
///
/// let points: Vec<Point> = (0..20)
///     .map(|i| {
///         let t = i as f64 * 7.0;
///         Point::new(t.cos(), t.sin())
///     })
///     .collect();
/// let tour = Tour::new(points).unwrap();
/// let config = AnnealConfig::default().with_total_steps(500).with_temperature(0.05);
/// let mut annealer = Annealer::new(tour, UniformSelector::new(), &config, create_rng(1)).unwrap();
///
/// let before = annealer.current_energy();
/// let steps = annealer.by_ref().count();
/// assert_eq!(steps, 500);
/// assert!(annealer.current_energy() <= before);
/// ```
#[derive(Debug)]
pub struct Annealer<S, R> {
    tour: Tour,
    selector: S,
    rng: R,
    total_steps: usize,
    steps_processed: usize,
    temperature: f64,
    temp_cool: f64,
    accepted_moves: usize,
    improving_moves: usize,
}

impl<S: CandidateSelector> Annealer<S, StdRng> {
    /// Builds an annealer seeded from `config.seed` (random when unset).
    pub fn from_config(tour: Tour, selector: S, config: &AnnealConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::new(tour, selector, config, rng)
    }
}

impl<S: CandidateSelector, R: RandomSource> Annealer<S, R> {
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`](crate::TspError::InvalidConfig) if the
    /// configuration is invalid or `selector` was built for a different
    /// vertex count.
    pub fn new(tour: Tour, selector: S, config: &AnnealConfig, rng: R) -> Result<Self> {
        config.validate()?;
        selector.check_tour(&tour)?;
        Ok(Self {
            tour,
            selector,
            rng,
            total_steps: config.total_steps,
            steps_processed: 0,
            temperature: config.temperature,
            temp_cool: config.temp_cool,
            accepted_moves: 0,
            improving_moves: 0,
        })
    }

    /// Runs one step; `None` once the job is exhausted.
    pub fn step_outcome(&mut self) -> Option<StepOutcome> {
        if self.is_exhausted() {
            return None;
        }

        self.temperature *= self.temp_cool;
        self.steps_processed += 1;
        self.selector.cool();

        let proposal = self.selector.propose(&self.tour, &mut self.rng);
        let delta = self.tour.reversal_delta(proposal.begin, proposal.end);

        // Metropolis acceptance criterion
        let accepted = if delta < 0.0 {
            self.improving_moves += 1;
            true
        } else {
            let probability = (-delta / self.temperature).exp();
            self.rng.uniform() < probability
        };

        if accepted {
            self.tour.reverse(proposal.begin, proposal.end);
            self.selector.on_accept(&proposal);
            self.accepted_moves += 1;
        }

        Some(StepOutcome { delta, accepted })
    }

    /// Runs one step and yields its energy delta.
    pub fn step(&mut self) -> Option<f64> {
        self.step_outcome().map(|outcome| outcome.delta)
    }

    /// Starts another job: resets the step counter and lets the selector
    /// rebuild geometry-dependent state against the current tour.
    ///
    /// Temperature and selector parameters keep their cooled values.
    ///
    /// # Errors
    ///
    /// [`TspError::PoolTooSmall`](crate::TspError::PoolTooSmall) from a
    /// pool rebuild. The step counter is left untouched in that case.
    pub fn warm_restart(&mut self) -> Result<()> {
        self.selector.warm_restart(&self.tour)?;
        self.steps_processed = 0;
        debug!(
            selector = self.selector.name(),
            temperature = self.temperature,
            "warm restart"
        );
        Ok(())
    }

    pub fn is_exhausted(&self) -> bool {
        self.steps_processed >= self.total_steps
    }

    pub fn steps_processed(&self) -> usize {
        self.steps_processed
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Replaces the current temperature; cooling continues from it.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`](crate::TspError::InvalidConfig) for a
    /// non-positive or non-finite temperature.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<()> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(TspError::InvalidConfig(format!(
                "temperature must be positive and finite, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(())
    }

    /// Accepted moves since construction, across jobs.
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    /// Accepted moves that shortened the tour, across jobs.
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Mutable access for adjusting selector parameters between jobs,
    /// e.g. lowering the size scale after a failed warm restart.
    pub fn selector_mut(&mut self) -> &mut S {
        &mut self.selector
    }

    /// Closed cycle of coordinates (first point repeated at the end).
    pub fn current_cycle(&self) -> Vec<Point> {
        self.tour.cycle()
    }

    /// Tour length by full summation.
    pub fn current_energy(&self) -> f64 {
        self.tour.energy()
    }

    pub fn summary(&self) -> AnnealSummary {
        AnnealSummary {
            energy: self.current_energy(),
            temperature: self.temperature,
            steps_processed: self.steps_processed,
            total_steps: self.total_steps,
            accepted_moves: self.accepted_moves,
            selector: self.selector.name(),
            params: self.selector.params(),
        }
    }

    /// Releases the tour, e.g. to continue with a different selector.
    pub fn into_tour(self) -> Tour {
        self.tour
    }

    pub fn into_parts(self) -> (Tour, S, R) {
        (self.tour, self.selector, self.rng)
    }
}

impl<S: CandidateSelector, R: RandomSource> Iterator for Annealer<S, R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_steps.saturating_sub(self.steps_processed);
        (remaining, Some(remaining))
    }
}
