//! Multi-job annealing runs.
//!
//! A run is a sequence of jobs. Each job warm-restarts the annealer (so
//! the selector rebuilds its candidate pool against the current tour),
//! then drains all of its steps. Temperature and selector parameters keep
//! cooling across job boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::anneal::{Annealer, CandidateSelector};
use crate::error::Result;
use crate::random::RandomSource;

/// Steps between cancellation checks within a job.
const CANCEL_CHECK_INTERVAL: usize = 1024;

/// Result of a multi-job run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobReport {
    /// Tour length before the first job, then after each completed job.
    pub energies: Vec<f64>,

    /// Number of jobs that ran to completion.
    pub jobs_completed: usize,

    /// Steps taken over the whole run.
    pub steps: usize,

    /// Accepted moves during this run.
    pub accepted_moves: usize,

    /// Accepted moves that shortened the tour during this run.
    pub improving_moves: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl JobReport {
    /// Energy after the last completed job.
    pub fn final_energy(&self) -> Option<f64> {
        self.energies.last().copied()
    }
}

/// Executes annealing jobs back to back.
pub struct JobRunner;

impl JobRunner {
    /// Runs `n_jobs` jobs.
    ///
    /// # Errors
    ///
    /// Propagates [`TspError::PoolTooSmall`](crate::TspError::PoolTooSmall)
    /// from a warm restart. Jobs completed before the failure are lost
    /// from the report but their effect on the tour remains.
    pub fn run<S, R>(annealer: &mut Annealer<S, R>, n_jobs: usize) -> Result<JobReport>
    where
        S: CandidateSelector,
        R: RandomSource,
    {
        Self::run_with_cancel(annealer, n_jobs, None)
    }

    /// Runs jobs with an optional cancellation token. The flag is checked
    /// before each job and periodically between steps.
    pub fn run_with_cancel<S, R>(
        annealer: &mut Annealer<S, R>,
        n_jobs: usize,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<JobReport>
    where
        S: CandidateSelector,
        R: RandomSource,
    {
        drive(annealer, n_jobs, cancel.as_deref(), |_| {})
    }

    /// Runs `n_jobs` jobs and also returns the delta of every step, in
    /// order, for plotting energy over time.
    pub fn run_collecting<S, R>(
        annealer: &mut Annealer<S, R>,
        n_jobs: usize,
    ) -> Result<(JobReport, Vec<f64>)>
    where
        S: CandidateSelector,
        R: RandomSource,
    {
        let mut deltas = Vec::with_capacity(annealer.total_steps().saturating_mul(n_jobs));
        let report = drive(annealer, n_jobs, None, |delta| deltas.push(delta))?;
        Ok((report, deltas))
    }
}

fn drive<S, R, F>(
    annealer: &mut Annealer<S, R>,
    n_jobs: usize,
    cancel: Option<&AtomicBool>,
    mut on_delta: F,
) -> Result<JobReport>
where
    S: CandidateSelector,
    R: RandomSource,
    F: FnMut(f64),
{
    let is_cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));

    let accepted_before = annealer.accepted_moves();
    let improving_before = annealer.improving_moves();

    let mut energies = Vec::with_capacity(n_jobs + 1);
    energies.push(annealer.current_energy());
    let mut jobs_completed = 0usize;
    let mut steps = 0usize;
    let mut cancelled = false;

    'jobs: for job in 0..n_jobs {
        if is_cancelled() {
            cancelled = true;
            break;
        }

        annealer.warm_restart()?;
        while let Some(delta) = annealer.step() {
            on_delta(delta);
            steps += 1;
            if steps % CANCEL_CHECK_INTERVAL == 0 && is_cancelled() {
                cancelled = true;
                break 'jobs;
            }
        }

        let summary = annealer.summary();
        energies.push(summary.energy);
        jobs_completed += 1;
        info!(job, n_jobs, "{summary}");
    }

    Ok(JobReport {
        energies,
        jobs_completed,
        steps,
        accepted_moves: annealer.accepted_moves() - accepted_before,
        improving_moves: annealer.improving_moves() - improving_before,
        cancelled,
    })
}
