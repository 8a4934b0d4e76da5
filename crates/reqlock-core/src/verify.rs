//! Verify that generated lock files are in sync with their inputs
//!
//! Each environment's input is hashed with every [`HashStrategy`]; the
//! output is current when its hash comment equals any of those digests.
//! Nothing is written.

use std::sync::Mutex;

use serde::Serialize;

use crate::comment::{HashComment, read_hash_comment};
use crate::environment::Environment;
use crate::error::VerifyError;
use crate::hash::HashStrategy;
use crate::work_queue::WorkQueue;

/// Outcome of checking a single environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub environment: Environment,
    /// Robust hash comment of the current input.
    pub expected: HashComment,
    /// Hash comment found in the output, `None` when absent.
    pub found: Option<HashComment>,
    /// Strategy whose digest matched `found`.
    pub matched_by: Option<HashStrategy>,
}

impl VerificationResult {
    pub fn matched(&self) -> bool {
        self.matched_by.is_some()
    }
}

/// Results of a verification run, in environment order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub results: Vec<VerificationResult>,
}

impl VerifyReport {
    /// True when every environment matched (vacuously true when empty).
    pub fn success(&self) -> bool {
        self.results.iter().all(VerificationResult::matched)
    }

    /// Environments whose output is stale.
    pub fn failed(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.matched())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Hash an environment's input and compare against its output's comment.
pub fn check(env: &Environment) -> Result<VerificationResult, VerifyError> {
    let mut accepted = Vec::with_capacity(HashStrategy::ALL.len());
    for strategy in HashStrategy::ALL {
        let comment = HashComment::new(strategy.compute(&env.input)?)?;
        accepted.push((strategy, comment));
    }
    let found = read_hash_comment(&env.output)?;

    let matched_by = found.as_ref().and_then(|found| {
        accepted
            .iter()
            .find(|(_, comment)| comment == found)
            .map(|(strategy, _)| *strategy)
    });

    // ALL starts with Robust, which is what gets reported as expected
    let (_, expected) = accepted.swap_remove(0);

    Ok(VerificationResult {
        environment: env.clone(),
        expected,
        found,
        matched_by,
    })
}

/// Log the outcome of one environment.
pub fn report(result: &VerificationResult) {
    let env = &result.environment;
    match result.matched_by {
        Some(strategy) => {
            log::info!(
                "OK - {} was generated from {}.",
                env.output.display(),
                env.input.display()
            );
            if strategy != HashStrategy::Robust {
                log::debug!("{} carries a legacy {strategy} hash", env.output.display());
            }
        }
        None => {
            log::error!(
                "ERROR! {} was not regenerated after changes in {}.",
                env.output.display(),
                env.input.display()
            );
            log::error!("Expecting: {}", result.expected);
            log::error!(
                "Found:     {}",
                result
                    .found
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default()
            );
        }
    }
}

/// Verify environments one after another.
///
/// Stale outputs are collected into the report; the first input error
/// aborts the run before any later environment is hashed.
pub fn verify(envs: &[Environment]) -> Result<VerifyReport, VerifyError> {
    let mut results = Vec::with_capacity(envs.len());
    for env in envs {
        log::debug!(
            "Verifying that {} was generated from {}",
            env.output.display(),
            env.input.display()
        );
        let result = check(env)?;
        report(&result);
        results.push(result);
    }
    Ok(VerifyReport { results })
}

/// Verify environments with `jobs` parallel workers.
///
/// Same contract as [`verify`]; results are logged in environment order once
/// all workers finish. After an error no new environments are claimed, and
/// the error of the first failing environment is returned.
pub fn verify_parallel(envs: &[Environment], jobs: usize) -> Result<VerifyReport, VerifyError> {
    if jobs <= 1 || envs.len() <= 1 {
        return verify(envs);
    }

    let queue = WorkQueue::new(envs);
    let workers = jobs.min(queue.total());
    let pool = worker_pool(workers)?;
    log::debug!("Verifying {} environments with {workers} workers", queue.total());

    let outcomes: Mutex<Vec<(usize, Result<VerificationResult, VerifyError>)>> =
        Mutex::new(Vec::with_capacity(envs.len()));

    pool.scope(|s| {
        for _ in 0..workers {
            s.spawn(|_| {
                while let Some((idx, env)) = queue.next() {
                    let outcome = check(env);
                    if outcome.is_err() {
                        queue.close();
                    }
                    outcomes
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .push((idx, outcome));
                }
            });
        }
    });

    let mut outcomes = outcomes.into_inner().unwrap_or_else(|e| e.into_inner());
    outcomes.sort_by_key(|(idx, _)| *idx);

    let mut results = Vec::with_capacity(outcomes.len());
    for (_, outcome) in outcomes {
        let result = outcome?;
        report(&result);
        results.push(result);
    }
    Ok(VerifyReport { results })
}

/// Dedicated pool so `jobs` is not capped by the global rayon pool size.
fn worker_pool(threads: usize) -> Result<rayon::ThreadPool, VerifyError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("reqlock-verify-{i}"))
        .build()
        .map_err(VerifyError::WorkerPool)
}
