//! Worker population averages.
//!
//! The only cross-agent read besides the algorithmic system's broadcast:
//! after every agent has stepped, the engine averages the workers'
//! accumulators for the step record.

use workflow_agents::Worker;

/// The worker population is empty, so no average is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("empty population: cannot average over zero workers")]
pub struct EmptyPopulation;

/// Mean worker accumulators for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkerMeans {
    /// Mean resistance.
    pub resistance: f64,
    /// Mean agency score.
    pub agency: f64,
    /// Mean data quality.
    pub data_quality: f64,
}

/// Average the workers' resistance, agency, and data quality.
///
/// # Errors
///
/// Returns [`EmptyPopulation`] when `workers` yields nothing, instead of
/// producing `NaN`.
pub fn worker_means<'a>(
    workers: impl IntoIterator<Item = &'a Worker>,
) -> Result<WorkerMeans, EmptyPopulation> {
    let mut count: u32 = 0;
    let mut resistance = 0.0;
    let mut agency = 0.0;
    let mut data_quality = 0.0;

    for worker in workers {
        count = count.saturating_add(1);
        resistance += worker.resistance();
        agency += worker.agency_score();
        data_quality += worker.data_quality();
    }

    if count == 0 {
        return Err(EmptyPopulation);
    }
    let n = f64::from(count);

    Ok(WorkerMeans {
        resistance: resistance / n,
        agency: agency / n,
        data_quality: data_quality / n,
    })
}
