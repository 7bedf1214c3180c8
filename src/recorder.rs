// One accounting run: load baseline, sample counters, filter, compute
// deltas, commit rows + replaced snapshot atomically.

use crate::counter_source::CounterSource;
use crate::delta;
use crate::filter::NameFilter;
use crate::models::DeltaRecord;
use crate::traffic_repo::TrafficRepo;
use tracing::instrument;

/// Counts for one committed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Interfaces returned by the counter source.
    pub sampled: usize,
    /// Interfaces rejected by the name filter.
    pub skipped: usize,
    /// Delta rows written (first-seen interfaces produce none).
    pub rows: usize,
}

/// Current unix millis, the shared timestamp for all rows of a run.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Runs the whole reconciliation once. The run has two terminal outcomes:
/// committed (all rows and the new snapshot visible) or aborted (storage
/// identical to before the run). A counter-source failure aborts before any
/// write; a commit failure rolls back, leaving the prior baseline
/// authoritative so the next run absorbs the gap.
#[instrument(skip_all, fields(operation = "record_run"))]
pub async fn record_run(
    repo: &TrafficRepo,
    source: &mut dyn CounterSource,
    filter: &NameFilter,
    now_ms: i64,
) -> anyhow::Result<RunSummary> {
    let mut snapshot = repo.load_baseline().await?;
    let counters = source.sample()?;

    let mut records: Vec<DeltaRecord> = Vec::new();
    let mut skipped = 0;
    for curr in &counters {
        if !filter.accepts(&curr.name) {
            skipped += 1;
            continue;
        }
        let outcome = delta::compute(curr, snapshot.get(&curr.name), now_ms);
        if let Some(record) = outcome.delta {
            records.push(record);
        }
        snapshot.insert(curr.name.clone(), outcome.baseline);
    }

    let summary = RunSummary {
        sampled: counters.len(),
        skipped,
        rows: records.len(),
    };
    repo.commit_run(&records, &snapshot).await?;
    tracing::info!(
        sampled = summary.sampled,
        skipped = summary.skipped,
        rows = summary.rows,
        "run committed"
    );
    Ok(summary)
}
