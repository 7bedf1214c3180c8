// Per-interface delta computation against the prior baseline.

use crate::models::{BaselineEntry, DeltaRecord, InterfaceCounters};

/// Result of reconciling one interface: at most one traffic row, and the
/// replacement baseline entry (always produced for an accepted interface).
#[derive(Debug, Clone)]
pub struct Outcome {
    pub delta: Option<DeltaRecord>,
    pub baseline: BaselineEntry,
}

/// First observation of a name seeds the baseline without a row. When either
/// cumulative counter went backward the interface is assumed reset (restart
/// or wraparound) and the full current values are recorded as traffic since
/// the reset, for both fields at once. Otherwise the row is the plain
/// subtraction. The returned deltas are never negative.
pub fn compute(curr: &InterfaceCounters, prior: Option<&BaselineEntry>, now_ms: i64) -> Outcome {
    let delta = prior.map(|base| {
        let reset = curr.bytes_recv < base.bytes_recv || curr.bytes_sent < base.bytes_sent;
        let (recv, sent) = if reset {
            (curr.bytes_recv, curr.bytes_sent)
        } else {
            (
                curr.bytes_recv - base.bytes_recv,
                curr.bytes_sent - base.bytes_sent,
            )
        };
        DeltaRecord {
            time: now_ms,
            name: curr.name.clone(),
            recv,
            sent,
        }
    });

    Outcome {
        delta,
        baseline: BaselineEntry {
            time: now_ms,
            bytes_recv: curr.bytes_recv,
            bytes_sent: curr.bytes_sent,
        },
    }
}
