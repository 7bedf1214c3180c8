// Domain models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last cumulative reading this tool recorded for one interface.
/// Not necessarily the true OS value at query time, only the value seen
/// by the last committed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineEntry {
    /// Unix millis of the run that wrote this entry.
    pub time: i64,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
}

/// Whole persisted baseline: interface name -> last cumulative reading.
/// Stored as one JSON blob and always replaced in full.
pub type BaselineSnapshot = BTreeMap<String, BaselineEntry>;

/// One append-only traffic row: bytes transferred since the previous baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaRecord {
    /// Unix millis, shared by every row of the same run.
    pub time: i64,
    pub name: String,
    pub recv: u64,
    pub sent: u64,
}

/// Cumulative counters for one interface as returned by the counter source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub name: String,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
}
