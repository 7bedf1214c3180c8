// Shared test helpers
#![allow(dead_code)]

use netledger::counter_source::CounterSource;
use netledger::models::InterfaceCounters;
use netledger::traffic_repo::TrafficRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tempfile::TempDir;

pub async fn open_repo(dir: &TempDir) -> TrafficRepo {
    let path = dir.path().join("traffic.db");
    let repo = TrafficRepo::connect(path.to_str().unwrap()).await.unwrap();
    repo.init().await.unwrap();
    repo
}

/// Second connection to the same database file, for poking at raw state.
pub async fn raw_pool(dir: &TempDir) -> SqlitePool {
    let path = dir.path().join("traffic.db");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))
        .unwrap()
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);
    SqlitePoolOptions::new().connect_with(opts).await.unwrap()
}

pub async fn all_rows(pool: &SqlitePool) -> Vec<(i64, String, i64, i64)> {
    sqlx::query_as("SELECT time, name, recv, sent FROM traffic ORDER BY id")
        .fetch_all(pool)
        .await
        .unwrap()
}

pub fn counters(name: &str, recv: u64, sent: u64) -> InterfaceCounters {
    InterfaceCounters {
        name: name.into(),
        bytes_recv: recv,
        bytes_sent: sent,
    }
}

/// Scripted counter source: each `sample()` pops the next prepared reading.
pub struct FakeSource {
    samples: Vec<Vec<InterfaceCounters>>,
}

impl FakeSource {
    pub fn new(samples: Vec<Vec<InterfaceCounters>>) -> Self {
        Self { samples }
    }
}

impl CounterSource for FakeSource {
    fn sample(&mut self) -> anyhow::Result<Vec<InterfaceCounters>> {
        anyhow::ensure!(!self.samples.is_empty(), "fake source exhausted");
        Ok(self.samples.remove(0))
    }
}

/// Counter source whose sampling call always fails.
pub struct FailingSource;

impl CounterSource for FailingSource {
    fn sample(&mut self) -> anyhow::Result<Vec<InterfaceCounters>> {
        anyhow::bail!("counter sampling unavailable")
    }
}
