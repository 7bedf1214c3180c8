// SQLite traffic ledger. traffic rows are append-only; the key_value table
// holds the whole baseline snapshot as one JSON value under a fixed key.

use crate::filter::DOCKER_PREFIXES;
use crate::models::{BaselineSnapshot, DeltaRecord};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

/// Fixed key_value key for the serialized baseline snapshot.
pub const BASELINE_KEY: &str = "historical_record";

/// Aggregated traffic for one (period, name) group, as returned by
/// `sum_by_period`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotal {
    pub period: String,
    pub name: String,
    pub recv: u64,
    pub sent: u64,
}

pub struct TrafficRepo {
    pool: SqlitePool,
}

impl TrafficRepo {
    pub async fn connect(path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS traffic (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                time INTEGER NOT NULL,
                name TEXT NOT NULL,
                recv INTEGER NOT NULL CHECK (recv >= 0),
                sent INTEGER NOT NULL CHECK (sent >= 0)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_traffic_time ON traffic(time)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_traffic_name ON traffic(name)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS key_value (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load the persisted baseline snapshot. A missing row or a value that
    /// fails to parse yields an empty snapshot: corruption is treated as a
    /// first run, never as a fatal error. Storage read errors stay fatal.
    #[instrument(skip(self), fields(repo = "traffic", operation = "load_baseline"))]
    pub async fn load_baseline(&self) -> anyhow::Result<BaselineSnapshot> {
        let row = sqlx::query("SELECT value FROM key_value WHERE key = $1")
            .bind(BASELINE_KEY)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(BaselineSnapshot::new());
        };
        let value: String = row.try_get("value")?;
        match serde_json::from_str(&value) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "baseline snapshot unparseable, starting from empty");
                Ok(BaselineSnapshot::new())
            }
        }
    }

    /// Commit one run: every delta row plus the whole replaced baseline
    /// snapshot, as a single transaction. On any failure the transaction
    /// rolls back and the prior baseline stays authoritative.
    #[instrument(skip(self, records, snapshot), fields(repo = "traffic", operation = "commit_run", rows = records.len()))]
    pub async fn commit_run(
        &self,
        records: &[DeltaRecord],
        snapshot: &BaselineSnapshot,
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        for r in records {
            sqlx::query("INSERT INTO traffic (time, name, recv, sent) VALUES ($1, $2, $3, $4)")
                .bind(r.time)
                .bind(&r.name)
                .bind(r.recv as i64)
                .bind(r.sent as i64)
                .execute(&mut *tx)
                .await?;
        }

        let value = serde_json::to_string(snapshot)?;
        sqlx::query(
            "INSERT INTO key_value (key, value) VALUES ($1, $2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(BASELINE_KEY)
        .bind(&value)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Traffic summed per (strftime period, name), ascending by period then
    /// name. `time` is stored in millis; SQLite groups on whole seconds.
    #[instrument(skip(self), fields(repo = "traffic", operation = "sum_by_period"))]
    pub async fn sum_by_period(
        &self,
        strftime_fmt: &str,
        localtime: bool,
    ) -> anyhow::Result<Vec<PeriodTotal>> {
        let sql = if localtime {
            "SELECT strftime($1, time / 1000, 'unixepoch', 'localtime') AS period,
                    name, SUM(recv) AS recv, SUM(sent) AS sent
             FROM traffic GROUP BY period, name ORDER BY period, name"
        } else {
            "SELECT strftime($1, time / 1000, 'unixepoch') AS period,
                    name, SUM(recv) AS recv, SUM(sent) AS sent
             FROM traffic GROUP BY period, name ORDER BY period, name"
        };
        let rows = sqlx::query(sql)
            .bind(strftime_fmt)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let recv: i64 = row.try_get("recv")?;
            let sent: i64 = row.try_get("sent")?;
            out.push(PeriodTotal {
                period: row.try_get("period")?,
                name: row.try_get("name")?,
                recv: recv as u64,
                sent: sent as u64,
            });
        }
        Ok(out)
    }

    /// Distinct docker-like interface names present in the traffic table.
    pub async fn docker_interface_names(&self) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT name FROM traffic
             WHERE name LIKE $1 OR name LIKE $2 OR name LIKE $3
             ORDER BY name",
        )
        .bind(format!("{}%", DOCKER_PREFIXES[0]))
        .bind(format!("{}%", DOCKER_PREFIXES[1]))
        .bind(format!("{}%", DOCKER_PREFIXES[2]))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Delete all traffic rows for the given names. The baseline key is left
    /// untouched; stale entries refresh on the next recording run.
    #[instrument(skip(self, names), fields(repo = "traffic", operation = "delete_names", names_count = names.len()))]
    pub async fn delete_names(&self, names: &[String]) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut deleted = 0;
        for name in names {
            let r = sqlx::query("DELETE FROM traffic WHERE name = $1")
                .bind(name)
                .execute(&mut *tx)
                .await?;
            deleted += r.rows_affected();
        }
        tx.commit().await?;
        Ok(deleted)
    }

    /// Reclaim space after deletes.
    #[instrument(skip(self), fields(repo = "traffic", operation = "vacuum"))]
    pub async fn vacuum(&self) -> anyhow::Result<()> {
        sqlx::query("VACUUM").execute(&self.pool).await?;
        Ok(())
    }
}
