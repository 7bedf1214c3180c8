// Aggregated traffic report (show mode): per-period per-interface sums with
// autoscaled byte units.

use crate::filter::NameFilter;
use crate::traffic_repo::{PeriodTotal, TrafficRepo};
use std::fmt::Write as _;

/// Grouping granularity for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Year,
    Month,
    Day,
}

impl Period {
    /// `y`, `m`, `d`; anything else falls back to daily.
    pub fn parse(s: &str) -> Self {
        match s {
            "y" => Period::Year,
            "m" => Period::Month,
            _ => Period::Day,
        }
    }

    pub fn strftime_fmt(self) -> &'static str {
        match self {
            Period::Year => "%Y",
            Period::Month => "%Y-%m",
            Period::Day => "%Y-%m-%d",
        }
    }
}

/// Timezone used when bucketing rows into periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLocation {
    Auto,
    Local,
    Utc,
}

impl TimeLocation {
    pub fn parse(s: &str) -> Self {
        match s {
            "local" => TimeLocation::Local,
            "utc" => TimeLocation::Utc,
            _ => TimeLocation::Auto,
        }
    }

    /// Auto follows the machine's timezone, matching the recording host.
    pub fn is_localtime(self) -> bool {
        !matches!(self, TimeLocation::Utc)
    }
}

/// Scale a byte count down GB -> MB -> KB until the value reaches 1, never
/// below KB.
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    for (unit, div) in [("GB", KB * KB * KB), ("MB", KB * KB)] {
        let v = b / div;
        if v >= 1.0 {
            return format!("{:.2}{}", v, unit);
        }
    }
    format!("{:.2}KB", b / KB)
}

/// Fixed-width table, one row per (period, interface), a `---` rule between
/// periods. `totals` must already be ordered by period.
pub fn render(totals: &[PeriodTotal]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12}{:<20}{:>12}{:>12}", "time", "name", "recv", "sent");
    let _ = writeln!(out, "{:<12}{:<20}{:>12}{:>12}", "----", "----", "----", "----");
    let mut last_period = "";
    for t in totals {
        if !last_period.is_empty() && last_period != t.period {
            out.push_str("---\n");
        }
        last_period = &t.period;
        let _ = writeln!(
            out,
            "{:<12}{:<20}{:>12}{:>12}",
            t.period,
            t.name,
            format_bytes(t.recv),
            format_bytes(t.sent)
        );
    }
    out
}

/// Query, filter, render and print the report.
pub async fn show(
    repo: &TrafficRepo,
    period: Period,
    location: TimeLocation,
    filter: &NameFilter,
) -> anyhow::Result<()> {
    let totals = repo
        .sum_by_period(period.strftime_fmt(), location.is_localtime())
        .await?;
    let filtered: Vec<PeriodTotal> = totals
        .into_iter()
        .filter(|t| filter.accepts(&t.name))
        .collect();
    print!("{}", render(&filtered));
    Ok(())
}
