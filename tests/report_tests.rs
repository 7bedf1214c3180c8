// Period aggregation queries backing show mode

mod common;

use chrono::TimeZone;
use common::open_repo;
use netledger::models::{BaselineSnapshot, DeltaRecord};
use netledger::report::Period;
use tempfile::TempDir;

fn ms(y: i32, m: u32, d: u32, h: u32) -> i64 {
    chrono::Utc
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
        .timestamp_millis()
}

fn record(time: i64, name: &str, recv: u64, sent: u64) -> DeltaRecord {
    DeltaRecord {
        time,
        name: name.into(),
        recv,
        sent,
    }
}

#[tokio::test]
async fn sums_group_by_day_and_name() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir).await;

    let rows = vec![
        record(ms(2026, 8, 1, 9), "eth0", 100, 10),
        record(ms(2026, 8, 1, 21), "eth0", 50, 5),
        record(ms(2026, 8, 1, 9), "wlan0", 7, 3),
        record(ms(2026, 8, 2, 9), "eth0", 1000, 200),
    ];
    repo.commit_run(&rows, &BaselineSnapshot::new())
        .await
        .unwrap();

    let totals = repo
        .sum_by_period(Period::Day.strftime_fmt(), false)
        .await
        .unwrap();
    assert_eq!(totals.len(), 3);

    assert_eq!(totals[0].period, "2026-08-01");
    assert_eq!(totals[0].name, "eth0");
    assert_eq!((totals[0].recv, totals[0].sent), (150, 15));

    assert_eq!(totals[1].period, "2026-08-01");
    assert_eq!(totals[1].name, "wlan0");
    assert_eq!((totals[1].recv, totals[1].sent), (7, 3));

    assert_eq!(totals[2].period, "2026-08-02");
    assert_eq!((totals[2].recv, totals[2].sent), (1000, 200));
}

#[tokio::test]
async fn monthly_and_yearly_grouping_collapse_days() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir).await;

    let rows = vec![
        record(ms(2026, 7, 31, 12), "eth0", 10, 1),
        record(ms(2026, 8, 1, 12), "eth0", 20, 2),
        record(ms(2026, 8, 15, 12), "eth0", 30, 3),
    ];
    repo.commit_run(&rows, &BaselineSnapshot::new())
        .await
        .unwrap();

    let monthly = repo
        .sum_by_period(Period::Month.strftime_fmt(), false)
        .await
        .unwrap();
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].period, "2026-07");
    assert_eq!(monthly[0].recv, 10);
    assert_eq!(monthly[1].period, "2026-08");
    assert_eq!(monthly[1].recv, 50);

    let yearly = repo
        .sum_by_period(Period::Year.strftime_fmt(), false)
        .await
        .unwrap();
    assert_eq!(yearly.len(), 1);
    assert_eq!(yearly[0].period, "2026");
    assert_eq!((yearly[0].recv, yearly[0].sent), (60, 6));
}

#[tokio::test]
async fn empty_table_yields_no_totals() {
    let dir = TempDir::new().unwrap();
    let repo = open_repo(&dir).await;
    let totals = repo
        .sum_by_period(Period::Day.strftime_fmt(), true)
        .await
        .unwrap();
    assert!(totals.is_empty());
}
