//! Sales aggregation integration tests.

mod common;

use common::{line, TestHarness};
use folio_core::date::TxnDate;
use folio_core::money::Money;
use folio_core::types::Transaction;
use folio_engine::RebuildOutcome;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> TxnDate {
    TxnDate::from_ymd(y, m, d).unwrap()
}

// ============================================================================
// Roll-Ups
// ============================================================================

#[tokio::test]
async fn revenue_rolls_up_by_year_and_month() {
    let harness = TestHarness::new().await;

    harness
        .processor
        .checkout_on("alice", date(2024, 1, 15), &[line("Dune", 2)])
        .await
        .unwrap();
    harness
        .processor
        .checkout_on("bob", date(2024, 2, 20), &[line("Hyperion", 3)])
        .await
        .unwrap();
    harness
        .processor
        .checkout_on("carol", date(2023, 1, 10), &[line("Neuromancer", 1)])
        .await
        .unwrap();

    let outcome = harness.aggregator.rebuild().await.unwrap();
    let RebuildOutcome::Rebuilt(summary) = outcome else {
        panic!("expected a rebuilt report");
    };
    assert_eq!(summary.transactions, 3);
    assert_eq!(summary.rejected, 0);

    let by_year = summary.report.revenue_by_year();
    assert_eq!(by_year["2023"], Money::from_cents(1500));
    assert_eq!(by_year["2024"], Money::from_cents(5000));

    let by_month = summary.report.revenue_by_month();
    assert_eq!(by_month["2024-01"], Money::from_cents(2000));
    assert_eq!(by_month["2024-02"], Money::from_cents(3000));

    // Periods appear in ascending order
    let years: Vec<&str> = summary.report.years.iter().map(|y| y.year.as_str()).collect();
    assert_eq!(years, ["2023", "2024"]);
    let months_2024: Vec<&str> = summary.report.years[1]
        .months
        .iter()
        .map(|m| m.month.as_str())
        .collect();
    assert_eq!(months_2024, ["01", "02"]);

    // The persisted report is what the summary returned
    let persisted = harness.report.load().await.unwrap();
    assert_eq!(persisted, summary.report);
}

#[tokio::test]
async fn report_conserves_ledger_revenue() {
    let harness = TestHarness::new().await;

    let receipts = vec![
        harness
            .processor
            .checkout_on("alice", date(2024, 3, 1), &[line("Dune", 2), line("Hyperion", 1)])
            .await
            .unwrap(),
        harness
            .processor
            .checkout_on("bob", date(2024, 3, 2), &[line("Neuromancer", 3)])
            .await
            .unwrap(),
        harness
            .processor
            .checkout_on(
                "carol",
                date(2025, 1, 7),
                &[line("The Left Hand of Darkness", 2)],
            )
            .await
            .unwrap(),
    ];
    let charged: i64 = receipts.iter().map(|r| r.total_cents).sum();

    let outcome = harness.aggregator.rebuild().await.unwrap();
    let RebuildOutcome::Rebuilt(summary) = outcome else {
        panic!("expected a rebuilt report");
    };

    // Every cent charged shows up in the report, exactly once
    assert_eq!(summary.report.total_revenue(), Money::from_cents(charged));
    assert_eq!(
        summary.report.entry_count(),
        harness.ledger.load().await.unwrap().len()
    );
}

#[tokio::test]
async fn entries_within_a_day_follow_ledger_order() {
    let harness = TestHarness::new().await;
    let day = date(2024, 6, 1);

    harness
        .processor
        .checkout_on("alice", day, &[line("Hyperion", 1)])
        .await
        .unwrap();
    harness
        .processor
        .checkout_on("bob", day, &[line("Dune", 1)])
        .await
        .unwrap();

    let outcome = harness.aggregator.rebuild().await.unwrap();
    let RebuildOutcome::Rebuilt(summary) = outcome else {
        panic!("expected a rebuilt report");
    };

    let entries = &summary.report.years[0].months[0].days[0].entries;
    let titles: Vec<&str> = entries.iter().map(|e| e.book_title.as_str()).collect();
    assert_eq!(titles, ["Hyperion", "Dune"]);
}

// ============================================================================
// Missing and Malformed Input
// ============================================================================

#[tokio::test]
async fn missing_ledger_skips_without_writing() {
    let harness = TestHarness::new().await;

    let outcome = harness.aggregator.rebuild().await.unwrap();
    assert!(outcome.is_skipped());
    assert!(!harness.report.exists().await);
}

#[tokio::test]
async fn malformed_records_are_excluded_and_counted() {
    let harness = TestHarness::new().await;

    let good_one = Transaction::new(
        "1700000000000-000001".to_string(),
        "alice",
        date(2024, 1, 15),
        "Dune",
        2,
        Money::from_cents(1000),
    );
    let good_two = Transaction::new(
        "1700000000000-000002".to_string(),
        "bob",
        date(2024, 2, 20),
        "Hyperion",
        1,
        Money::from_cents(1000),
    );

    // A hand-edited ledger with an impossible date in the middle
    let records = vec![
        serde_json::to_value(&good_one).unwrap(),
        json!({
            "id": "1700000000000-000099",
            "username": "mallory",
            "date": "02-30-2024",
            "book_title": "Dune",
            "quantity": 1,
            "unit_price_cents": 1000,
            "total_cents": 1000
        }),
        serde_json::to_value(&good_two).unwrap(),
    ];
    let path = harness.files.path_for(harness.ledger.resource());
    std::fs::write(&path, serde_json::to_vec_pretty(&records).unwrap()).unwrap();

    let outcome = harness.aggregator.rebuild().await.unwrap();
    let RebuildOutcome::Rebuilt(summary) = outcome else {
        panic!("expected a rebuilt report");
    };

    // The broken record is excluded and surfaced, never defaulted
    assert_eq!(summary.transactions, 2);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.report.total_revenue(), Money::from_cents(3000));
}

// ============================================================================
// Determinism
// ============================================================================

#[tokio::test]
async fn rebuild_is_idempotent_byte_for_byte() {
    let harness = TestHarness::new().await;
    harness
        .processor
        .checkout_on("alice", date(2024, 1, 15), &[line("Dune", 2), line("Neuromancer", 1)])
        .await
        .unwrap();

    harness.aggregator.rebuild().await.unwrap();
    let report_path = harness.files.path_for(harness.report.resource());
    let first = std::fs::read(&report_path).unwrap();

    let ledger_path = harness.files.path_for(harness.ledger.resource());
    let ledger_before = std::fs::read(&ledger_path).unwrap();

    harness.aggregator.rebuild().await.unwrap();
    let second = std::fs::read(&report_path).unwrap();

    assert_eq!(first, second, "unchanged ledger must rebuild identically");
    // The rebuild only reads the ledger
    assert_eq!(ledger_before, std::fs::read(&ledger_path).unwrap());
}

#[tokio::test]
async fn rebuild_replaces_previous_report_wholesale() {
    let harness = TestHarness::new().await;

    harness
        .processor
        .checkout_on("alice", date(2024, 1, 15), &[line("Dune", 1)])
        .await
        .unwrap();
    harness.aggregator.rebuild().await.unwrap();
    let first = harness.report.load().await.unwrap();
    assert_eq!(first.total_revenue(), Money::from_cents(1000));

    harness
        .processor
        .checkout_on("bob", date(2024, 1, 16), &[line("Neuromancer", 2)])
        .await
        .unwrap();
    harness.aggregator.rebuild().await.unwrap();
    let second = harness.report.load().await.unwrap();

    // The new report reflects the full ledger, not a delta on the old file
    assert_eq!(second.total_revenue(), Money::from_cents(4000));
    assert_eq!(second.entry_count(), 2);
}
