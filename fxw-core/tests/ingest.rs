mod common;

use common::{MemoryRepository, TestApp, deal};
use fxw_core::{
    ingest::{BatchError, IngestError, RowError},
    models::ParseError,
    ports::{Application as _, TextLines},
    validation::ValidationError,
};
use std::sync::atomic::Ordering;

// Turn an in-memory string into the same kind of line source an upload produces
fn lines(input: &'static str) -> TextLines<&'static [u8]> {
    TextLines::new(input.as_bytes())
}

#[test_log::test(tokio::test)]
async fn test_ingest_one_stores_valid_deal() {
    let app = TestApp(MemoryRepository::default());
    let candidate = deal("D1", "USD", "EUR", "2024-02-20T14:17:19.924", 99.99);

    let stored = app.ingestor().ingest_one(candidate.clone()).await.unwrap();

    assert_eq!(stored, candidate);
    assert_eq!(app.0.get("D1"), Some(candidate));
}

#[test_log::test(tokio::test)]
async fn test_ingest_one_rejects_unknown_currency() {
    let app = TestApp(MemoryRepository::default());
    let candidate = deal("D2", "USD", "XYZ", "2024-02-20T00:00:00", 10.0);

    let err = app.ingestor().ingest_one(candidate).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::Invalid(ValidationError::InvalidCurrency(ref code)) if code == "XYZ"
    ));
    assert_eq!(app.0.len(), 0);
}

#[test_log::test(tokio::test)]
async fn test_ingest_one_rejects_early_timestamp() {
    let app = TestApp(MemoryRepository::default());
    let candidate = deal("D3", "USD", "JOD", "1980-01-01T00:00:00", 1.99);

    let err = app.ingestor().ingest_one(candidate).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::Invalid(ValidationError::TimestampTooEarly(_))
    ));
    assert_eq!(app.0.len(), 0);
}

#[test_log::test(tokio::test)]
async fn test_ingest_one_twice_is_duplicate() {
    let app = TestApp(MemoryRepository::default());
    let first = deal("D1", "USD", "EUR", "2024-02-20T14:17:19.924", 99.99);
    let second = deal("D1", "GBP", "JPY", "2024-03-01T09:30:00", 12.5);

    app.ingestor().ingest_one(first.clone()).await.unwrap();
    let err = app.ingestor().ingest_one(first.clone()).await.unwrap_err();
    assert!(matches!(err, IngestError::Duplicate(ref dup) if dup.0.as_str() == "D1"));

    // A different payload under the same identifier does not overwrite either
    let err = app.ingestor().ingest_one(second).await.unwrap_err();
    assert!(matches!(err, IngestError::Duplicate(_)));

    assert_eq!(app.0.len(), 1);
    assert_eq!(app.0.get("D1"), Some(first));
}

#[test_log::test(tokio::test)]
async fn test_ingest_one_validates_before_checking_duplicates() {
    let existing = deal("D1", "USD", "EUR", "2024-02-20T00:00:00", 1.0);
    let app = TestApp(MemoryRepository::with_deals([existing]));

    let err = app
        .ingestor()
        .ingest_one(deal("D1", "USD", "EUR", "2024-02-20T00:00:00", -1.0))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IngestError::Invalid(ValidationError::NonPositiveAmount(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_ingest_one_store_conflict_is_duplicate() {
    // The existence check misses the record, as if another writer raced us
    let existing = deal("D1", "USD", "EUR", "2024-02-20T00:00:00", 1.0);
    let app = TestApp(MemoryRepository::with_deals([existing.clone()]));
    app.0.blind_exists.store(true, Ordering::SeqCst);

    let err = app
        .ingestor()
        .ingest_one(deal("D1", "CHF", "EUR", "2024-02-21T00:00:00", 2.0))
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Duplicate(_)));
    assert_eq!(app.0.get("D1"), Some(existing));
}

#[test_log::test(tokio::test)]
async fn test_ingest_one_store_failure() {
    let app = TestApp(MemoryRepository::default());
    app.0.offline.store(true, Ordering::SeqCst);

    let err = app
        .ingestor()
        .ingest_one(deal("D1", "USD", "EUR", "2024-02-20T00:00:00", 1.0))
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Store(_)));
}

#[test_log::test(tokio::test)]
async fn test_batch_all_valid() {
    let app = TestApp(MemoryRepository::default());

    let report = app
        .ingestor()
        .ingest_batch(lines(
            "D1,USD,EUR,2024-02-20T14:17:19.924,99.99\n\
             D2,GBP,JPY,2024-02-20 10:00:00,1500\n\
             D3,AED,JOD,1982-01-01T00:00:00,0.01\n",
        ))
        .await
        .unwrap();

    assert_eq!(report.rows, 3);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.duplicates, 0);
    assert!(report.failures.is_empty());
    assert_eq!(app.0.ids(), vec!["D1", "D2", "D3"]);
}

#[test_log::test(tokio::test)]
async fn test_batch_isolates_malformed_row() {
    let app = TestApp(MemoryRepository::default());

    let report = app
        .ingestor()
        .ingest_batch(lines(
            "D1,USD,EUR,2024-02-20T10:00:00,1\n\
             D2,USD,EUR,2024-02-20T10:00:00,2\n\
             D3,USD,EUR,2024-02-20T10:00:00\n\
             D4,USD,EUR,2024-02-20T10:00:00,4\n\
             D5,USD,EUR,2024-02-20T10:00:00,5",
        ))
        .await
        .unwrap();

    assert_eq!(report.rows, 5);
    assert_eq!(report.succeeded, 4);
    assert_eq!(report.parse_failures(), 1);
    assert_eq!(report.validation_failures(), 0);
    assert_eq!(report.failures[0].line, 3);
    assert_eq!(report.failures[0].row, "D3,USD,EUR,2024-02-20T10:00:00");
    assert_eq!(
        report.failures[0].error,
        RowError::Parse(ParseError::FieldCount {
            expected: 5,
            found: 4
        })
    );
    assert_eq!(app.0.ids(), vec!["D1", "D2", "D4", "D5"]);
}

#[test_log::test(tokio::test)]
async fn test_batch_records_validation_failure() {
    let app = TestApp(MemoryRepository::default());

    let report = app
        .ingestor()
        .ingest_batch(lines("D4,USD,EUR,2024-02-20T10:00:00,-5"))
        .await
        .unwrap();

    assert_eq!(report.rows, 1);
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.validation_failures(), 1);
    assert_eq!(
        report.failures[0].error,
        RowError::Invalid(ValidationError::NonPositiveAmount(-5.0))
    );
    assert_eq!(
        report.failures[0].error.to_string(),
        "invalid deal amount: -5"
    );
    assert_eq!(app.0.len(), 0);
}

#[test_log::test(tokio::test)]
async fn test_batch_mixed_outcomes() {
    let existing = deal("OLD", "USD", "EUR", "2020-01-01T00:00:00", 1.0);
    let app = TestApp(MemoryRepository::with_deals([existing.clone()]));

    let report = app
        .ingestor()
        .ingest_batch(lines(
            "OLD,GBP,EUR,2024-02-20T10:00:00,7\n\
             N1,USD,XYZ,2024-02-20T10:00:00,10\n\
             N2,USD,USD,2024-02-20T10:00:00,10\n\
             N3,USD,JOD,1980-01-01T00:00:00,1.99\n\
             N4,USD,EUR,not-a-date,1\n\
             N5,USD,EUR,2024-02-20T10:00:00,lots\n\
             \n\
             N6,CHF,SEK,2024-02-20T10:00:00,3.5\n",
        ))
        .await
        .unwrap();

    assert_eq!(report.rows, 8);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.validation_failures(), 3);
    assert_eq!(report.parse_failures(), 3);
    assert_eq!(report.store_failures(), 0);

    let lines = report.failures.iter().map(|f| f.line).collect::<Vec<_>>();
    assert_eq!(lines, vec![2, 3, 4, 5, 6, 7]);

    assert_eq!(app.0.get("OLD"), Some(existing));
    assert_eq!(app.0.ids(), vec!["OLD", "N6"]);
}

#[test_log::test(tokio::test)]
async fn test_batch_duplicate_is_checked_before_validation() {
    // An invalid row whose identifier exists is counted as a duplicate
    let existing = deal("D1", "USD", "EUR", "2020-01-01T00:00:00", 1.0);
    let app = TestApp(MemoryRepository::with_deals([existing]));

    let report = app
        .ingestor()
        .ingest_batch(lines("D1,USD,XYZ,2024-02-20T10:00:00,-1"))
        .await
        .unwrap();

    assert_eq!(report.duplicates, 1);
    assert!(report.failures.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_batch_repeated_identifier_within_batch() {
    let app = TestApp(MemoryRepository::default());

    let report = app
        .ingestor()
        .ingest_batch(lines(
            "D1,USD,EUR,2024-02-20T10:00:00,1\n\
             D1,GBP,EUR,2024-02-20T11:00:00,2\n",
        ))
        .await
        .unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(app.0.get("D1").unwrap().from_currency_iso, "USD");
}

#[test_log::test(tokio::test)]
async fn test_batch_store_conflict_counts_as_duplicate() {
    let existing = deal("D1", "USD", "EUR", "2020-01-01T00:00:00", 1.0);
    let app = TestApp(MemoryRepository::with_deals([existing]));
    app.0.blind_exists.store(true, Ordering::SeqCst);

    let report = app
        .ingestor()
        .ingest_batch(lines(
            "D1,USD,EUR,2024-02-20T10:00:00,1\n\
             D2,USD,EUR,2024-02-20T10:00:00,2\n",
        ))
        .await
        .unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.duplicates, 1);
}

#[test_log::test(tokio::test)]
async fn test_batch_store_failure_is_per_row() {
    let app = TestApp(MemoryRepository::default());
    app.0.offline.store(true, Ordering::SeqCst);

    let report = app
        .ingestor()
        .ingest_batch(lines(
            "D1,USD,EUR,2024-02-20T10:00:00,1\n\
             D2,USD,EUR,2024-02-20T10:00:00,2\n",
        ))
        .await
        .unwrap();

    assert_eq!(report.rows, 2);
    assert_eq!(report.store_failures(), 2);
    assert_eq!(
        report.failures[1].error,
        RowError::Store("store is offline".to_owned())
    );
}

#[test_log::test(tokio::test)]
async fn test_batch_empty_input() {
    let app = TestApp(MemoryRepository::default());

    let err = app.ingestor().ingest_batch(lines("")).await.unwrap_err();

    assert!(matches!(err, BatchError::Empty));
}

#[test_log::test(tokio::test)]
async fn test_batch_invalid_utf8_rows_are_isolated() {
    let app = TestApp(MemoryRepository::default());

    let input: &'static [u8] = b"D1,USD,EUR,2024-02-20T10:00:00,1\n\
        D\xe92,USD,EUR,2024-02-20T10:00:00,2\n\
        D3,US\xff,EUR,2024-02-20T10:00:00,3\n\
        D4,USD,EUR,2024-02-20T10:00:00,4\n";
    let report = app
        .ingestor()
        .ingest_batch(TextLines::new(input))
        .await
        .unwrap();

    assert_eq!(report.rows, 4);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].line, 3);
    assert!(matches!(
        report.failures[0].error,
        RowError::Invalid(ValidationError::InvalidCurrency(_))
    ));
    assert_eq!(app.0.ids(), vec!["D1", "D\u{fffd}2", "D4"]);
}

#[test_log::test(tokio::test)]
async fn test_batch_unreadable_input() {
    let app = TestApp(MemoryRepository::default());

    // The source fails after delivering the first line
    let chunks: Vec<std::io::Result<&'static [u8]>> = vec![
        Ok(b"D1,USD,EUR,2024-02-20T10:00:00,1\n"),
        Err(std::io::Error::other("connection reset")),
    ];
    let reader = tokio_util::io::StreamReader::new(futures::stream::iter(chunks));
    let err = app
        .ingestor()
        .ingest_batch(TextLines::new(reader))
        .await
        .unwrap_err();

    match err {
        BatchError::Unreadable { line, report, .. } => {
            assert_eq!(line, 2);
            assert_eq!(report.succeeded, 1);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(app.0.ids(), vec!["D1"]);
}

#[cfg(feature = "serde")]
#[test_log::test(tokio::test)]
async fn test_batch_report_serializes() {
    let app = TestApp(MemoryRepository::default());

    let report = app
        .ingestor()
        .ingest_batch(lines("D4,USD,EUR,2024-02-20T10:00:00,-5"))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "rows": 1,
            "succeeded": 0,
            "duplicates": 0,
            "failures": [{
                "line": 1,
                "row": "D4,USD,EUR,2024-02-20T10:00:00,-5",
                "error": {
                    "kind": "invalid",
                    "detail": { "kind": "non_positive_amount", "value": -5.0 }
                }
            }]
        })
    );
}
