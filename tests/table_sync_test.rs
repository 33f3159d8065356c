use mayoche_etl::config::TransformOptions;
use mayoche_etl::core::{FieldValue, Record, TableStore};
use mayoche_etl::{EtlEngine, EtlError, MemoryTable, Result, TableSyncPipeline};
use std::sync::atomic::{AtomicUsize, Ordering};

const SOURCE: &str = "Choice-ntu4w2o4krempmbxvq4tsmdrkq-dev";
const DESTINATION: &str = "choice";

fn source_row(id: &str, animal: &str, name: &str) -> Record {
    Record::new()
        .with("id", id)
        .with("animal", animal)
        .with("createdAt", "2022-11-08T13:47:09.339Z")
        .with("description", format!("{} description", name))
        .with("name", name)
}

fn expected_row(id: &str, animal: &str, name: &str) -> Record {
    Record::new()
        .with("choiceId", id)
        .with("Animal", animal)
        .with("CreatedAt", "2022/11/08T13:47:09.339Z")
        .with("Description", format!("{} description", name))
        .with("Name", name)
        .with("ImageUrl", format!("https://{}oftheday.com/", animal))
}

fn sorted(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(|r| format!("{:?}", r.get("choiceId")));
    records
}

async fn source_table(rows: Vec<Record>) -> MemoryTable {
    MemoryTable::new(SOURCE, "id")
        .with_page_size(2)
        .with_records(rows)
        .await
}

async fn stale_destination() -> MemoryTable {
    MemoryTable::new(DESTINATION, "choiceId")
        .with_records(vec![
            Record::new().with("choiceId", "c-1").with("Name", "outdated"),
            Record::new().with("choiceId", "gone").with("Name", "removed upstream"),
        ])
        .await
}

#[tokio::test]
async fn test_sync_replaces_destination_with_transformed_source() {
    let source = source_table(vec![
        source_row("c-1", "cat", "Mochi"),
        source_row("c-2", "dog", "Rex"),
        source_row("c-3", "pet", "Bubbles").with("votes", FieldValue::N("9".to_string())),
    ])
    .await;
    let destination = stale_destination().await;

    let pipeline = TableSyncPipeline::new(
        source.clone(),
        destination.clone(),
        TransformOptions::default(),
    );
    let summary = EtlEngine::new(pipeline).run().await.unwrap();

    assert_eq!(summary.destination, DESTINATION);
    assert_eq!(summary.records_written, 3);

    let expected = vec![
        expected_row("c-1", "cat", "Mochi"),
        expected_row("c-2", "dog", "Rex"),
        expected_row("c-3", "pet", "Bubbles").with("votes", FieldValue::N("9".to_string())),
    ];
    assert_eq!(sorted(destination.records().await), sorted(expected));

    // 來源表不應被修改
    assert_eq!(source.len().await, 3);
    assert!(source.records().await.iter().all(|r| r.get("id").is_some()));
}

#[tokio::test]
async fn test_empty_source_clears_destination() {
    let source = source_table(vec![]).await;
    let destination = stale_destination().await;

    let pipeline =
        TableSyncPipeline::new(source, destination.clone(), TransformOptions::default());
    let summary = EtlEngine::new(pipeline).run().await.unwrap();

    assert_eq!(summary.records_written, 0);
    assert!(destination.is_empty().await);
}

#[tokio::test]
async fn test_missing_field_aborts_before_cleanup() {
    let mut broken = source_row("c-2", "dog", "Rex");
    broken.data.remove("description");
    let source = source_table(vec![source_row("c-1", "cat", "Mochi"), broken]).await;
    let destination = stale_destination().await;

    let pipeline =
        TableSyncPipeline::new(source, destination.clone(), TransformOptions::default());
    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(
        err,
        EtlError::MissingFieldError { record: 1, ref field } if field == "description"
    ));
    assert_eq!(destination.len().await, 2);
}

#[tokio::test]
async fn test_missing_identity_field_fails_on_read() {
    let source = source_table(vec![Record::new().with("animal", "cat")]).await;
    let destination = stale_destination().await;

    let pipeline =
        TableSyncPipeline::new(source, destination.clone(), TransformOptions::default());
    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, EtlError::MissingFieldError { ref field, .. } if field == "id"));
    assert_eq!(destination.len().await, 2);
}

/// Fails the n-th put, delegating everything else to a memory table.
struct FlakyTable {
    inner: MemoryTable,
    fail_on_put: usize,
    puts: AtomicUsize,
}

impl TableStore for FlakyTable {
    fn table_name(&self) -> &str {
        self.inner.table_name()
    }

    async fn scan(&self) -> Result<Vec<Record>> {
        self.inner.scan().await
    }

    async fn put_item(&self, record: &Record) -> Result<()> {
        if self.puts.fetch_add(1, Ordering::SeqCst) == self.fail_on_put {
            return Err(EtlError::TableError {
                table: self.inner.table_name().to_string(),
                operation: "put_item".to_string(),
                message: "ProvisionedThroughputExceededException".to_string(),
            });
        }
        self.inner.put_item(record).await
    }

    async fn delete_item(&self, key_field: &str, key: &FieldValue) -> Result<()> {
        self.inner.delete_item(key_field, key).await
    }
}

#[tokio::test]
async fn test_write_failure_reports_progress() {
    let source = source_table(vec![
        source_row("c-1", "cat", "Mochi"),
        source_row("c-2", "dog", "Rex"),
        source_row("c-3", "pet", "Bubbles"),
    ])
    .await;
    let inner = stale_destination().await;
    let destination = FlakyTable {
        inner: inner.clone(),
        fail_on_put: 2,
        puts: AtomicUsize::new(0),
    };

    let pipeline = TableSyncPipeline::new(source, destination, TransformOptions::default());
    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    match err {
        EtlError::BatchError {
            operation,
            succeeded,
            attempted,
            source,
        } => {
            assert_eq!(operation, "put");
            assert_eq!(succeeded, 2);
            assert_eq!(attempted, 3);
            assert!(matches!(*source, EtlError::TableError { .. }));
        }
        other => panic!("expected batch error, got {}", other),
    }

    // 清空已完成，只寫入前兩筆
    assert_eq!(inner.len().await, 2);
}

#[tokio::test]
async fn test_cleanup_failure_across_pages_writes_nothing() {
    let source = source_table(vec![source_row("c-9", "cat", "Mochi")]).await;
    let destination = MemoryTable::new(DESTINATION, "choiceId")
        .with_page_size(1)
        .with_records(vec![
            Record::new().with("choiceId", "a"),
            Record::new().with("Name", "keyless"),
            Record::new().with("choiceId", "b"),
        ])
        .await;

    let pipeline =
        TableSyncPipeline::new(source, destination.clone(), TransformOptions::default());
    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    match err {
        EtlError::BatchError {
            operation,
            succeeded,
            attempted,
            source,
        } => {
            assert_eq!(operation, "delete");
            assert_eq!(succeeded, 1);
            assert_eq!(attempted, 3);
            assert!(matches!(
                *source,
                EtlError::MissingFieldError { record: 1, ref field } if field == "choiceId"
            ));
        }
        other => panic!("expected batch error, got {}", other),
    }

    // 清空中斷後不應寫入任何來源資料
    let remaining = destination.records().await;
    assert_eq!(
        remaining,
        vec![
            Record::new().with("Name", "keyless"),
            Record::new().with("choiceId", "b"),
        ]
    );
    assert!(remaining
        .iter()
        .all(|r| r.get("choiceId") != Some(&FieldValue::from("c-9"))));
}

#[tokio::test]
async fn test_write_records_report() {
    let source = source_table(vec![]).await;
    let destination = MemoryTable::new(DESTINATION, "choiceId");
    let pipeline =
        TableSyncPipeline::new(source, destination.clone(), TransformOptions::default());

    let records = vec![
        expected_row("c-1", "cat", "Mochi"),
        Record::new().with("Name", "no key"),
        expected_row("c-3", "pet", "Bubbles"),
    ];
    let report = pipeline.write_records(&records).await;

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 1);
    assert!(!report.is_complete());
    assert_eq!(report.failure.as_ref().map(|f| f.index), Some(1));
    assert_eq!(destination.len().await, 1);
}
