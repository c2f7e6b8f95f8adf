//! End-to-end tests for generating and writing the document.

use db_doc::config::Config;
use db_doc::db::MemoryCatalog;
use db_doc::error::DocError;
use db_doc::models::{ColumnDescriptor, TableDescriptor};
use db_doc::{generate, run};

fn catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with_table(
            "shop",
            TableDescriptor::new("orders").with_comment("订单"),
            vec![
                ColumnDescriptor::new(1, "id", "bigint unsigned", "NO").with_comment("主键"),
                ColumnDescriptor::new(2, "amount", "decimal(10,2)", "NO"),
            ],
        )
        .with_table(
            "shop",
            TableDescriptor::new("users"),
            vec![ColumnDescriptor::new(1, "id", "bigint", "NO")],
        )
}

#[tokio::test]
async fn test_generate_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.md");

    let summary = generate(&catalog(), "shop", &path).await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(summary.tables, 2);
    assert_eq!(summary.columns, 3);
    assert_eq!(summary.bytes, written.len());
    assert!(written.contains("### orders (订单) "));
    assert!(written.contains("| 1 | id | bigint unsigned | NO | 主键 |\n"));
}

#[tokio::test]
async fn test_generate_twice_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.md");

    generate(&catalog(), "shop", &path).await.unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    generate(&catalog(), "shop", &path).await.unwrap();
    let second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_generate_replaces_existing_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.md");
    std::fs::write(&path, "stale content that is much longer than the new document").unwrap();

    generate(&MemoryCatalog::new(), "shop", &path).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[tokio::test]
async fn test_failed_lookup_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.md");

    let err = generate(&catalog().with_failing_table("shop", "users"), "shop", &path)
        .await
        .unwrap_err();

    assert!(matches!(err, DocError::Query { .. }));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_run_rejects_empty_schema_before_connecting() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.md");
    // TEST-NET address: a connection attempt would fail with a connection error, not a config one.
    let config = Config {
        dsn: Some("root:pw@tcp(192.0.2.1:3306)/information_schema".to_string()),
        schema: Some(String::new()),
        output: path.clone(),
        ..Config::default()
    };

    let err = run(&config).await.unwrap_err();

    assert!(matches!(err, DocError::Config { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_run_rejects_missing_dsn() {
    let config = Config {
        schema: Some("shop".to_string()),
        ..Config::default()
    };
    let err = run(&config).await.unwrap_err();
    assert!(matches!(err, DocError::Config { .. }));
}
