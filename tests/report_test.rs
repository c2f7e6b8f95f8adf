//! Rendering tests against an in-memory catalog.

use db_doc::db::MemoryCatalog;
use db_doc::models::{ColumnDescriptor, TableDescriptor};
use db_doc::report::build_report;

const HEADER_ROWS: &str =
    "| 序号 | 字段名称 | 数据类型 | 是否为空 | 字段说明 |\n| :--: |----| ---- | ---- | ---- |\n";

fn users_catalog() -> MemoryCatalog {
    MemoryCatalog::new().with_table(
        "app",
        TableDescriptor::new("users").with_comment("user accounts"),
        vec![
            ColumnDescriptor::new(1, "id", "bigint", "NO").with_comment("primary key"),
            ColumnDescriptor::new(2, "email", "varchar(255)", "YES"),
        ],
    )
}

#[tokio::test]
async fn test_users_table_renders_exactly() {
    let report = build_report(&users_catalog(), "app").await.unwrap();

    let expected = "\n\n\n### users (user accounts) \n\
| 序号 | 字段名称 | 数据类型 | 是否为空 | 字段说明 |\n\
| :--: |----| ---- | ---- | ---- |\n\
| 1 | id | bigint | NO | primary key |\n\
| 2 | email | varchar(255) | YES |  |\n";
    assert_eq!(report.as_str(), expected);
    assert_eq!(report.table_count(), 1);
    assert_eq!(report.column_count(), 2);
}

#[tokio::test]
async fn test_empty_schema_renders_empty_document() {
    let report = build_report(&users_catalog(), "nothing_here").await.unwrap();
    assert!(report.is_empty());
    assert_eq!(report.table_count(), 0);
}

#[tokio::test]
async fn test_table_without_columns_renders_header_only() {
    let catalog = MemoryCatalog::new().with_table("app", TableDescriptor::new("audit"), vec![]);
    let report = build_report(&catalog, "app").await.unwrap();
    assert_eq!(report.as_str(), format!("\n\n\n### audit \n{}", HEADER_ROWS));
}

#[tokio::test]
async fn test_columns_sorted_by_ordinal_position() {
    let catalog = MemoryCatalog::new().with_table(
        "app",
        TableDescriptor::new("orders"),
        vec![
            ColumnDescriptor::new(3, "created_at", "datetime", "NO"),
            ColumnDescriptor::new(1, "id", "bigint", "NO"),
            ColumnDescriptor::new(4, "note", "text", "YES"),
            ColumnDescriptor::new(2, "user_id", "bigint", "NO"),
        ],
    );
    let report = build_report(&catalog, "app").await.unwrap();

    let positions: Vec<u32> = report
        .as_str()
        .lines()
        .filter(|l| l.starts_with("| ") && !l.starts_with("| 序号") && !l.starts_with("| :--:"))
        .map(|l| l.split('|').nth(1).unwrap().trim().parse().unwrap())
        .collect();
    assert_eq!(positions, [1, 2, 3, 4]);
}

#[tokio::test]
async fn test_tables_keep_catalog_order() {
    let catalog = MemoryCatalog::new()
        .with_table("app", TableDescriptor::new("zeta"), vec![])
        .with_table("app", TableDescriptor::new("alpha"), vec![]);
    let report = build_report(&catalog, "app").await.unwrap();

    let zeta = report.as_str().find("### zeta ").unwrap();
    let alpha = report.as_str().find("### alpha ").unwrap();
    assert!(zeta < alpha);
}

#[tokio::test]
async fn test_header_uses_name_only_without_comment() {
    let catalog = MemoryCatalog::new()
        .with_table("app", TableDescriptor::new("plain"), vec![])
        .with_table(
            "app",
            TableDescriptor::new("commented").with_comment("订单表"),
            vec![],
        );
    let report = build_report(&catalog, "app").await.unwrap();

    assert!(report.as_str().contains("\n### plain \n"));
    assert!(report.as_str().contains("\n### commented (订单表) \n"));
}

#[tokio::test]
async fn test_nullable_rendered_verbatim() {
    let catalog = MemoryCatalog::new().with_table(
        "app",
        TableDescriptor::new("t"),
        vec![ColumnDescriptor::new(1, "flag", "tinyint(1)", "YES")],
    );
    let report = build_report(&catalog, "app").await.unwrap();
    assert!(report.as_str().ends_with("| 1 | flag | tinyint(1) | YES |  |\n"));
}

#[tokio::test]
async fn test_failing_lookup_aborts_build() {
    let catalog = users_catalog().with_failing_table("app", "users");
    assert!(build_report(&catalog, "app").await.is_err());
}
