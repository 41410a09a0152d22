#![allow(dead_code)]

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};

/// In-memory SQLite database. The pool is pinned to one connection so every
/// query sees the same database.
pub async fn memory_database() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).min_connections(1);
    Database::connect(opt).await.unwrap()
}

/// Number of `column` definitions on `table` and the declared type of the first.
pub async fn column_info(
    db: &DatabaseConnection,
    table: &str,
    column: &str,
) -> (i64, Option<String>) {
    let row = db
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            format!(
                "SELECT COUNT(*) AS n, MAX(type) AS ty FROM pragma_table_info('{table}') WHERE name = '{column}'"
            ),
        ))
        .await
        .unwrap()
        .unwrap();
    (
        row.try_get::<i64>("", "n").unwrap(),
        row.try_get::<Option<String>>("", "ty").unwrap(),
    )
}
