use sea_orm_migration::prelude::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Schema reconciliation failed: {0}")]
    Database(#[from] DbErr),

    #[error("Table {0} does not exist")]
    MissingTable(String),

    #[error("A migration script with version {0} is already registered")]
    DuplicateVersion(u64),

    #[error("Migration script version {0} does not fit the history table")]
    VersionOutOfRange(u64),

    #[error("History table holds an invalid script version {0}")]
    CorruptHistory(i64),

    #[error("Migration {version} ({name}) failed: {source}")]
    Script {
        version: u64,
        name: String,
        #[source]
        source: Box<MigrationError>,
    },
}
