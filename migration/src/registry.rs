use entity::{MigrationHistory, MigrationHistoryActive, MigrationHistoryEntity};
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityName, EntityTrait, Schema};
use sea_orm_migration::prelude::SchemaManager;
use std::collections::BTreeMap;
use time::OffsetDateTime;

use crate::{MigrationError, MigrationScript};

/// Applied state of a registered script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStatus {
    pub version: u64,
    pub name: String,
    pub applied_at: Option<OffsetDateTime>,
}

/// Ordered set of migration scripts, keyed by version.
///
/// Applied versions are persisted in the `_migration_history` table, so each
/// script runs at most once per database.
#[derive(Default)]
pub struct Registry {
    scripts: Vec<Box<dyn MigrationScript>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S>(&mut self, script: S) -> Result<&mut Self, MigrationError>
    where
        S: MigrationScript + 'static,
    {
        let version = script.version();
        let pos = self.scripts.partition_point(|s| s.version() < version);
        if self
            .scripts
            .get(pos)
            .is_some_and(|s| s.version() == version)
        {
            return Err(MigrationError::DuplicateVersion(version));
        }
        self.scripts.insert(pos, Box::new(script));
        Ok(self)
    }

    /// Registered scripts in ascending version order.
    pub fn scripts(&self) -> impl Iterator<Item = &dyn MigrationScript> + '_ {
        self.scripts.iter().map(|s| s.as_ref())
    }

    pub async fn ensure_history(&self, db: &DatabaseConnection) -> Result<(), MigrationError> {
        let manager = SchemaManager::new(db);
        let schema = Schema::new(manager.get_database_backend());
        manager
            .create_table(
                schema
                    .create_table_from_entity(MigrationHistoryEntity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    /// Applied scripts by version. Read-only: a missing history table reads
    /// as an empty history.
    pub async fn history(
        &self,
        db: &DatabaseConnection,
    ) -> Result<BTreeMap<u64, MigrationHistory>, MigrationError> {
        // a database nothing was applied to yet has no history table
        let manager = SchemaManager::new(db);
        if !manager.has_table(MigrationHistoryEntity.table_name()).await? {
            return Ok(BTreeMap::new());
        }
        MigrationHistoryEntity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|row| {
                let stored = row.script_version;
                u64::try_from(stored)
                    .map(|version| (version, row))
                    .map_err(|_| MigrationError::CorruptHistory(stored))
            })
            .collect()
    }

    pub async fn pending(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Vec<&dyn MigrationScript>, MigrationError> {
        let history = self.history(db).await?;
        Ok(self
            .scripts()
            .filter(|s| !history.contains_key(&s.version()))
            .collect())
    }

    pub async fn status(&self, db: &DatabaseConnection) -> Result<Vec<ScriptStatus>, MigrationError> {
        let history = self.history(db).await?;
        Ok(self
            .scripts()
            .map(|s| ScriptStatus {
                version: s.version(),
                name: s.name().to_owned(),
                applied_at: history.get(&s.version()).map(|row| row.created_at),
            })
            .collect())
    }

    /// Runs every pending script in ascending version order.
    ///
    /// Stops at the first failure; the failing script and everything after it
    /// stay pending. Returns the versions applied by this call.
    pub async fn up(&self, db: &DatabaseConnection) -> Result<Vec<u64>, MigrationError> {
        self.ensure_history(db).await?;
        let pending = self.pending(db).await?;
        if pending.is_empty() {
            tracing::info!("Database schema is up to date");
            return Ok(Vec::new());
        }

        let manager = SchemaManager::new(db);
        let mut applied = Vec::with_capacity(pending.len());
        for script in pending {
            let version = script.version();
            let name = script.name();
            tracing::info! {%version, %name, "Applying migration"};
            script
                .up(&manager)
                .await
                .map_err(|source| MigrationError::Script {
                    version,
                    name: name.to_owned(),
                    source: Box::new(source),
                })?;
            record(db, script).await?;
            applied.push(version);
        }
        tracing::info! {count = applied.len(), "Applied migrations"};
        Ok(applied)
    }
}

async fn record(db: &DatabaseConnection, script: &dyn MigrationScript) -> Result<(), MigrationError> {
    let version = script.version();
    let row = MigrationHistoryActive {
        script_version: Set(
            i64::try_from(version).map_err(|_| MigrationError::VersionOutOfRange(version))?,
        ),
        script_name: Set(script.name().to_owned()),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    MigrationHistoryEntity::insert(row).exec(db).await?;
    Ok(())
}
