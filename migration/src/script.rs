use sea_orm_migration::prelude::SchemaManager;

use crate::MigrationError;

/// A versioned, forward-only schema change.
///
/// The registry keys applied scripts by [`MigrationScript::version`], so a
/// released script must never change its version. Scripts do not check
/// whether they already ran; the registry only calls `up` for versions
/// missing from the history table.
#[async_trait::async_trait]
pub trait MigrationScript: Send + Sync {
    async fn up(&self, manager: &SchemaManager) -> Result<(), MigrationError>;

    /// Ordering and identity key, `YYYYMMDDHHMMSS`.
    fn version(&self) -> u64;

    fn name(&self) -> &str;
}
