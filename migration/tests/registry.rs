mod common;

use common::memory_database;
use entity::{MigrationHistoryActive, MigrationHistoryEntity};
use migration::{
    auto_migrate, AddCommitMsg, CreateCicdDeploymentCommits, FieldKind, FieldShape,
    MigrationError, MigrationScript, Registry, SchemaManager, TableShape,
};
use sea_orm::{ActiveValue::Set, Database, EntityTrait};
use time::OffsetDateTime;

struct AddToMissingTable;

#[async_trait::async_trait]
impl MigrationScript for AddToMissingTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), MigrationError> {
        auto_migrate(
            manager,
            &[TableShape::new(
                "cicd_deployments",
                vec![FieldShape::nullable("name", FieldKind::String { len: Some(255) })],
            )],
        )
        .await
    }

    fn version(&self) -> u64 {
        20231101000000
    }

    fn name(&self) -> &str {
        "add name to cicd_deployments table"
    }
}

#[tokio::test]
async fn fresh_database_is_brought_up_to_date() {
    let db = memory_database().await;
    let registry = migration::registry().unwrap();

    let pending: Vec<u64> = registry
        .pending(&db)
        .await
        .unwrap()
        .iter()
        .map(|s| s.version())
        .collect();
    assert_eq!(pending, vec![20231020000001, 20231127142100]);

    let applied = registry.up(&db).await.unwrap();
    assert_eq!(applied, vec![20231020000001, 20231127142100]);

    let manager = SchemaManager::new(&db);
    assert!(manager
        .has_column("cicd_deployment_commits", "commit_msg")
        .await
        .unwrap());
    let status = registry.status(&db).await.unwrap();
    assert!(status.iter().all(|s| s.applied_at.is_some()));
    assert_eq!(
        status[1].name,
        "add commit_msg to cicd_deployment_commit table"
    );
}

#[tokio::test]
async fn applied_scripts_do_not_run_again() {
    let db = memory_database().await;
    let registry = migration::registry().unwrap();
    registry.up(&db).await.unwrap();

    assert!(registry.pending(&db).await.unwrap().is_empty());
    assert!(registry.up(&db).await.unwrap().is_empty());
    assert_eq!(registry.history(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn first_failure_halts_the_batch() {
    let db = memory_database().await;
    let mut registry = Registry::new();
    registry
        .register(AddCommitMsg)
        .unwrap()
        .register(AddToMissingTable)
        .unwrap()
        .register(CreateCicdDeploymentCommits)
        .unwrap();

    let err = registry.up(&db).await.unwrap_err();

    match err {
        MigrationError::Script {
            version, source, ..
        } => {
            assert_eq!(version, 20231101000000);
            assert!(matches!(*source, MigrationError::MissingTable(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    let applied: Vec<(u64, bool)> = registry
        .status(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.version, s.applied_at.is_some()))
        .collect();
    assert_eq!(
        applied,
        vec![
            (20231020000001, true),
            (20231101000000, false),
            (20231127142100, false),
        ]
    );
    let manager = SchemaManager::new(&db);
    assert!(!manager
        .has_column("cicd_deployment_commits", "commit_msg")
        .await
        .unwrap());
}

#[tokio::test]
async fn column_added_out_of_band_is_tolerated() {
    let db = memory_database().await;
    let manager = SchemaManager::new(&db);
    CreateCicdDeploymentCommits.up(&manager).await.unwrap();
    AddCommitMsg.up(&manager).await.unwrap();

    let applied = migration::registry().unwrap().up(&db).await.unwrap();

    assert_eq!(applied, vec![20231020000001, 20231127142100]);
}

#[tokio::test]
async fn status_does_not_touch_the_schema() {
    let db = memory_database().await;
    let registry = migration::registry().unwrap();

    let status = registry.status(&db).await.unwrap();
    let pending = registry.pending(&db).await.unwrap();

    assert!(status.iter().all(|s| s.applied_at.is_none()));
    assert_eq!(pending.len(), 2);
    let manager = SchemaManager::new(&db);
    assert!(!manager.has_table("_migration_history").await.unwrap());
}

#[tokio::test]
async fn negative_history_version_is_reported_as_is() {
    let db = memory_database().await;
    let registry = migration::registry().unwrap();
    registry.ensure_history(&db).await.unwrap();
    MigrationHistoryEntity::insert(MigrationHistoryActive {
        script_version: Set(-1),
        script_name: Set("broken".to_owned()),
        created_at: Set(OffsetDateTime::now_utc()),
    })
    .exec(&db)
    .await
    .unwrap();

    let err = registry.history(&db).await.unwrap_err();

    assert!(matches!(err, MigrationError::CorruptHistory(-1)));
}

#[tokio::test]
async fn history_survives_reconnecting() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("lake.db").display());
    let registry = migration::registry().unwrap();

    let db = Database::connect(url.as_str()).await.unwrap();
    assert_eq!(registry.up(&db).await.unwrap().len(), 2);
    drop(db);

    let db = Database::connect(url.as_str()).await.unwrap();
    assert!(registry.pending(&db).await.unwrap().is_empty());
    assert!(registry.up(&db).await.unwrap().is_empty());
    let manager = SchemaManager::new(&db);
    assert!(manager
        .has_column("cicd_deployment_commits", "commit_msg")
        .await
        .unwrap());
}
