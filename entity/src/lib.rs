mod cicd_deployment_commit;
mod migration_history;

pub use cicd_deployment_commit::ActiveModel as CicdDeploymentCommitActive;
pub use cicd_deployment_commit::Column as CicdDeploymentCommitColumn;
pub use cicd_deployment_commit::Entity as CicdDeploymentCommitEntity;
pub use cicd_deployment_commit::Model as CicdDeploymentCommit;
pub use migration_history::ActiveModel as MigrationHistoryActive;
pub use migration_history::Column as MigrationHistoryColumn;
pub use migration_history::Entity as MigrationHistoryEntity;
pub use migration_history::Model as MigrationHistory;
