pub use sea_orm_migration::prelude::SchemaManager;

mod error;
mod registry;
mod schema;
mod script;

mod m20231020_000001_cicd_deployment_commits;
mod m20231127_142100_add_commit_msg;

pub use error::MigrationError;
pub use registry::{Registry, ScriptStatus};
pub use schema::{auto_migrate, FieldKind, FieldShape, TableShape};
pub use script::MigrationScript;

pub use m20231020_000001_cicd_deployment_commits::Migration as CreateCicdDeploymentCommits;
pub use m20231127_142100_add_commit_msg::Migration as AddCommitMsg;

/// Every migration script the application ships, registered in one place.
pub fn registry() -> Result<Registry, MigrationError> {
    let mut registry = Registry::new();
    registry
        .register(CreateCicdDeploymentCommits)?
        .register(AddCommitMsg)?;
    Ok(registry)
}
