use sea_orm_migration::prelude::SchemaManager;

use crate::schema::{auto_migrate, FieldKind, FieldShape, TableShape};
use crate::{MigrationError, MigrationScript};

pub struct Migration;

fn cicd_deployment_commits() -> TableShape {
    TableShape::new(
        "cicd_deployment_commits",
        vec![FieldShape::nullable(
            "commit_msg",
            FieldKind::String { len: None },
        )],
    )
}

#[async_trait::async_trait]
impl MigrationScript for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), MigrationError> {
        auto_migrate(manager, &[cicd_deployment_commits()]).await
    }

    fn version(&self) -> u64 {
        20231127142100
    }

    fn name(&self) -> &str {
        "add commit_msg to cicd_deployment_commit table"
    }
}
