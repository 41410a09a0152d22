use sea_orm_migration::prelude::*;

use crate::{MigrationError, MigrationScript};

pub struct Migration;

#[derive(Iden)]
enum CicdDeploymentCommits {
    Table,
    Id,
    CicdScopeId,
    CicdDeploymentId,
    Name,
    Result,
    Status,
    OriginalStatus,
    OriginalResult,
    Environment,
    OriginalEnvironment,
    CreatedDate,
    StartedDate,
    FinishedDate,
    DurationSec,
    CommitSha,
    RefName,
    RepoId,
    RepoUrl,
    PrevSuccessDeploymentCommitId,
}

#[async_trait::async_trait]
impl MigrationScript for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), MigrationError> {
        manager
            .create_table(
                Table::create()
                    .table(CicdDeploymentCommits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CicdDeploymentCommits::Id)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CicdDeploymentCommits::CicdScopeId).string_len(255))
                    .col(ColumnDef::new(CicdDeploymentCommits::CicdDeploymentId).string_len(255))
                    .col(ColumnDef::new(CicdDeploymentCommits::Name).string_len(255))
                    .col(ColumnDef::new(CicdDeploymentCommits::Result).string_len(100))
                    .col(ColumnDef::new(CicdDeploymentCommits::Status).string_len(100))
                    .col(ColumnDef::new(CicdDeploymentCommits::OriginalStatus).string_len(100))
                    .col(ColumnDef::new(CicdDeploymentCommits::OriginalResult).string_len(100))
                    .col(ColumnDef::new(CicdDeploymentCommits::Environment).string_len(255))
                    .col(ColumnDef::new(CicdDeploymentCommits::OriginalEnvironment).string_len(255))
                    .col(ColumnDef::new(CicdDeploymentCommits::CreatedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(CicdDeploymentCommits::StartedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(CicdDeploymentCommits::FinishedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(CicdDeploymentCommits::DurationSec).double())
                    .col(ColumnDef::new(CicdDeploymentCommits::CommitSha).string_len(255))
                    .col(ColumnDef::new(CicdDeploymentCommits::RefName).string_len(255))
                    .col(ColumnDef::new(CicdDeploymentCommits::RepoId).string_len(255))
                    .col(ColumnDef::new(CicdDeploymentCommits::RepoUrl).string_len(255))
                    .col(
                        ColumnDef::new(CicdDeploymentCommits::PrevSuccessDeploymentCommitId)
                            .string_len(255),
                    )
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    fn version(&self) -> u64 {
        20231020000001
    }

    fn name(&self) -> &str {
        "create cicd_deployment_commits table"
    }
}
