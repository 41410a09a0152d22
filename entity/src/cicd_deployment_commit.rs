use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One commit deployed by a CI/CD deployment, per repository.
#[derive(Serialize, Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cicd_deployment_commits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub cicd_scope_id: Option<String>,
    pub cicd_deployment_id: Option<String>,
    pub name: Option<String>,
    pub result: Option<String>,
    pub status: Option<String>,
    pub original_status: Option<String>,
    pub original_result: Option<String>,
    pub environment: Option<String>,
    pub original_environment: Option<String>,

    pub created_date: Option<TimeDateTimeWithTimeZone>,
    pub started_date: Option<TimeDateTimeWithTimeZone>,
    pub finished_date: Option<TimeDateTimeWithTimeZone>,
    pub duration_sec: Option<f64>,

    pub commit_sha: Option<String>,
    pub ref_name: Option<String>,
    pub repo_id: Option<String>,
    pub repo_url: Option<String>,
    pub prev_success_deployment_commit_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub commit_msg: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
