use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "feedbacks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    pub kind: Option<String>,
    pub department: Option<String>,
    #[sea_orm(column_name = "target_role")]
    pub target_role: Option<String>,
    #[sea_orm(column_name = "target_name")]
    pub target_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_name = "submitter_name")]
    pub submitter_name: Option<String>,
    #[sea_orm(column_name = "submitter_phone")]
    pub submitter_phone: Option<String>,
    #[sea_orm(column_name = "ip_address")]
    pub ip_address: Option<String>,
    pub status: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
