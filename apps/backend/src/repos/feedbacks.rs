//! Feedback repository functions (generic over ConnectionTrait).
//!
//! Every call borrows a pooled connection for the duration of one statement;
//! the pool gets it back when the statement future completes or is dropped.

use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::entities::feedbacks::{self, Column, Entity as Feedbacks};

/// Status given to every new record.
pub const STATUS_PENDING: &str = "pending";

/// A stored feedback record, serialized with the table's column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub department: Option<String>,
    pub target_role: Option<String>,
    pub target_name: Option<String>,
    pub description: Option<String>,
    pub submitter_name: Option<String>,
    pub submitter_phone: Option<String>,
    pub ip_address: Option<String>,
    pub status: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated, already-escaped values for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub kind: String,
    pub department: String,
    pub target_role: String,
    pub target_name: String,
    pub description: String,
    pub submitter_name: String,
    pub submitter_phone: String,
    pub ip_address: String,
}

/// Insert a record with status `pending`; returns the generated id.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    new: NewFeedback,
    created_at: OffsetDateTime,
) -> Result<i32, DbErr> {
    let row = feedbacks::ActiveModel {
        id: NotSet,
        kind: Set(Some(new.kind)),
        department: Set(Some(new.department)),
        target_role: Set(Some(new.target_role)),
        target_name: Set(Some(new.target_name)),
        description: Set(Some(new.description)),
        submitter_name: Set(Some(new.submitter_name)),
        submitter_phone: Set(Some(new.submitter_phone)),
        ip_address: Set(Some(new.ip_address)),
        status: Set(Some(STATUS_PENDING.to_string())),
        created_at: Set(created_at),
    };

    let result = Feedbacks::insert(row).exec(conn).await?;
    Ok(result.last_insert_id)
}

/// All records, newest first (ties broken by id, newest first).
pub async fn list_newest_first<C: ConnectionTrait>(conn: &C) -> Result<Vec<Feedback>, DbErr> {
    let rows = Feedbacks::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Feedback::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Feedback>, DbErr> {
    Ok(Feedbacks::find_by_id(id).one(conn).await?.map(Feedback::from))
}

/// Delete by id; returns the number of rows removed (0 when absent).
pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, DbErr> {
    let result = Feedbacks::delete_many()
        .filter(Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    Feedbacks::find().count(conn).await
}

impl From<feedbacks::Model> for Feedback {
    fn from(model: feedbacks::Model) -> Self {
        Self {
            id: model.id,
            kind: model.kind,
            department: model.department,
            target_role: model.target_role,
            target_name: model.target_name,
            description: model.description,
            submitter_name: model.submitter_name,
            submitter_phone: model.submitter_phone,
            ip_address: model.ip_address,
            status: model.status,
            created_at: model.created_at,
        }
    }
}
