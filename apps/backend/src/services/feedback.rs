//! Feedback submission and administration.

use sea_orm::{ConnectionTrait, DbErr};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::AppError;
use crate::repos::feedbacks::{self, Feedback, NewFeedback};
use crate::services::sanitize::escape_html;

/// Column sizes of the `feedbacks` table, in characters.
pub const MAX_TYPE_LEN: usize = 50;
pub const MAX_DEPARTMENT_LEN: usize = 100;
pub const MAX_TARGET_ROLE_LEN: usize = 100;
pub const MAX_TARGET_NAME_LEN: usize = 100;
pub const MAX_SUBMITTER_NAME_LEN: usize = 100;
pub const MAX_SUBMITTER_PHONE_LEN: usize = 50;
pub const MAX_IP_LEN: usize = 50;

/// Submission body as sent by the public form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedback {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub department: Option<String>,
    pub target_role: Option<String>,
    pub target_name: Option<String>,
    pub description: Option<String>,
    pub submitter_name: Option<String>,
    pub submitter_phone: Option<String>,
}

impl NewFeedback {
    /// Check required fields, escape every text field and enforce column sizes.
    pub fn validate(input: SubmitFeedback, ip_address: &str) -> Result<Self, AppError> {
        let kind = required(input.kind)?;
        let department = required(input.department)?;
        let description = required(input.description)?;

        let new = Self {
            kind: escape_html(&kind),
            department: escape_html(&department),
            target_role: optional(input.target_role),
            target_name: optional(input.target_name),
            description: escape_html(&description),
            submitter_name: optional(input.submitter_name),
            submitter_phone: optional(input.submitter_phone),
            ip_address: ip_address.to_string(),
        };

        let limits = [
            (&new.kind, MAX_TYPE_LEN),
            (&new.department, MAX_DEPARTMENT_LEN),
            (&new.target_role, MAX_TARGET_ROLE_LEN),
            (&new.target_name, MAX_TARGET_NAME_LEN),
            (&new.submitter_name, MAX_SUBMITTER_NAME_LEN),
            (&new.submitter_phone, MAX_SUBMITTER_PHONE_LEN),
            (&new.ip_address, MAX_IP_LEN),
        ];
        if limits
            .iter()
            .any(|(value, max)| value.chars().count() > *max)
        {
            return Err(AppError::field_too_long());
        }

        Ok(new)
    }
}

fn required(value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::missing_fields()),
    }
}

fn optional(value: Option<String>) -> String {
    value.map(|v| escape_html(&v)).unwrap_or_default()
}

/// Current UTC time truncated to whole seconds.
pub fn submission_time() -> Result<OffsetDateTime, AppError> {
    OffsetDateTime::now_utc()
        .replace_nanosecond(0)
        .map_err(|e| AppError::internal(format!("failed to truncate timestamp: {e}")))
}

/// Validate and store one submission; returns the new record id.
pub async fn submit_feedback<C: ConnectionTrait>(
    conn: &C,
    input: SubmitFeedback,
    ip_address: &str,
    created_at: OffsetDateTime,
) -> Result<i32, AppError> {
    let new = NewFeedback::validate(input, ip_address)?;
    let id = feedbacks::insert(conn, new, created_at)
        .await
        .map_err(|e| store_error("Submission failed", e))?;
    info!(feedback_id = id, "feedback_submitted");
    Ok(id)
}

pub async fn list_feedback<C: ConnectionTrait>(conn: &C) -> Result<Vec<Feedback>, AppError> {
    let rows = feedbacks::list_newest_first(conn)
        .await
        .map_err(|e| store_error("Query failed", e))?;
    debug!(rows = rows.len(), "feedback_listed");
    Ok(rows)
}

/// Delete by id. Absent ids are not an error.
pub async fn delete_feedback<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, AppError> {
    let removed = feedbacks::delete_by_id(conn, id)
        .await
        .map_err(|e| store_error("Delete failed", e))?;
    info!(feedback_id = id, removed, "feedback_deleted");
    Ok(removed)
}

pub async fn count_feedback<C: ConnectionTrait>(conn: &C) -> Result<u64, AppError> {
    feedbacks::count(conn).await.map_err(AppError::from)
}

fn store_error(context: &str, e: DbErr) -> AppError {
    match AppError::from(e) {
        AppError::Db { detail } => AppError::db(format!("{context}: {detail}")),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::errors::ErrorCode;
    use crate::test_support::db::migrated_memory_db;

    fn complete() -> SubmitFeedback {
        SubmitFeedback {
            kind: Some("complaint".into()),
            department: Some("Radiology".into()),
            target_role: Some("doctor".into()),
            target_name: None,
            description: Some("Waited three hours".into()),
            submitter_name: None,
            submitter_phone: Some("555-0101".into()),
        }
    }

    #[test]
    fn whitespace_only_required_fields_are_missing() {
        for blank in ["", "   ", "\t\n"] {
            let input = SubmitFeedback {
                description: Some(blank.into()),
                ..complete()
            };
            let err = NewFeedback::validate(input, "203.0.113.1").unwrap_err();
            assert_eq!(err.code(), ErrorCode::MissingFields);
        }

        let input = SubmitFeedback {
            kind: None,
            ..complete()
        };
        assert_eq!(
            NewFeedback::validate(input, "203.0.113.1").unwrap_err().code(),
            ErrorCode::MissingFields
        );
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let new = NewFeedback::validate(complete(), "203.0.113.1").unwrap();
        assert_eq!(new.target_name, "");
        assert_eq!(new.submitter_name, "");
        assert_eq!(new.submitter_phone, "555-0101");
    }

    #[test]
    fn every_text_field_is_escaped() {
        let input = SubmitFeedback {
            kind: Some("<b>".into()),
            department: Some("A&E".into()),
            target_role: Some("\"nurse\"".into()),
            target_name: Some("O'Brien".into()),
            description: Some("<script>alert(1)</script>".into()),
            submitter_name: Some("<i>me</i>".into()),
            submitter_phone: Some("<1>".into()),
        };
        let new = NewFeedback::validate(input, "").unwrap();
        assert_eq!(new.kind, "&lt;b&gt;");
        assert_eq!(new.department, "A&amp;E");
        assert_eq!(new.target_role, "&quot;nurse&quot;");
        assert_eq!(new.target_name, "O&#39;Brien");
        assert_eq!(new.description, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(new.submitter_name, "&lt;i&gt;me&lt;/i&gt;");
        assert_eq!(new.submitter_phone, "&lt;1&gt;");
    }

    #[test]
    fn escaped_length_is_checked_against_columns() {
        // each '<' escapes to 4 chars: 13 overflow the 50-char type column, 12 fit
        let input = SubmitFeedback {
            kind: Some("<".repeat(13)),
            ..complete()
        };
        assert_eq!(
            NewFeedback::validate(input, "").unwrap_err().code(),
            ErrorCode::FieldTooLong
        );

        let input = SubmitFeedback {
            kind: Some("<".repeat(12)),
            ..complete()
        };
        assert!(NewFeedback::validate(input, "").is_ok());
    }

    #[test]
    fn description_has_no_length_cap() {
        let input = SubmitFeedback {
            description: Some("x".repeat(20_000)),
            ..complete()
        };
        assert!(NewFeedback::validate(input, "").is_ok());
    }

    #[test]
    fn camel_case_body_deserializes() {
        let body = serde_json::json!({
            "type": "praise",
            "department": "ER",
            "targetRole": "nurse",
            "targetName": "Kim",
            "description": "great",
            "submitterName": "Lee",
            "submitterPhone": "1"
        });
        let input: SubmitFeedback = serde_json::from_value(body).unwrap();
        assert_eq!(input.kind.as_deref(), Some("praise"));
        assert_eq!(input.target_role.as_deref(), Some("nurse"));
        assert_eq!(input.submitter_phone.as_deref(), Some("1"));
    }

    #[test]
    fn submission_time_has_whole_seconds() {
        assert_eq!(submission_time().unwrap().nanosecond(), 0);
    }

    #[tokio::test]
    async fn submit_list_delete_flow() {
        let db = migrated_memory_db().await;
        let id = submit_feedback(&db, complete(), "198.51.100.4", datetime!(2026-01-05 10:00:00 UTC))
            .await
            .unwrap();

        let rows = list_feedback(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].ip_address.as_deref(), Some("198.51.100.4"));
        assert_eq!(count_feedback(&db).await.unwrap(), 1);

        assert_eq!(delete_feedback(&db, id).await.unwrap(), 1);
        assert_eq!(delete_feedback(&db, id).await.unwrap(), 0);
        assert_eq!(count_feedback(&db).await.unwrap(), 0);
    }
}
