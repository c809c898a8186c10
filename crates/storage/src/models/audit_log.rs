use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::SubmissionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReviewAction {
    Approved,
    Rejected,
    Deleted,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Deleted => "deleted",
        }
    }

    /// Status a submission ends up in after this action, if it survives it.
    pub fn resulting_status(&self) -> Option<SubmissionStatus> {
        match self {
            Self::Approved => Some(SubmissionStatus::Approved),
            Self::Rejected => Some(SubmissionStatus::Rejected),
            Self::Deleted => None,
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only log entry of an administrative action against a submission.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReviewAuditRecord {
    pub audit_id: i64,
    pub actor_id: i64,
    pub actor_name: String,
    pub action: ReviewAction,
    pub submission_id: i64,
    pub created_at: chrono::NaiveDateTime,
}
