use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Review lifecycle of a submission.
///
/// Every submission starts out `Pending`. Only an administrator review moves
/// it, and a reviewed submission may be reviewed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uploaded algorithm.
///
/// `source_text` is never rewritten after insert, and `score` only changes
/// through a global rescoring.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Submission {
    pub submission_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub category: String,
    pub version: i64,
    pub source_text: String,
    pub score: f64,
    pub status: SubmissionStatus,
    pub created_at: chrono::NaiveDateTime,
}
