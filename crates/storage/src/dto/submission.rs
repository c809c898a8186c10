use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::SubmissionStatus;

/// Request payload for uploading an algorithm
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UploadSubmissionRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters"
    ))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub tags: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub category: String,

    #[validate(length(min = 1, message = "Source text is required"))]
    pub source_text: String,
}

/// Optional filters for browsing approved submissions
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchFilter {
    /// Case-insensitive substring of the title
    pub query: Option<String>,
    /// Case-insensitive substring of the tag list
    pub tags: Option<String>,
    /// Exact category
    pub category: Option<String>,
}

/// Submission joined with its owner, without the source text
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubmissionSummary {
    pub submission_id: i64,
    pub owner_id: i64,
    pub owner_name: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub category: String,
    pub score: f64,
    pub status: SubmissionStatus,
    pub created_at: NaiveDateTime,
}

/// Full submission view with comment and download aggregates
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubmissionDetail {
    pub submission_id: i64,
    pub owner_id: i64,
    pub owner_name: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub category: String,
    pub version: i64,
    pub source_text: String,
    pub score: f64,
    pub status: SubmissionStatus,
    pub created_at: NaiveDateTime,
    pub comment_count: i64,
    pub average_rating: Option<f64>,
    pub download_count: i64,
}
