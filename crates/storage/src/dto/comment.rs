use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    /// Checked against `MIN_RATING..=MAX_RATING` by the comment service
    pub rating: i64,

    #[validate(length(min = 1, max = 2000, message = "Comment must be between 1 and 2000 characters"))]
    pub content: String,
}

/// Comment joined with its author's username
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CommentView {
    pub comment_id: i64,
    pub submission_id: i64,
    pub user_id: i64,
    pub username: String,
    pub rating: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
}
