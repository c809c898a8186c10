use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Comment {
    pub comment_id: i64,
    pub submission_id: i64,
    pub user_id: i64,
    pub rating: i64,
    pub content: String,
    pub created_at: chrono::NaiveDateTime,
}
