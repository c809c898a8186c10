use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A single download event. `user_id` is `None` for anonymous downloads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DownloadRecord {
    pub download_id: i64,
    pub submission_id: i64,
    pub user_id: Option<i64>,
    pub downloaded_at: chrono::NaiveDateTime,
}
