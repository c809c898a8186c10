use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Platform-wide counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_submissions: i64,
    pub pending_submissions: i64,
    pub approved_submissions: i64,
    pub rejected_submissions: i64,
    pub total_comments: i64,
    pub total_downloads: i64,
}
