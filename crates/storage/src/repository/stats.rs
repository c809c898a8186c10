use sqlx::SqliteConnection;

use crate::dto::stats::PlatformStats;
use crate::error::Result;

pub struct StatsRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> StatsRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn platform_stats(&mut self) -> Result<PlatformStats> {
        let stats = sqlx::query_as::<_, PlatformStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM submissions) AS total_submissions,
                (SELECT COUNT(*) FROM submissions WHERE status = 'pending') AS pending_submissions,
                (SELECT COUNT(*) FROM submissions WHERE status = 'approved') AS approved_submissions,
                (SELECT COUNT(*) FROM submissions WHERE status = 'rejected') AS rejected_submissions,
                (SELECT COUNT(*) FROM comments) AS total_comments,
                (SELECT COUNT(*) FROM download_logs) AS total_downloads
            "#,
        )
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(stats)
    }
}
