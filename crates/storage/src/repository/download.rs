use sqlx::SqliteConnection;

use crate::error::Result;
use crate::models::DownloadRecord;

pub struct DownloadRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> DownloadRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Record a download; `user_id` is `None` for anonymous downloads
    pub async fn record(&mut self, submission_id: i64, user_id: Option<i64>) -> Result<DownloadRecord> {
        let record = sqlx::query_as::<_, DownloadRecord>(
            r#"
            INSERT INTO download_logs (submission_id, user_id)
            VALUES (?, ?)
            RETURNING download_id, submission_id, user_id, downloaded_at
            "#,
        )
        .bind(submission_id)
        .bind(user_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(record)
    }

    pub async fn count_for_submission(&mut self, submission_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM download_logs WHERE submission_id = ?",
        )
        .bind(submission_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(count)
    }
}
