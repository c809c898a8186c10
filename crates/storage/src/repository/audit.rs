use sqlx::SqliteConnection;

use crate::error::Result;
use crate::models::{ReviewAction, ReviewAuditRecord};

pub struct AuditRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> AuditRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn append(
        &mut self,
        actor_id: i64,
        action: ReviewAction,
        submission_id: i64,
    ) -> Result<i64> {
        let audit_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO review_audit_log (actor_id, action, submission_id)
            VALUES (?, ?, ?)
            RETURNING audit_id
            "#,
        )
        .bind(actor_id)
        .bind(action)
        .bind(submission_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(audit_id)
    }

    /// Review log entries, newest first, optionally for a single submission
    pub async fn list(&mut self, submission_id: Option<i64>) -> Result<Vec<ReviewAuditRecord>> {
        let records = sqlx::query_as::<_, ReviewAuditRecord>(
            r#"
            SELECT a.audit_id, a.actor_id, u.username AS actor_name,
                   a.action, a.submission_id, a.created_at
            FROM review_audit_log a
            INNER JOIN users u ON u.user_id = a.actor_id
            WHERE ? IS NULL OR a.submission_id = ?
            ORDER BY a.created_at DESC, a.audit_id DESC
            "#,
        )
        .bind(submission_id)
        .bind(submission_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records)
    }
}
