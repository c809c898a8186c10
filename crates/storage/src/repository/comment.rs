use sqlx::SqliteConnection;

use crate::dto::comment::CommentView;
use crate::error::{Result, StorageError};
use crate::models::Comment;

pub struct CommentRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> CommentRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &mut self,
        submission_id: i64,
        user_id: i64,
        rating: i64,
        content: &str,
    ) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (submission_id, user_id, rating, content)
            VALUES (?, ?, ?, ?)
            RETURNING comment_id, submission_id, user_id, rating, content, created_at
            "#,
        )
        .bind(submission_id)
        .bind(user_id)
        .bind(rating)
        .bind(content)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(comment)
    }

    /// Comments on a submission with author names, oldest first
    pub async fn list_for_submission(&mut self, submission_id: i64) -> Result<Vec<CommentView>> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.comment_id, c.submission_id, c.user_id, u.username,
                   c.rating, c.content, c.created_at
            FROM comments c
            INNER JOIN users u ON u.user_id = c.user_id
            WHERE c.submission_id = ?
            ORDER BY c.created_at ASC, c.comment_id ASC
            "#,
        )
        .bind(submission_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(comments)
    }

    pub async fn count_for_submission(&mut self, submission_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE submission_id = ?",
        )
        .bind(submission_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(count)
    }

    pub async fn delete(&mut self, comment_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = ?")
            .bind(comment_id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
