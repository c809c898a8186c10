use sqlx::SqliteConnection;

use crate::error::Result;
use crate::models::{Session, User};

pub struct SessionRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SessionRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&mut self, token: &str, user_id: i64) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id)
            VALUES (?, ?)
            RETURNING token, user_id, created_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(session)
    }

    /// User owning `token`, if the session exists
    pub async fn find_user(&mut self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.username, u.password_hash, u.role, u.created_at
            FROM sessions s
            INNER JOIN users u ON u.user_id = s.user_id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    pub async fn delete(&mut self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
