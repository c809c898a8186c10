use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: chrono::NaiveDateTime,
}
