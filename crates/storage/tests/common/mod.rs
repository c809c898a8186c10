#![allow(dead_code)]

use storage::Database;
use storage::dto::account::RegisterRequest;
use storage::dto::submission::UploadSubmissionRequest;
use storage::models::{Submission, User};
use storage::services::{accounts, submissions};

pub const EXAMPLE_SOURCE: &str = "def a():\n    pass\n# hi\n";

pub async fn setup() -> Database {
    let db = Database::new("sqlite::memory:")
        .await
        .expect("in-memory database");
    db.run_migrations().await.expect("migrations apply");
    db
}

pub async fn admin(db: &Database) -> User {
    accounts::ensure_admin(db.pool(), "admin", "admin123")
        .await
        .expect("admin account")
}

pub async fn user(db: &Database, username: &str) -> User {
    accounts::register(
        db.pool(),
        &RegisterRequest {
            username: username.to_string(),
            password: "password1".to_string(),
        },
    )
    .await
    .expect("user account")
}

pub fn upload_request(title: &str, source_text: &str) -> UploadSubmissionRequest {
    UploadSubmissionRequest {
        title: title.to_string(),
        description: format!("{} description", title),
        tags: "sorting,array".to_string(),
        category: "sorting".to_string(),
        source_text: source_text.to_string(),
    }
}

pub async fn upload(db: &Database, owner: &User, title: &str, source_text: &str) -> Submission {
    submissions::upload(db.pool(), owner, &upload_request(title, source_text))
        .await
        .expect("upload succeeds")
}

/// Store a submission whose source no longer parses, bypassing upload checks
pub async fn insert_unparsable(db: &Database, owner: &User) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO submissions (owner_id, title, source_text, score)
        VALUES (?, 'legacy', 'def broken(:', 0.0)
        RETURNING submission_id
        "#,
    )
    .bind(owner.user_id)
    .fetch_one(db.pool())
    .await
    .expect("raw insert")
}
