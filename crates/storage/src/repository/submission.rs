use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::dto::submission::{
    SearchFilter, SubmissionDetail, SubmissionSummary, UploadSubmissionRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{Submission, SubmissionStatus};

const SUMMARY_COLUMNS: &str = r#"
    s.submission_id, s.owner_id, u.username AS owner_name, s.title, s.description,
    s.tags, s.category, s.score, s.status, s.created_at
"#;

pub struct SubmissionRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SubmissionRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a new pending submission with its initial score
    pub async fn create(
        &mut self,
        owner_id: i64,
        req: &UploadSubmissionRequest,
        score: f64,
    ) -> Result<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (owner_id, title, description, tags, category, source_text, score, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING submission_id, owner_id, title, description, tags, category,
                      version, source_text, score, status, created_at
            "#,
        )
        .bind(owner_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.tags)
        .bind(&req.category)
        .bind(&req.source_text)
        .bind(score)
        .bind(SubmissionStatus::Pending)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(submission)
    }

    pub async fn find_by_id(&mut self, submission_id: i64) -> Result<Submission> {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT submission_id, owner_id, title, description, tags, category,
                   version, source_text, score, status, created_at
            FROM submissions
            WHERE submission_id = ?
            "#,
        )
        .bind(submission_id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Submission with owner name and comment/download aggregates
    pub async fn find_detail(&mut self, submission_id: i64) -> Result<SubmissionDetail> {
        sqlx::query_as::<_, SubmissionDetail>(
            r#"
            SELECT
                s.submission_id,
                s.owner_id,
                u.username AS owner_name,
                s.title,
                s.description,
                s.tags,
                s.category,
                s.version,
                s.source_text,
                s.score,
                s.status,
                s.created_at,
                (SELECT COUNT(*) FROM comments c WHERE c.submission_id = s.submission_id) AS comment_count,
                (SELECT AVG(c.rating) FROM comments c WHERE c.submission_id = s.submission_id) AS average_rating,
                (SELECT COUNT(*) FROM download_logs d WHERE d.submission_id = s.submission_id) AS download_count
            FROM submissions s
            INNER JOIN users u ON u.user_id = s.owner_id
            WHERE s.submission_id = ?
            "#,
        )
        .bind(submission_id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Approved submissions matching every filter that is set, best score first
    pub async fn search_approved(&mut self, filter: &SearchFilter) -> Result<Vec<SubmissionSummary>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT ");
        query.push(SUMMARY_COLUMNS);
        query.push(
            r#"
            FROM submissions s
            INNER JOIN users u ON u.user_id = s.owner_id
            WHERE s.status = "#,
        );
        query.push_bind(SubmissionStatus::Approved);

        if let Some(text) = non_blank(&filter.query) {
            query.push(" AND s.title LIKE ");
            query.push_bind(format!("%{}%", text));
        }

        if let Some(tags) = non_blank(&filter.tags) {
            query.push(" AND s.tags LIKE ");
            query.push_bind(format!("%{}%", tags));
        }

        if let Some(category) = non_blank(&filter.category) {
            query.push(" AND s.category = ");
            query.push_bind(category.to_string());
        }

        query.push(" ORDER BY s.score DESC, s.submission_id ASC");

        let submissions = query
            .build_query_as::<SubmissionSummary>()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(submissions)
    }

    pub async fn list_by_status(&mut self, status: SubmissionStatus) -> Result<Vec<SubmissionSummary>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM submissions s
            INNER JOIN users u ON u.user_id = s.owner_id
            WHERE s.status = ?
            ORDER BY s.created_at ASC, s.submission_id ASC
            "#,
            SUMMARY_COLUMNS
        );

        let submissions = sqlx::query_as::<_, SubmissionSummary>(&sql)
            .bind(status)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(submissions)
    }

    /// `(submission_id, source_text)` for every stored submission, any status
    pub async fn list_sources(&mut self) -> Result<Vec<(i64, String)>> {
        let sources = sqlx::query_as::<_, (i64, String)>(
            "SELECT submission_id, source_text FROM submissions ORDER BY submission_id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(sources)
    }

    pub async fn update_score(&mut self, submission_id: i64, score: f64) -> Result<()> {
        let result = sqlx::query("UPDATE submissions SET score = ? WHERE submission_id = ?")
            .bind(score)
            .bind(submission_id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn update_status(
        &mut self,
        submission_id: i64,
        status: SubmissionStatus,
    ) -> Result<Submission> {
        sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET status = ?
            WHERE submission_id = ?
            RETURNING submission_id, owner_id, title, description, tags, category,
                      version, source_text, score, status, created_at
            "#,
        )
        .bind(status)
        .bind(submission_id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Delete a submission; comments and download records go with it
    pub async fn delete(&mut self, submission_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM submissions WHERE submission_id = ?")
            .bind(submission_id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
