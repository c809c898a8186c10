use sqlx::SqlitePool;

use crate::dto::stats::PlatformStats;
use crate::error::Result;
use crate::repository::stats::StatsRepository;

pub async fn get_stats(pool: &SqlitePool) -> Result<PlatformStats> {
    let mut conn = pool.acquire().await?;
    StatsRepository::new(&mut conn).platform_stats().await
}
