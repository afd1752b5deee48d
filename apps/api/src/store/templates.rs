use sqlx::PgPool;
use uuid::Uuid;

use crate::models::template::Template;

pub async fn list_active(pool: &PgPool) -> Result<Vec<Template>, sqlx::Error> {
    sqlx::query_as::<_, Template>(
        "SELECT * FROM templates WHERE is_active ORDER BY usage_count DESC, name",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_by_category(
    pool: &PgPool,
    category: &str,
) -> Result<Vec<Template>, sqlx::Error> {
    sqlx::query_as::<_, Template>(
        "SELECT * FROM templates WHERE is_active AND category = $1 ORDER BY usage_count DESC, name",
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Template>, sqlx::Error> {
    sqlx::query_as::<_, Template>("SELECT * FROM templates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn increment_usage(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE templates SET usage_count = usage_count + 1 WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
