use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::portfolio::{Portfolio, PortfolioFields};

pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        "SELECT * FROM portfolios WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    fields: &PortfolioFields,
) -> Result<Portfolio, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        r#"
        INSERT INTO portfolios
            (user_id, name, description, slug, template_id, is_published, customization)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(&fields.slug)
    .bind(fields.template_id)
    .bind(fields.is_published)
    .bind(Json(&fields.customization))
    .fetch_one(pool)
    .await
}

/// Overwrites every editable field. Returns `None` if the row no longer exists.
pub async fn update_fields(
    pool: &PgPool,
    id: Uuid,
    fields: &PortfolioFields,
) -> Result<Option<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        r#"
        UPDATE portfolios
        SET name = $2,
            description = $3,
            slug = $4,
            template_id = $5,
            is_published = $6,
            customization = $7,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.description)
    .bind(&fields.slug)
    .bind(fields.template_id)
    .bind(fields.is_published)
    .bind(Json(&fields.customization))
    .fetch_optional(pool)
    .await
}

/// Projects and versions go with it (`ON DELETE CASCADE`).
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn increment_views(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE portfolios SET view_count = view_count + 1 WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
