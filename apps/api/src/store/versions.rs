use sqlx::PgPool;
use uuid::Uuid;

use crate::models::version::{NewVersion, PortfolioVersion};

/// Append-only: versions are inserted once and never updated.
pub async fn insert(pool: &PgPool, version: &NewVersion) -> Result<PortfolioVersion, sqlx::Error> {
    sqlx::query_as::<_, PortfolioVersion>(
        r#"
        INSERT INTO portfolio_versions
            (portfolio_id, title, summary, name, description, slug,
             template_id, is_published, customization)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(version.portfolio_id)
    .bind(&version.title)
    .bind(&version.summary)
    .bind(&version.name)
    .bind(&version.description)
    .bind(&version.slug)
    .bind(version.template_id)
    .bind(version.is_published)
    .bind(&version.customization)
    .fetch_one(pool)
    .await
}

/// Most recent first; `id` breaks ties between versions created in the same instant.
pub async fn list_for_portfolio(
    pool: &PgPool,
    portfolio_id: Uuid,
) -> Result<Vec<PortfolioVersion>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioVersion>(
        r#"
        SELECT * FROM portfolio_versions
        WHERE portfolio_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(portfolio_id)
    .fetch_all(pool)
    .await
}

pub async fn find_for_portfolio(
    pool: &PgPool,
    portfolio_id: Uuid,
    version_id: Uuid,
) -> Result<Option<PortfolioVersion>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioVersion>(
        "SELECT * FROM portfolio_versions WHERE id = $1 AND portfolio_id = $2",
    )
    .bind(version_id)
    .bind(portfolio_id)
    .fetch_optional(pool)
    .await
}
