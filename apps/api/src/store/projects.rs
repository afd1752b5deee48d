use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::{Project, ProjectFields};

pub async fn list_for_portfolio(
    pool: &PgPool,
    portfolio_id: Uuid,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE portfolio_id = $1 ORDER BY display_order, created_at",
    )
    .bind(portfolio_id)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(
    pool: &PgPool,
    portfolio_id: Uuid,
    fields: &ProjectFields,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects
            (portfolio_id, title, description, image_url, project_url, tags, display_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(portfolio_id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.image_url)
    .bind(&fields.project_url)
    .bind(&fields.tags)
    .bind(fields.display_order)
    .fetch_one(pool)
    .await
}

pub async fn update_fields(
    pool: &PgPool,
    id: Uuid,
    fields: &ProjectFields,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET title = $2,
            description = $3,
            image_url = $4,
            project_url = $5,
            tags = $6,
            display_order = $7,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.image_url)
    .bind(&fields.project_url)
    .bind(&fields.tags)
    .bind(fields.display_order)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
