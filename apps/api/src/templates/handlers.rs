//! Read-only template catalog. No authentication required.

use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{Path, Query};
use crate::models::template::Template;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    pub category: Option<String>,
}

/// GET /api/templates[?category=]
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<Vec<Template>>, AppError> {
    let templates = match query.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => {
            store::templates::list_by_category(&state.db, category).await?
        }
        _ => store::templates::list_active(&state.db).await?,
    };
    Ok(Json(templates))
}

/// GET /api/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Template>, AppError> {
    let template = store::templates::find(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))?;
    Ok(Json(template))
}
