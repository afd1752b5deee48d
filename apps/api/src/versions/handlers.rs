//! Axum route handlers for the Versions API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{JsonBody, Path};
use crate::models::portfolio::Portfolio;
use crate::models::version::{CreateVersionRequest, PortfolioVersion};
use crate::portfolios::{
    ensure_template_exists, load_owned_portfolio, map_write_conflict, newly_chosen_template,
    record_template_use,
};
use crate::state::AppState;
use crate::store;
use crate::versions::{capture, ensure_version_of, restore_fields};

/// GET /api/portfolios/:id/versions
///
/// Most recent first.
pub async fn handle_list_versions(
    State(state): State<AppState>,
    user: AuthUser,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Vec<PortfolioVersion>>, AppError> {
    load_owned_portfolio(&state.db, portfolio_id, &user).await?;
    let versions = store::versions::list_for_portfolio(&state.db, portfolio_id).await?;
    Ok(Json(versions))
}

/// POST /api/portfolios/:id/versions
pub async fn handle_create_version(
    State(state): State<AppState>,
    user: AuthUser,
    Path(portfolio_id): Path<Uuid>,
    JsonBody(req): JsonBody<CreateVersionRequest>,
) -> Result<(StatusCode, Json<PortfolioVersion>), AppError> {
    let portfolio = load_owned_portfolio(&state.db, portfolio_id, &user).await?;
    let new_version = capture(&portfolio, req, Utc::now())?;
    let version = store::versions::insert(&state.db, &new_version).await?;

    info!("Created snapshot {} of portfolio {portfolio_id}", version.id);
    Ok((StatusCode::CREATED, Json(version)))
}

/// POST /api/portfolios/:id/versions/:version_id/revert
///
/// Checks run in order: portfolio exists (404), requester owns it (403),
/// version exists and belongs to it (404), snapshot is valid and its template
/// still exists (400).
/// The live portfolio is untouched unless every check passes.
pub async fn handle_revert(
    State(state): State<AppState>,
    user: AuthUser,
    Path((portfolio_id, version_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Portfolio>, AppError> {
    let current = load_owned_portfolio(&state.db, portfolio_id, &user).await?;

    let version = ensure_version_of(
        store::versions::find_for_portfolio(&state.db, portfolio_id, version_id).await?,
        portfolio_id,
    )?;
    let fields = restore_fields(&version)?;
    let chosen = newly_chosen_template(current.template_id, fields.template_id);
    ensure_template_exists(&state.db, chosen).await?;

    let portfolio = store::portfolios::update_fields(&state.db, portfolio_id, &fields)
        .await
        .map_err(map_write_conflict)?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;
    record_template_use(&state.db, chosen).await;

    info!("Reverted portfolio {portfolio_id} to version {version_id}");
    Ok(Json(portfolio))
}
