//! Axum route handlers for the Portfolio API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{JsonBody, Path};
use crate::models::portfolio::{
    CreatePortfolioRequest, Portfolio, PortfolioFields, PublicPortfolio, UpdatePortfolioRequest,
};
use crate::portfolios::{
    ensure_published, ensure_template_exists, load_owned_portfolio, map_write_conflict,
    newly_chosen_template, record_template_use,
};
use crate::state::AppState;
use crate::store;

/// GET /api/portfolios
pub async fn handle_list_portfolios(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Portfolio>>, AppError> {
    let portfolios = store::portfolios::list_for_user(&state.db, user.id()).await?;
    Ok(Json(portfolios))
}

/// POST /api/portfolios
pub async fn handle_create_portfolio(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<CreatePortfolioRequest>,
) -> Result<(StatusCode, Json<Portfolio>), AppError> {
    let fields = PortfolioFields::from(req);
    fields.validate()?;

    ensure_template_exists(&state.db, fields.template_id).await?;

    let portfolio = store::portfolios::insert(&state.db, user.id(), &fields)
        .await
        .map_err(map_write_conflict)?;
    record_template_use(&state.db, portfolio.template_id).await;

    info!("Created portfolio {} for user {}", portfolio.id, user.id());
    Ok((StatusCode::CREATED, Json(portfolio)))
}

/// GET /api/portfolios/:id
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Portfolio>, AppError> {
    Ok(Json(load_owned_portfolio(&state.db, id, &user).await?))
}

/// PATCH /api/portfolios/:id
pub async fn handle_update_portfolio(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(patch): JsonBody<UpdatePortfolioRequest>,
) -> Result<Json<Portfolio>, AppError> {
    let current = load_owned_portfolio(&state.db, id, &user).await?;
    let fields = patch.apply(current.fields());
    fields.validate()?;

    let chosen = newly_chosen_template(current.template_id, fields.template_id);
    ensure_template_exists(&state.db, chosen).await?;

    let updated = store::portfolios::update_fields(&state.db, id, &fields)
        .await
        .map_err(map_write_conflict)?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;
    record_template_use(&state.db, chosen).await;
    Ok(Json(updated))
}

/// DELETE /api/portfolios/:id
pub async fn handle_delete_portfolio(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    load_owned_portfolio(&state.db, id, &user).await?;
    store::portfolios::delete(&state.db, id).await?;
    info!("Deleted portfolio {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/public/portfolios/:slug
///
/// No authentication. Counts a view and returns the portfolio with its projects.
pub async fn handle_public_portfolio(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicPortfolio>, AppError> {
    let portfolio = ensure_published(store::portfolios::find_by_slug(&state.db, &slug).await?)?;

    store::portfolios::increment_views(&state.db, portfolio.id).await?;
    let projects = store::projects::list_for_portfolio(&state.db, portfolio.id).await?;

    Ok(Json(PublicPortfolio {
        portfolio,
        projects,
    }))
}
