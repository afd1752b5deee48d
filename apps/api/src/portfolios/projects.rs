//! Axum route handlers for projects. A project is only reachable through a
//! portfolio the requester owns.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{JsonBody, Path};
use crate::models::project::{CreateProjectRequest, Project, ProjectFields, UpdateProjectRequest};
use crate::portfolios::{ensure_owner, load_owned_portfolio};
use crate::state::AppState;
use crate::store;

/// GET /api/portfolios/:id/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    user: AuthUser,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Vec<Project>>, AppError> {
    load_owned_portfolio(&state.db, portfolio_id, &user).await?;
    let projects = store::projects::list_for_portfolio(&state.db, portfolio_id).await?;
    Ok(Json(projects))
}

/// POST /api/portfolios/:id/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(portfolio_id): Path<Uuid>,
    JsonBody(req): JsonBody<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    load_owned_portfolio(&state.db, portfolio_id, &user).await?;

    let fields = ProjectFields::from(req);
    fields.validate()?;

    let project = store::projects::insert(&state.db, portfolio_id, &fields).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Loads a project whose parent portfolio the requester owns.
/// A project whose portfolio has vanished is treated as not owned (403).
async fn load_owned_project(
    state: &AppState,
    project_id: Uuid,
    user: &AuthUser,
) -> Result<Project, AppError> {
    let project = store::projects::find(&state.db, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let portfolio = store::portfolios::find(&state.db, project.portfolio_id)
        .await?
        .ok_or(AppError::Forbidden)?;
    ensure_owner(&portfolio, user.id())?;

    Ok(project)
}

/// PATCH /api/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<Uuid>,
    JsonBody(patch): JsonBody<UpdateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let current = load_owned_project(&state, project_id, &user).await?;
    let fields = patch.apply(current.fields());
    fields.validate()?;

    let updated = store::projects::update_fields(&state.db, project_id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(updated))
}

/// DELETE /api/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    load_owned_project(&state, project_id, &user).await?;
    store::projects::delete(&state.db, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
