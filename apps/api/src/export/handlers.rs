use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::{render_html, render_markdown, ExportFormat, PortfolioExport};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{Path, Query};
use crate::portfolios::load_owned_portfolio;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// GET /api/portfolios/:id/export?format=json|markdown|html
pub async fn handle_export(
    State(state): State<AppState>,
    user: AuthUser,
    Path(portfolio_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };

    let portfolio = load_owned_portfolio(&state.db, portfolio_id, &user).await?;
    let projects = store::projects::list_for_portfolio(&state.db, portfolio.id).await?;

    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&PortfolioExport {
            portfolio: &portfolio,
            projects: &projects,
            exported_at: Utc::now(),
        })
        .map_err(anyhow::Error::from)?,
        ExportFormat::Markdown => render_markdown(&portfolio, &projects),
        ExportFormat::Html => render_html(&portfolio, &projects),
    };

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format.content_disposition(&portfolio.slug),
            ),
        ],
        body,
    ))
}
