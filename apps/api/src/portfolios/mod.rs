//! Portfolio and project CRUD, plus the ownership rules every portfolio-scoped
//! route goes through.

pub mod handlers;
pub mod projects;

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::portfolio::Portfolio;
use crate::models::template::Template;
use crate::store;

/// 403 unless `user_id` owns `portfolio`.
pub fn ensure_owner(portfolio: &Portfolio, user_id: Uuid) -> Result<(), AppError> {
    if portfolio.user_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Loads a portfolio the requester owns: 404 if it does not exist, 403 if it
/// belongs to someone else.
pub async fn load_owned_portfolio(
    pool: &PgPool,
    portfolio_id: Uuid,
    user: &AuthUser,
) -> Result<Portfolio, AppError> {
    let portfolio = store::portfolios::find(pool, portfolio_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;
    ensure_owner(&portfolio, user.id())?;
    Ok(portfolio)
}

/// Unpublished portfolios are indistinguishable from missing ones, for everyone.
pub fn ensure_published(portfolio: Option<Portfolio>) -> Result<Portfolio, AppError> {
    match portfolio {
        Some(p) if p.is_published => Ok(p),
        _ => Err(AppError::NotFound("Portfolio not found".to_string())),
    }
}

const UNKNOWN_TEMPLATE: &str = "does not reference a template";

/// Maps constraint failures on a portfolio write onto client errors: a taken
/// slug, or a template deleted between the existence check and the write.
pub fn map_write_conflict(err: sqlx::Error) -> AppError {
    if store::is_unique_violation(&err) {
        AppError::field("slug", "is already in use")
    } else if store::is_foreign_key_violation(&err) {
        AppError::field("templateId", UNKNOWN_TEMPLATE)
    } else {
        AppError::Database(err)
    }
}

/// The template a write newly points the portfolio at. `None` when the template
/// is cleared or left as it was.
pub fn newly_chosen_template(current: Option<Uuid>, next: Option<Uuid>) -> Option<Uuid> {
    next.filter(|id| current != Some(*id))
}

pub fn require_template(template: Option<Template>) -> Result<Template, AppError> {
    template.ok_or_else(|| AppError::field("templateId", UNKNOWN_TEMPLATE))
}

/// 400 unless `template_id` is absent or names an existing template.
pub async fn ensure_template_exists(
    pool: &PgPool,
    template_id: Option<Uuid>,
) -> Result<(), AppError> {
    let Some(id) = template_id else {
        return Ok(());
    };
    require_template(store::templates::find(pool, id).await?)?;
    Ok(())
}

/// Counts a template as chosen. The counter is best-effort.
pub async fn record_template_use(pool: &PgPool, template_id: Option<Uuid>) {
    let Some(id) = template_id else {
        return;
    };
    if let Err(e) = store::templates::increment_usage(pool, id).await {
        warn!("Failed to bump usage for template {id}: {e}");
    }
}
