use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Immutable copy of a portfolio's editable fields.
///
/// `customization` stays raw JSON here: it is re-validated against the current
/// schema when the version is restored, not when it is read.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioVersion {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub template_id: Option<Uuid>,
    pub is_published: bool,
    pub customization: Value,
    pub created_at: DateTime<Utc>,
}

/// A version about to be inserted.
#[derive(Debug, Clone)]
pub struct NewVersion {
    pub portfolio_id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub template_id: Option<Uuid>,
    pub is_published: bool,
    pub customization: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersionRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
}
