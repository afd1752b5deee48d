use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub preview_image_url: Option<String>,
    pub rating: f64,
    pub usage_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
