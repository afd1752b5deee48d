use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::double_option;
use crate::validation::{is_http_url, FieldErrors};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFields {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub display_order: i32,
}

impl Project {
    pub fn fields(&self) -> ProjectFields {
        ProjectFields {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            project_url: self.project_url.clone(),
            tags: self.tags.clone(),
            display_order: self.display_order,
        }
    }
}

impl ProjectFields {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        errors.check_length("title", &self.title, 1, 255);
        if let Some(url) = self.project_url.as_deref() {
            if !url.is_empty() && !is_http_url(url) {
                errors.push("projectUrl", "must be an http(s) URL");
            }
        }
        if self.display_order < 0 {
            errors.push("order", "must not be negative");
        }
        if let Some(tags) = &self.tags {
            if tags.iter().any(|t| t.trim().is_empty()) {
                errors.push("tags", "must not contain blank tags");
            }
        }
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default, rename = "order")]
    pub display_order: i32,
}

impl From<CreateProjectRequest> for ProjectFields {
    fn from(req: CreateProjectRequest) -> Self {
        ProjectFields {
            title: req.title.trim().to_string(),
            description: req.description,
            image_url: req.image_url,
            project_url: req.project_url,
            tags: req.tags.map(trim_tags),
            display_order: req.display_order,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub project_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(rename = "order")]
    pub display_order: Option<i32>,
}

impl UpdateProjectRequest {
    pub fn apply(self, current: ProjectFields) -> ProjectFields {
        ProjectFields {
            title: self
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or(current.title),
            description: self.description.unwrap_or(current.description),
            image_url: self.image_url.unwrap_or(current.image_url),
            project_url: self.project_url.unwrap_or(current.project_url),
            tags: self
                .tags
                .map(|tags| tags.map(trim_tags))
                .unwrap_or(current.tags),
            display_order: self.display_order.unwrap_or(current.display_order),
        }
    }
}

fn trim_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().map(|t| t.trim().to_string()).collect()
}

#[cfg(test)]
pub(crate) fn sample_project(portfolio_id: Uuid) -> Project {
    let now = Utc::now();
    Project {
        id: Uuid::new_v4(),
        portfolio_id,
        title: "Checkout redesign".to_string(),
        description: None,
        image_url: None,
        project_url: None,
        tags: None,
        display_order: 0,
        created_at: now,
        updated_at: now,
    }
}
