use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::customization::Customization;
use crate::models::double_option;
use crate::models::project::Project;
use crate::validation::{is_valid_slug, FieldErrors};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub is_published: bool,
    pub template_id: Option<Uuid>,
    pub customization: Json<Customization>,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The owner-editable part of a portfolio. Snapshots capture exactly these fields
/// and reverts write exactly these fields back.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioFields {
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub template_id: Option<Uuid>,
    pub is_published: bool,
    pub customization: Customization,
}

impl Portfolio {
    pub fn fields(&self) -> PortfolioFields {
        PortfolioFields {
            name: self.name.clone(),
            description: self.description.clone(),
            slug: self.slug.clone(),
            template_id: self.template_id,
            is_published: self.is_published,
            customization: self.customization.0.clone(),
        }
    }
}

impl PortfolioFields {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        errors.check_length("name", &self.name, 1, 255);
        if !is_valid_slug(&self.slug) {
            errors.push(
                "slug",
                "must be 1-100 characters of lowercase letters, digits or hyphens",
            );
        }
        if let Some(description) = &self.description {
            errors.check_length("description", description, 0, 5000);
        }
        self.customization.validate(&mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioRequest {
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub is_published: bool,
    pub template_id: Option<Uuid>,
    #[serde(default)]
    pub customization: Customization,
}

impl From<CreatePortfolioRequest> for PortfolioFields {
    fn from(req: CreatePortfolioRequest) -> Self {
        PortfolioFields {
            name: req.name.trim().to_string(),
            description: req.description,
            slug: req.slug.trim().to_string(),
            template_id: req.template_id,
            is_published: req.is_published,
            customization: req.customization,
        }
    }
}

/// PATCH body. Omitted keys keep their current value; `null` clears nullable fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub slug: Option<String>,
    pub is_published: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub template_id: Option<Option<Uuid>>,
    pub customization: Option<Customization>,
}

impl UpdatePortfolioRequest {
    pub fn apply(self, current: PortfolioFields) -> PortfolioFields {
        PortfolioFields {
            name: self
                .name
                .map(|n| n.trim().to_string())
                .unwrap_or(current.name),
            description: self.description.unwrap_or(current.description),
            slug: self
                .slug
                .map(|s| s.trim().to_string())
                .unwrap_or(current.slug),
            template_id: self.template_id.unwrap_or(current.template_id),
            is_published: self.is_published.unwrap_or(current.is_published),
            customization: self.customization.unwrap_or(current.customization),
        }
    }
}

/// Response body for the unauthenticated published view.
#[derive(Debug, Serialize)]
pub struct PublicPortfolio {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    pub projects: Vec<Project>,
}

#[cfg(test)]
pub(crate) fn sample_portfolio(user_id: Uuid) -> Portfolio {
    let now = Utc::now();
    Portfolio {
        id: Uuid::new_v4(),
        user_id,
        name: "Jane Doe".to_string(),
        description: Some("Product designer".to_string()),
        slug: "jane-doe".to_string(),
        is_published: false,
        template_id: None,
        customization: Json(Customization::default()),
        view_count: 0,
        created_at: now,
        updated_at: now,
    }
}
