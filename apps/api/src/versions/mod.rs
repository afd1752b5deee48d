//! Portfolio snapshots and revert.
//!
//! A snapshot copies the six editable fields verbatim into an immutable row.
//! A revert validates those fields against the same rules as a PATCH and writes
//! them back over the live portfolio unconditionally. Reverting does not take a
//! pre-revert snapshot.

pub mod handlers;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::customization::Customization;
use crate::models::portfolio::{Portfolio, PortfolioFields};
use crate::models::version::{CreateVersionRequest, NewVersion, PortfolioVersion};

pub fn default_title(now: DateTime<Utc>) -> String {
    format!("Snapshot {}", now.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Builds the row that captures `portfolio` as it is right now.
pub fn capture(
    portfolio: &Portfolio,
    req: CreateVersionRequest,
    now: DateTime<Utc>,
) -> Result<NewVersion, AppError> {
    let title = req
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| default_title(now));
    let summary = req
        .summary
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let customization = serde_json::to_value(&portfolio.customization.0)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(NewVersion {
        portfolio_id: portfolio.id,
        title,
        summary,
        name: portfolio.name.clone(),
        description: portfolio.description.clone(),
        slug: portfolio.slug.clone(),
        template_id: portfolio.template_id,
        is_published: portfolio.is_published,
        customization,
    })
}

/// The version must exist and belong to `portfolio_id`; anything else is a 404.
pub fn ensure_version_of(
    version: Option<PortfolioVersion>,
    portfolio_id: Uuid,
) -> Result<PortfolioVersion, AppError> {
    match version {
        Some(v) if v.portfolio_id == portfolio_id => Ok(v),
        _ => Err(AppError::NotFound("Version not found".to_string())),
    }
}

/// The fields a revert to `version` writes. Independent of the live portfolio.
pub fn restore_fields(version: &PortfolioVersion) -> Result<PortfolioFields, AppError> {
    let customization: Customization = serde_json::from_value(version.customization.clone())
        .map_err(|e| AppError::field("customization", format!("snapshot is malformed: {e}")))?;

    let fields = PortfolioFields {
        name: version.name.clone(),
        description: version.description.clone(),
        slug: version.slug.clone(),
        template_id: version.template_id,
        is_published: version.is_published,
        customization,
    };
    fields.validate()?;
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customization::{ColorPalette, ScriptBlock};
    use crate::models::portfolio::sample_portfolio;
    use chrono::TimeZone;
    use serde_json::json;
    use sqlx::types::Json;

    /// What the store would hand back after inserting `new`.
    fn stored(new: NewVersion, now: DateTime<Utc>) -> PortfolioVersion {
        PortfolioVersion {
            id: Uuid::new_v4(),
            portfolio_id: new.portfolio_id,
            title: new.title,
            summary: new.summary,
            name: new.name,
            description: new.description,
            slug: new.slug,
            template_id: new.template_id,
            is_published: new.is_published,
            customization: new.customization,
            created_at: now,
        }
    }

    fn customized_portfolio() -> Portfolio {
        let mut portfolio = sample_portfolio(Uuid::new_v4());
        portfolio.is_published = true;
        portfolio.template_id = Some(Uuid::new_v4());
        portfolio.customization = Json(Customization {
            colors: Some(ColorPalette {
                primary: Some("#1a73e8".into()),
                background: Some("#ffffff".into()),
                ..Default::default()
            }),
            scripts: vec![ScriptBlock {
                name: Some("analytics".into()),
                source: "window.dataLayer = [];".into(),
            }],
            layout: Some(json!({ "columns": 3 })),
            ..Default::default()
        });
        portfolio
    }

    #[test]
    fn test_default_title_uses_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
        assert_eq!(default_title(now), "Snapshot 2024-05-17T09:30:00Z");
    }

    #[test]
    fn test_capture_falls_back_to_default_title() {
        let portfolio = sample_portfolio(Uuid::new_v4());
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let req = CreateVersionRequest {
            title: Some("   ".into()),
            summary: Some("before rebrand".into()),
        };
        let new = capture(&portfolio, req, now).unwrap();
        assert_eq!(new.title, "Snapshot 2024-01-02T03:04:05Z");
        assert_eq!(new.summary.as_deref(), Some("before rebrand"));
        assert_eq!(new.portfolio_id, portfolio.id);
    }

    #[test]
    fn test_snapshot_then_restore_round_trips_fields() {
        let portfolio = customized_portfolio();
        let now = Utc::now();
        let version = stored(
            capture(&portfolio, CreateVersionRequest::default(), now).unwrap(),
            now,
        );

        let restored = restore_fields(&version).unwrap();
        assert_eq!(restored, portfolio.fields());
    }

    #[test]
    fn test_restore_ignores_whatever_the_live_portfolio_holds() {
        let original = customized_portfolio();
        let now = Utc::now();
        let version = stored(
            capture(&original, CreateVersionRequest::default(), now).unwrap(),
            now,
        );

        // Live portfolio drifts arbitrarily after the snapshot.
        let mut live = original.clone();
        live.name = "Totally different".into();
        live.slug = "elsewhere".into();
        live.description = None;
        live.is_published = false;
        live.template_id = None;
        live.customization = Json(Customization::default());

        let restored = restore_fields(&version).unwrap();
        assert_eq!(restored, original.fields());
        assert_ne!(restored, live.fields());
    }

    #[test]
    fn test_version_from_another_portfolio_is_not_found() {
        let portfolio = sample_portfolio(Uuid::new_v4());
        let other = sample_portfolio(portfolio.user_id);
        let now = Utc::now();
        let version = stored(
            capture(&other, CreateVersionRequest::default(), now).unwrap(),
            now,
        );

        assert!(matches!(
            ensure_version_of(Some(version.clone()), portfolio.id),
            Err(AppError::NotFound(_))
        ));
        assert!(ensure_version_of(Some(version), other.id).is_ok());
        assert!(matches!(
            ensure_version_of(None, portfolio.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_snapshot_customization_is_a_validation_error() {
        let portfolio = sample_portfolio(Uuid::new_v4());
        let now = Utc::now();
        let mut version = stored(
            capture(&portfolio, CreateVersionRequest::default(), now).unwrap(),
            now,
        );
        version.customization = json!({ "colors": "not-an-object" });

        match restore_fields(&version) {
            Err(AppError::Validation { details, .. }) => {
                assert_eq!(details[0].field, "customization");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_with_invalid_slug_is_rejected() {
        let portfolio = sample_portfolio(Uuid::new_v4());
        let now = Utc::now();
        let mut version = stored(
            capture(&portfolio, CreateVersionRequest::default(), now).unwrap(),
            now,
        );
        version.slug = "Has Spaces".into();
        assert!(matches!(
            restore_fields(&version),
            Err(AppError::Validation { .. })
        ));
    }
}
