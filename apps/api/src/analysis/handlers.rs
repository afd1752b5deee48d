use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::accessibility::{analyze_accessibility, AccessibilityReport};
use super::advise;
use super::performance::{analyze_performance, PerformanceReport};
use super::prompts::{accessibility_advice_prompt, performance_advice_prompt};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::portfolios::load_owned_portfolio;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub portfolio_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse<R> {
    pub report: R,
    pub ai_advice: Option<String>,
}

/// POST /api/analysis/performance
pub async fn handle_performance(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<AnalysisRequest>,
) -> Result<Json<AnalysisResponse<PerformanceReport>>, AppError> {
    let portfolio = load_owned_portfolio(&state.db, req.portfolio_id, &user).await?;
    let projects = store::projects::list_for_portfolio(&state.db, portfolio.id).await?;

    let report = analyze_performance(&portfolio, &projects);
    let ai_advice = advise(state.llm.as_ref(), &performance_advice_prompt(&report)).await;

    Ok(Json(AnalysisResponse { report, ai_advice }))
}

/// POST /api/analysis/accessibility
pub async fn handle_accessibility(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<AnalysisRequest>,
) -> Result<Json<AnalysisResponse<AccessibilityReport>>, AppError> {
    let portfolio = load_owned_portfolio(&state.db, req.portfolio_id, &user).await?;
    let projects = store::projects::list_for_portfolio(&state.db, portfolio.id).await?;

    let report = analyze_accessibility(&portfolio, &projects);
    let ai_advice = advise(state.llm.as_ref(), &accessibility_advice_prompt(&report)).await;

    Ok(Json(AnalysisResponse { report, ai_advice }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::performance::{score, PerformanceMetrics};
    use serde_json::json;

    #[test]
    fn test_request_reads_camel_case_id() {
        let id = Uuid::new_v4();
        let req: AnalysisRequest = serde_json::from_value(json!({ "portfolioId": id })).unwrap();
        assert_eq!(req.portfolio_id, id);
    }

    #[test]
    fn test_missing_advice_serializes_as_null() {
        let report = score(PerformanceMetrics {
            project_count: 0,
            average_description_length: 0,
            has_large_images: false,
            custom_script_blocks: 0,
        });
        let body = serde_json::to_value(AnalysisResponse {
            report,
            ai_advice: None,
        })
        .unwrap();
        assert!(body["aiAdvice"].is_null());
        assert_eq!(body["report"]["score"], 100);
        assert_eq!(body["report"]["projectCount"], 0);
    }
}
