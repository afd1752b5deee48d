use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompts::{
    generate_text_prompt, improvements_prompt, outline_prompt, translate_prompt,
    GenerateTextInput, TemplateIdeasInput, TranslateInput,
};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::state::AppState;
use crate::validation::{require_text, FieldErrors};

#[derive(Debug, Serialize)]
pub struct GeneratedText {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ImprovementsRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct Suggestions {
    pub suggestions: String,
}

#[derive(Debug, Serialize)]
pub struct Outline {
    pub outline: String,
}

#[derive(Debug, Serialize)]
pub struct Translation {
    pub translated: String,
}

/// POST /api/ai/generate-text
pub async fn handle_generate_text(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<GenerateTextInput>,
) -> Result<Json<GeneratedText>, AppError> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "prompt", &input.prompt);
    errors.into_result()?;

    debug!("Generating text for user {}", user.id());
    let text = state.llm.generate(&generate_text_prompt(&input)).await?;
    Ok(Json(GeneratedText { text }))
}

/// POST /api/ai/content-improvements
pub async fn handle_content_improvements(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(req): JsonBody<ImprovementsRequest>,
) -> Result<Json<Suggestions>, AppError> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "content", &req.content);
    errors.into_result()?;

    let suggestions = state.llm.generate(&improvements_prompt(&req.content)).await?;
    Ok(Json(Suggestions { suggestions }))
}

/// POST /api/ai/templates
pub async fn handle_template_ideas(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(input): JsonBody<TemplateIdeasInput>,
) -> Result<Json<Outline>, AppError> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "industry", &input.industry);
    errors.into_result()?;

    let outline = state.llm.generate(&outline_prompt(&input)).await?;
    Ok(Json(Outline { outline }))
}

/// POST /api/ai/translate
pub async fn handle_translate(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(input): JsonBody<TranslateInput>,
) -> Result<Json<Translation>, AppError> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "text", &input.text);
    require_text(&mut errors, "targetLanguage", &input.target_language);
    errors.into_result()?;

    let translated = state.llm.generate(&translate_prompt(&input)).await?;
    Ok(Json(Translation { translated }))
}
