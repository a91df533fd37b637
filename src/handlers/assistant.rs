// src/handlers/assistant.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::assistant::{AssistantPrompt, AssistantReply},
};

// POST /api/assistant/report
#[utoipa::path(
    post,
    path = "/api/assistant/report",
    tag = "Assistant",
    request_body = AssistantPrompt,
    responses(
        (status = 200, description = "Relatório gerencial gerado", body = AssistantReply),
        (status = 502, description = "Assistente indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_report(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<AssistantPrompt>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let reply = app_state
        .assistant_service
        .generate_report(&payload.prompt)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(reply))
}
