// src/handlers/logs.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::ApiError, config::AppState, middleware::i18n::Locale, models::logs::SystemLog,
};

// GET /api/logs
#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "Logs",
    responses(
        (status = 200, description = "Trilha de auditoria, mais recente primeiro", body = [SystemLog])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_logs(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let logs = app_state
        .log_repo
        .list_recent(&app_state.db_pool)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(logs))
}
