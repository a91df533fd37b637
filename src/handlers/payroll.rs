// src/handlers/payroll.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::payroll::{PayrollEstimate, PayrollEstimatePayload},
    services::payroll,
};

// POST /api/payroll/estimate
//
// Cálculo puro, nada é persistido. A projeção usa as alíquotas
// panamenhas vigentes (CSS, seguro educativo, riscos profissionais
// e provisões de XIII mês, férias e antiguidade).
#[utoipa::path(
    post,
    path = "/api/payroll/estimate",
    tag = "Payroll",
    request_body = PayrollEstimatePayload,
    responses(
        (status = 200, description = "Projeção de custo laboral", body = PayrollEstimate)
    ),
    security(("api_jwt" = []))
)]
pub async fn estimate(
    State(_app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<PayrollEstimatePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    Ok(Json(payroll::estimate(&payload)))
}
