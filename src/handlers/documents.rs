// src/handlers/documents.rs

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::finance::StatementPeriod,
};

// GET /api/documents/receipt/{transaction_id}
#[utoipa::path(
    get,
    path = "/api/documents/receipt/{transaction_id}",
    tag = "Documents",
    params(("transaction_id" = Uuid, Path, description = "ID do movimento")),
    responses(
        (status = 200, description = "Recibo oficial em PDF", content_type = "application/pdf"),
        (status = 404, description = "Movimento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn payment_receipt(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(transaction_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = app_state
        .document_service
        .payment_receipt(transaction_id)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes))
}

// GET /api/documents/income-statement
#[utoipa::path(
    get,
    path = "/api/documents/income-statement",
    tag = "Documents",
    params(StatementPeriod),
    responses(
        (status = 200, description = "Estado de resultados em PDF", content_type = "application/pdf")
    ),
    security(("api_jwt" = []))
)]
pub async fn income_statement_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(period): Query<StatementPeriod>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = app_state
        .document_service
        .income_statement_pdf(&period)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes))
}
