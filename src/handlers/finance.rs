// src/handlers/finance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermFinanceDelete, PermFinanceWrite, RequirePermission},
    },
    models::finance::{
        BankAccount, BankAccountPayload, IncomeStatement, StatementPeriod, Transaction,
        TransactionPayload,
    },
};

// =============================================================================
//  CONTAS BANCÁRIAS
// =============================================================================

// GET /api/finance/accounts
#[utoipa::path(
    get,
    path = "/api/finance/accounts",
    tag = "Finance",
    responses(
        (status = 200, description = "Contas com saldo derivado", body = [BankAccount])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_accounts(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = app_state
        .finance_service
        .list_accounts()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(accounts))
}

// POST /api/finance/accounts
#[utoipa::path(
    post,
    path = "/api/finance/accounts",
    tag = "Finance",
    request_body = BankAccountPayload,
    responses(
        (status = 201, description = "Conta criada", body = BankAccount)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_account(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermFinanceWrite>,
    Json(payload): Json<BankAccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let account = app_state
        .finance_service
        .create_account(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(account)))
}

// PUT /api/finance/accounts/{id}
#[utoipa::path(
    put,
    path = "/api/finance/accounts/{id}",
    tag = "Finance",
    request_body = BankAccountPayload,
    params(("id" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta atualizada", body = BankAccount)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_account(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermFinanceWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BankAccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let account = app_state
        .finance_service
        .update_account(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(account))
}

// DELETE /api/finance/accounts/{id}
#[utoipa::path(
    delete,
    path = "/api/finance/accounts/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID da conta")),
    responses(
        (status = 204, description = "Conta excluída")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_account(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermFinanceDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .finance_service
        .delete_account(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  TRANSAÇÕES
// =============================================================================

// GET /api/finance/transactions
#[utoipa::path(
    get,
    path = "/api/finance/transactions",
    tag = "Finance",
    responses(
        (status = 200, description = "Movimentos em ordem decrescente de data", body = [Transaction])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = app_state
        .finance_service
        .list_transactions()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(transactions))
}

// POST /api/finance/transactions
#[utoipa::path(
    post,
    path = "/api/finance/transactions",
    tag = "Finance",
    request_body = TransactionPayload,
    responses(
        (status = 201, description = "Movimento registrado", body = Transaction),
        (status = 422, description = "Transferência sem conta de destino ou para a mesma conta")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermFinanceWrite>,
    Json(payload): Json<TransactionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let transaction = app_state
        .finance_service
        .create_transaction(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// PUT /api/finance/transactions/{id}
#[utoipa::path(
    put,
    path = "/api/finance/transactions/{id}",
    tag = "Finance",
    request_body = TransactionPayload,
    params(("id" = Uuid, Path, description = "ID do movimento")),
    responses(
        (status = 200, description = "Movimento atualizado", body = Transaction)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermFinanceWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let transaction = app_state
        .finance_service
        .update_transaction(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(transaction))
}

// DELETE /api/finance/transactions/{id}
#[utoipa::path(
    delete,
    path = "/api/finance/transactions/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID do movimento")),
    responses(
        (status = 204, description = "Movimento excluído, saldos recalculados")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermFinanceDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .finance_service
        .delete_transaction(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/finance/income-statement
#[utoipa::path(
    get,
    path = "/api/finance/income-statement",
    tag = "Finance",
    params(StatementPeriod),
    responses(
        (status = 200, description = "Demonstrativo de resultados do período", body = IncomeStatement)
    ),
    security(("api_jwt" = []))
)]
pub async fn income_statement(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(period): Query<StatementPeriod>,
) -> Result<impl IntoResponse, ApiError> {
    let statement = app_state
        .finance_service
        .income_statement(&period)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(statement))
}
