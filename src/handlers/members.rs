// src/handlers/members.rs

use axum::{
    extract::{Path, State},
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
        rbac::{PermMembersDelete, PermMembersWrite, RequirePermission},
    },
    models::members::{DebtorReport, Member, MemberPayload, SettleDebtPayload},
};

// GET /api/members
#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Members",
    responses(
        (status = 200, description = "Lista de sócios", body = [Member])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let members = app_state
        .member_service
        .list()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(members))
}

// GET /api/members/{id}
#[utoipa::path(
    get,
    path = "/api/members/{id}",
    tag = "Members",
    params(("id" = Uuid, Path, description = "ID do sócio")),
    responses(
        (status = 200, description = "Sócio encontrado", body = Member),
        (status = 404, description = "Sócio não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_member(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let member = app_state
        .member_service
        .get(id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(member))
}

// POST /api/members
#[utoipa::path(
    post,
    path = "/api/members",
    tag = "Members",
    request_body = MemberPayload,
    responses(
        (status = 201, description = "Sócio criado", body = Member)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_member(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermMembersWrite>,
    Json(payload): Json<MemberPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let member = app_state
        .member_service
        .create(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(member)))
}

// PUT /api/members/{id}
#[utoipa::path(
    put,
    path = "/api/members/{id}",
    tag = "Members",
    request_body = MemberPayload,
    params(("id" = Uuid, Path, description = "ID do sócio")),
    responses(
        (status = 200, description = "Sócio atualizado", body = Member)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_member(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermMembersWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MemberPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let member = app_state
        .member_service
        .update(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(member))
}

// DELETE /api/members/{id}
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    tag = "Members",
    params(("id" = Uuid, Path, description = "ID do sócio")),
    responses(
        (status = 204, description = "Sócio excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_member(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermMembersDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .member_service
        .delete(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/members/debtors
#[utoipa::path(
    get,
    path = "/api/members/debtors",
    tag = "Members",
    responses(
        (status = 200, description = "Relatório de morosidade", body = DebtorReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_debtors(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .member_service
        .debtors()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(report))
}

// POST /api/members/{id}/settle-debt
#[utoipa::path(
    post,
    path = "/api/members/{id}/settle-debt",
    tag = "Members",
    request_body = SettleDebtPayload,
    params(("id" = Uuid, Path, description = "ID do sócio")),
    responses(
        (status = 201, description = "Dívida quitada, lançamento gerado"),
        (status = 409, description = "Sócio sem dívida pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn settle_debt(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermMembersWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SettleDebtPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let transaction = app_state
        .member_service
        .settle_debt(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
