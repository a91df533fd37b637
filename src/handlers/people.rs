// src/handlers/people.rs

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
        rbac::{PermPeopleDelete, PermPeopleWrite, RequirePermission},
    },
    models::people::{
        BoardMember, BoardMemberPayload, Employee, EmployeePayload, Supplier, SupplierPayload,
    },
};

// =============================================================================
//  FORNECEDORES
// =============================================================================

// GET /api/people/suppliers
#[utoipa::path(
    get,
    path = "/api/people/suppliers",
    tag = "People",
    responses(
        (status = 200, description = "Fornecedores cadastrados", body = [Supplier])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let suppliers = app_state
        .people_service
        .list_suppliers()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(suppliers))
}

// POST /api/people/suppliers
#[utoipa::path(
    post,
    path = "/api/people/suppliers",
    tag = "People",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleWrite>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let supplier = app_state
        .people_service
        .create_supplier(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

// PUT /api/people/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/people/suppliers/{id}",
    tag = "People",
    request_body = SupplierPayload,
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let supplier = app_state
        .people_service
        .update_supplier(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(supplier))
}

// DELETE /api/people/suppliers/{id}
#[utoipa::path(
    delete,
    path = "/api/people/suppliers/{id}",
    tag = "People",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .people_service
        .delete_supplier(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  DIRETORIA
// =============================================================================

// GET /api/people/board
#[utoipa::path(
    get,
    path = "/api/people/board",
    tag = "People",
    responses(
        (status = 200, description = "Membros da diretoria", body = [BoardMember])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_board_members(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let members = app_state
        .people_service
        .list_board_members()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(members))
}

// POST /api/people/board
#[utoipa::path(
    post,
    path = "/api/people/board",
    tag = "People",
    request_body = BoardMemberPayload,
    responses(
        (status = 201, description = "Membro da diretoria criado", body = BoardMember)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_board_member(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleWrite>,
    Json(payload): Json<BoardMemberPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let member = app_state
        .people_service
        .create_board_member(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(member)))
}

// PUT /api/people/board/{id}
#[utoipa::path(
    put,
    path = "/api/people/board/{id}",
    tag = "People",
    request_body = BoardMemberPayload,
    params(("id" = Uuid, Path, description = "ID do membro")),
    responses(
        (status = 200, description = "Membro da diretoria atualizado", body = BoardMember)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_board_member(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BoardMemberPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let member = app_state
        .people_service
        .update_board_member(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(member))
}

// DELETE /api/people/board/{id}
#[utoipa::path(
    delete,
    path = "/api/people/board/{id}",
    tag = "People",
    params(("id" = Uuid, Path, description = "ID do membro")),
    responses(
        (status = 204, description = "Membro da diretoria excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_board_member(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .people_service
        .delete_board_member(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  FUNCIONÁRIOS
// =============================================================================

// GET /api/people/employees
#[utoipa::path(
    get,
    path = "/api/people/employees",
    tag = "People",
    responses(
        (status = 200, description = "Funcionários cadastrados", body = [Employee])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .people_service
        .list_employees()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(employees))
}

// POST /api/people/employees
#[utoipa::path(
    post,
    path = "/api/people/employees",
    tag = "People",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Funcionário criado", body = Employee)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleWrite>,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let employee = app_state
        .people_service
        .create_employee(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

// PUT /api/people/employees/{id}
#[utoipa::path(
    put,
    path = "/api/people/employees/{id}",
    tag = "People",
    request_body = EmployeePayload,
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário atualizado", body = Employee)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let employee = app_state
        .people_service
        .update_employee(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(employee))
}

// DELETE /api/people/employees/{id}
#[utoipa::path(
    delete,
    path = "/api/people/employees/{id}",
    tag = "People",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 204, description = "Funcionário excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermPeopleDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .people_service
        .delete_employee(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}
