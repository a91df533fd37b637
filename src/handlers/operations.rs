// src/handlers/operations.rs

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
        rbac::{PermOperationsDelete, PermOperationsWrite, RequirePermission},
    },
    models::operations::{
        PayObligationPayload, PayableReport, ProjectPayload, ProjectWithTasks, PurchaseOrder,
        PurchaseOrderPayload, ServiceOrder, ServiceOrderPayload,
    },
};

// =============================================================================
//  PROJETOS
// =============================================================================

// GET /api/operations/projects
#[utoipa::path(
    get,
    path = "/api/operations/projects",
    tag = "Operations",
    responses(
        (status = 200, description = "Projetos com suas tarefas", body = [ProjectWithTasks])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let projects = app_state
        .operations_service
        .list_projects()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(projects))
}

// POST /api/operations/projects
#[utoipa::path(
    post,
    path = "/api/operations/projects",
    tag = "Operations",
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Projeto criado", body = ProjectWithTasks)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsWrite>,
    Json(payload): Json<ProjectPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let project = app_state
        .operations_service
        .create_project(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(project)))
}

// PUT /api/operations/projects/{id}
#[utoipa::path(
    put,
    path = "/api/operations/projects/{id}",
    tag = "Operations",
    request_body = ProjectPayload,
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Projeto atualizado, tarefas substituídas", body = ProjectWithTasks)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_project(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let project = app_state
        .operations_service
        .update_project(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(project))
}

// DELETE /api/operations/projects/{id}
#[utoipa::path(
    delete,
    path = "/api/operations/projects/{id}",
    tag = "Operations",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 204, description = "Projeto excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_project(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .operations_service
        .delete_project(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ORDENS DE SERVIÇO
// =============================================================================

// GET /api/operations/service-orders
#[utoipa::path(
    get,
    path = "/api/operations/service-orders",
    tag = "Operations",
    responses(
        (status = 200, description = "Ordens de serviço", body = [ServiceOrder])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_service_orders(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .operations_service
        .list_service_orders()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(orders))
}

// POST /api/operations/service-orders
#[utoipa::path(
    post,
    path = "/api/operations/service-orders",
    tag = "Operations",
    request_body = ServiceOrderPayload,
    responses(
        (status = 201, description = "Ordem de serviço criada", body = ServiceOrder)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsWrite>,
    Json(payload): Json<ServiceOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let order = app_state
        .operations_service
        .create_service_order(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// PUT /api/operations/service-orders/{id}
#[utoipa::path(
    put,
    path = "/api/operations/service-orders/{id}",
    tag = "Operations",
    request_body = ServiceOrderPayload,
    params(("id" = Uuid, Path, description = "ID da ordem")),
    responses(
        (status = 200, description = "Ordem de serviço atualizada", body = ServiceOrder)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServiceOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let order = app_state
        .operations_service
        .update_service_order(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(order))
}

// DELETE /api/operations/service-orders/{id}
#[utoipa::path(
    delete,
    path = "/api/operations/service-orders/{id}",
    tag = "Operations",
    params(("id" = Uuid, Path, description = "ID da ordem")),
    responses(
        (status = 204, description = "Ordem de serviço excluída")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_service_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .operations_service
        .delete_service_order(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ORDENS DE COMPRA
// =============================================================================

// GET /api/operations/purchase-orders
#[utoipa::path(
    get,
    path = "/api/operations/purchase-orders",
    tag = "Operations",
    responses(
        (status = 200, description = "Ordens de compra", body = [PurchaseOrder])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_purchase_orders(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .operations_service
        .list_purchase_orders()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(orders))
}

// POST /api/operations/purchase-orders
#[utoipa::path(
    post,
    path = "/api/operations/purchase-orders",
    tag = "Operations",
    request_body = PurchaseOrderPayload,
    responses(
        (status = 201, description = "Ordem de compra criada", body = PurchaseOrder)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_purchase_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsWrite>,
    Json(payload): Json<PurchaseOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let order = app_state
        .operations_service
        .create_purchase_order(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// PUT /api/operations/purchase-orders/{id}
#[utoipa::path(
    put,
    path = "/api/operations/purchase-orders/{id}",
    tag = "Operations",
    request_body = PurchaseOrderPayload,
    params(("id" = Uuid, Path, description = "ID da ordem")),
    responses(
        (status = 200, description = "Ordem de compra atualizada", body = PurchaseOrder)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_purchase_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PurchaseOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let order = app_state
        .operations_service
        .update_purchase_order(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(order))
}

// DELETE /api/operations/purchase-orders/{id}
#[utoipa::path(
    delete,
    path = "/api/operations/purchase-orders/{id}",
    tag = "Operations",
    params(("id" = Uuid, Path, description = "ID da ordem")),
    responses(
        (status = 204, description = "Ordem de compra excluída")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_purchase_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .operations_service
        .delete_purchase_order(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CONTAS A PAGAR
// =============================================================================

// GET /api/operations/payables
#[utoipa::path(
    get,
    path = "/api/operations/payables",
    tag = "Operations",
    responses(
        (status = 200, description = "Obrigações pendentes de pagamento", body = PayableReport)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payables(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .operations_service
        .payables()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(report))
}

// POST /api/operations/payables/pay
#[utoipa::path(
    post,
    path = "/api/operations/payables/pay",
    tag = "Operations",
    request_body = PayObligationPayload,
    responses(
        (status = 201, description = "Obrigação quitada, saída registrada"),
        (status = 409, description = "Ordem já estava paga")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_obligation(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermOperationsWrite>,
    Json(payload): Json<PayObligationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = app_state
        .operations_service
        .pay_obligation(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
