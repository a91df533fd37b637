// src/handlers/inventory.rs

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
        rbac::{PermInventoryDelete, PermInventoryWrite, RequirePermission},
    },
    models::inventory::{
        DosageSuggestion, DosingApplyPayload, DosingSuggestPayload, InventoryItem,
        InventoryItemPayload, LowStockItem, MaintenanceLog,
    },
};

// GET /api/inventory/items
#[utoipa::path(
    get,
    path = "/api/inventory/items",
    tag = "Inventory",
    responses(
        (status = 200, description = "Itens do almoxarifado", body = [InventoryItem])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .inventory_service
        .list_items()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(items))
}

// POST /api/inventory/items
#[utoipa::path(
    post,
    path = "/api/inventory/items",
    tag = "Inventory",
    request_body = InventoryItemPayload,
    responses(
        (status = 201, description = "Item criado", body = InventoryItem)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermInventoryWrite>,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let item = app_state
        .inventory_service
        .create_item(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/inventory/items/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    request_body = InventoryItemPayload,
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item atualizado", body = InventoryItem)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermInventoryWrite>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).localize(&locale))?;

    let item = app_state
        .inventory_service
        .update_item(&user, id, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok(Json(item))
}

// DELETE /api/inventory/items/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 204, description = "Item excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermInventoryDelete>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .inventory_service
        .delete_item(&user, id)
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/inventory/low-stock
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    tag = "Inventory",
    responses(
        (status = 200, description = "Itens abaixo do ponto de reposição", body = [LowStockItem])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_low_stock(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .inventory_service
        .low_stock()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(items))
}

// POST /api/inventory/dosing/suggest
#[utoipa::path(
    post,
    path = "/api/inventory/dosing/suggest",
    tag = "Inventory",
    request_body = DosingSuggestPayload,
    responses(
        (status = 200, description = "Doses sugeridas para a piscina de 610 mil galões", body = DosageSuggestion)
    ),
    security(("api_jwt" = []))
)]
pub async fn suggest_dosage(
    State(app_state): State<AppState>,
    Json(payload): Json<DosingSuggestPayload>,
) -> impl IntoResponse {
    Json(app_state.inventory_service.suggest_dosage(&payload))
}

// POST /api/inventory/dosing/apply
#[utoipa::path(
    post,
    path = "/api/inventory/dosing/apply",
    tag = "Inventory",
    request_body = DosingApplyPayload,
    responses(
        (status = 201, description = "Baixa de estoque aplicada, bitácora gerada", body = MaintenanceLog),
        (status = 409, description = "Estoque insuficiente para algum reagente")
    ),
    security(("api_jwt" = []))
)]
pub async fn apply_dosage(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    _guard: RequirePermission<PermInventoryWrite>,
    Json(payload): Json<DosingApplyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let log = app_state
        .inventory_service
        .apply_dosage(&user, &payload)
        .await
        .map_err(|e| e.localize(&locale))?;

    Ok((StatusCode::CREATED, Json(log)))
}

// GET /api/inventory/maintenance-logs
#[utoipa::path(
    get,
    path = "/api/inventory/maintenance-logs",
    tag = "Inventory",
    responses(
        (status = 200, description = "Bitácora de manutenção", body = [MaintenanceLog])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_maintenance_logs(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let logs = app_state
        .inventory_service
        .maintenance_logs()
        .await
        .map_err(|e| e.localize(&locale))?;
    Ok(Json(logs))
}
