// src/models/operations.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::finance::TransactionCategory;

// --- Projetos ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "project_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planned,
    InProgress,
    Completed,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "project_priority", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectPriority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    #[schema(example = "Cambio de arena de filtros")]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    pub budget: Decimal,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub execution_order: i32,
    #[schema(example = 40)]
    pub progress: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub assigned_to: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    pub estimated_cost: Decimal,
    pub status: TaskStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<ProjectTask>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTaskPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub assigned_to: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_cost: Decimal,
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub budget: Decimal,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    #[serde(default)]
    pub execution_order: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "invalid_progress"))]
    pub progress: i32,
    // As tarefas substituem o conjunto anterior em cada gravação
    #[serde(default)]
    #[validate(nested)]
    pub tasks: Vec<ProjectTaskPayload>,
}

// --- Ordens de serviço ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: Uuid,
    #[schema(example = "Soldadura de baranda")]
    pub title: String,
    pub description: Option<String>,
    pub service_type: Option<String>,
    pub responsible: String,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub deadline: Option<NaiveDate>,
    pub status: ServiceStatus,
    pub estimated_cost: Decimal,
    pub actual_cost: Option<Decimal>,
    // [{ "inventoryItemId": ..., "itemName": ..., "quantity": ... }]
    #[schema(value_type = Object)]
    pub materials: Value,
    pub payment_status: PaymentStatus,
    pub related_transaction_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderPayload {
    #[validate(length(min = 1, message = "required"))]
    pub title: String,
    pub description: Option<String>,
    pub service_type: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub responsible: String,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub deadline: Option<NaiveDate>,
    pub status: ServiceStatus,
    #[serde(default)]
    pub estimated_cost: Decimal,
    pub actual_cost: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub materials: Value,
}

// --- Ordens de compra ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "purchase_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseStatus {
    Draft,
    Ordered,
    Received,
    Paid,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub supplier_id: Option<Uuid>,
    // Snapshot do nome: sobrevive à exclusão do fornecedor
    #[schema(example = "Químicos del Istmo S.A.")]
    pub supplier_name: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub status: PurchaseStatus,
    // [{ "inventoryItemId": ..., "itemName": ..., "quantity": ..., "unitPrice": ... }]
    #[schema(value_type = Object)]
    pub items: Value,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub related_transaction_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderPayload {
    pub supplier_id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    pub supplier_name: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub status: PurchaseStatus,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub items: Value,
    #[serde(default)]
    pub total_amount: Decimal,
}

// --- Contas a pagar (CxP) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PayableKind {
    Service,
    Purchase,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayableEntry {
    pub id: Uuid,
    pub kind: PayableKind,
    #[schema(example = "Soldadura de baranda")]
    pub reference: String,
    pub beneficiary: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayableReport {
    pub total_payable: Decimal,
    pub payables: Vec<PayableEntry>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayObligationPayload {
    pub kind: PayableKind,
    pub order_id: Uuid,
    pub bank_account_id: Uuid,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    // Categoria contábil da saída (padrão: manutenção)
    #[serde(default = "default_payable_category")]
    pub category: TransactionCategory,
}

fn default_payable_category() -> TransactionCategory {
    TransactionCategory::Maintenance
}
