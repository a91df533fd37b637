// src/models/people.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Fornecedores ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    #[schema(example = "Químicos del Istmo S.A.")]
    pub business_name: String,
    #[schema(example = "155612345-2-2021")]
    pub ruc: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(length(min = 1, message = "required"))]
    pub business_name: String,
    pub ruc: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub contact_name: Option<String>,
}

// --- Diretoria ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "board_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardRole {
    President,
    VicePresident,
    Secretary,
    Treasurer,
    Vocal,
    Fiscal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub id: Uuid,
    pub full_name: String,
    pub role: BoardRole,
    #[schema(value_type = String, format = Date)]
    pub period_start: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub period_end: NaiveDate,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardMemberPayload {
    #[validate(length(min = 1, message = "required"))]
    pub full_name: String,
    pub role: BoardRole,
    #[schema(value_type = String, format = Date)]
    pub period_start: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub period_end: NaiveDate,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

// --- Funcionários ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "employee_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Vacation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Ach,
    Cheque,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub full_name: String,
    #[schema(example = "8-123-4567")]
    pub cedula: Option<String>,
    #[schema(example = "Salvavidas")]
    pub position: String,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(example = "800.00")]
    pub base_salary: Decimal,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: EmployeeStatus,
    pub payment_method: PaymentMethod,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[validate(length(min = 1, message = "required"))]
    pub full_name: String,
    pub cedula: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub position: String,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub base_salary: Decimal,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: EmployeeStatus,
    pub payment_method: PaymentMethod,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
}
