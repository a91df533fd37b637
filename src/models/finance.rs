// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionCategory {
    Contribution,
    Donation,
    Maintenance,
    Chemicals,
    Utilities,
    Salary,
    Other,
    Project,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "bank_account_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankAccountKind {
    Checking,
    Savings,
    Cash,
}

// --- Structs ---

// O saldo corrente é derivado: opening_balance + fold sobre as transações.
// A coluna `balance` só existe na query de leitura, nunca na tabela.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: Uuid,

    #[schema(example = "Banco General")]
    pub bank_name: String,
    #[schema(example = "04-99-0017-8")]
    pub account_number: String,
    pub kind: BankAccountKind,
    #[schema(example = "USD")]
    pub currency: String,

    #[schema(example = "500.00")]
    pub opening_balance: Decimal,
    #[schema(example = "545.00")]
    pub balance: Decimal,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,
    #[schema(example = "SALDAR DEUDA ACUMULADA - Socio: Carlos Espinosa")]
    pub description: String,
    #[schema(example = "45.00")]
    pub amount: Decimal,

    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: TransactionType,
    pub category: TransactionCategory,

    pub related_member_id: Option<Uuid>,
    pub related_bank_account_id: Option<Uuid>,
    pub transfer_to_account_id: Option<Uuid>,
    pub related_project_id: Option<Uuid>,
    pub related_supplier_id: Option<Uuid>,
    pub related_supplier: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountPayload {
    #[validate(length(min = 1, message = "required"))]
    pub bank_name: String,
    #[validate(length(min = 1, message = "required"))]
    pub account_number: String,
    pub kind: BankAccountKind,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub opening_balance: Decimal,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "required"))]
    pub description: String,
    #[schema(example = "45.00")]
    pub amount: Decimal,

    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: TransactionCategory,

    pub related_member_id: Option<Uuid>,
    pub related_bank_account_id: Option<Uuid>,
    pub transfer_to_account_id: Option<Uuid>,
    pub related_project_id: Option<Uuid>,
    pub related_supplier_id: Option<Uuid>,
    pub related_supplier: Option<String>,
}

// --- Demonstrativo de resultados ---

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StatementPeriod {
    #[param(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    #[schema(example = "CONTRIBUTION")]
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTotal {
    #[schema(example = "Reparación de bombas")]
    pub project_name: String,
    pub total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub income: Decimal,
    pub expense: Decimal,
    pub net_result: Decimal,
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,
    pub project_expenses: Vec<ProjectTotal>,
}
