// src/models/members.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "member_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "member_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberCategory {
    Individual,
    Principal,
    Dependent,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,

    #[schema(example = "Carlos Espinosa")]
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub family_members: i32,

    // Texto cru (AAAA-MM-DD esperado). Datas fora do formato excluem o
    // sócio do cálculo de morosidade em vez de derrubar a listagem.
    #[schema(example = "2023-01-15")]
    pub join_date: String,

    pub status: MemberStatus,
    pub category: MemberCategory,

    // Presente apenas quando category = Dependent
    pub parent_member_id: Option<Uuid>,

    #[schema(value_type = Option<String>, format = Date)]
    pub last_payment_date: Option<NaiveDate>,

    #[schema(example = "45.00")]
    pub monthly_fee: Decimal,

    pub photo_url: Option<String>,
    pub occupation: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    #[validate(length(min = 1, message = "required"))]
    pub full_name: String,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub family_members: i32,
    #[validate(length(min = 1, message = "required"))]
    pub join_date: String,
    pub status: MemberStatus,
    pub category: MemberCategory,
    pub parent_member_id: Option<Uuid>,
    #[schema(value_type = Option<String>, format = Date)]
    pub last_payment_date: Option<NaiveDate>,
    pub monthly_fee: Decimal,
    pub photo_url: Option<String>,
    pub occupation: Option<String>,
}

// Uma linha da lista de morosidade (ordenada por valor devido, decrescente)
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebtorEntry {
    pub member_id: Uuid,
    pub full_name: String,
    #[schema(value_type = Option<String>, format = Date)]
    pub last_payment_date: Option<NaiveDate>,
    #[schema(example = "45.00")]
    pub amount_owed: Decimal,
    #[schema(example = "1.0")]
    pub months_owed: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebtorReport {
    pub total_receivable: Decimal,
    pub debtors: Vec<DebtorEntry>,
}

// Saldar dívida: a quantia é recalculada no servidor, nunca vem do cliente.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettleDebtPayload {
    pub bank_account_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub date: NaiveDate,
}
