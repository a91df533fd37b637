// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    // Soma dos saldos derivados de todas as contas
    pub total_balance: Decimal,
    // Morosidade acumulada (CxC) e obrigações pendentes (CxP)
    pub total_receivable: Decimal,
    pub total_payable: Decimal,
    pub active_members: i64,
    pub low_stock_items: i64,
    // Mês corrente
    pub month_income: Decimal,
    pub month_expense: Decimal,
}
