// src/models/payroll.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Estimativa de folha (legislação panamenha): o cálculo em si vive em
// services::payroll.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEstimatePayload {
    #[schema(example = "800.00")]
    pub base_salary: Decimal,
    // Classe de risco profissional, em porcentagem (Classe II = 2.10)
    #[serde(default = "default_risk_class")]
    #[schema(example = "2.10")]
    pub risk_class_pct: Decimal,
}

fn default_risk_class() -> Decimal {
    Decimal::new(210, 2)
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEstimate {
    pub base_salary: Decimal,

    // Lado do empregado
    #[schema(example = "78.00")]
    pub deduction_social_security: Decimal,
    #[schema(example = "10.00")]
    pub deduction_educational: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,

    // Lado do empregador
    pub employer_social_security: Decimal,
    pub employer_educational: Decimal,
    pub employer_professional_risk: Decimal,
    pub total_employer_taxes: Decimal,

    // Provisões de lei
    pub provision_thirteenth_month: Decimal,
    pub provision_vacation: Decimal,
    pub provision_seniority: Decimal,
    pub total_provisions: Decimal,

    pub total_monthly_cost: Decimal,
    pub annual_provision_liability: Decimal,
}
