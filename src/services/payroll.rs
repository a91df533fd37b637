// src/services/payroll.rs
//
// Estimativa de custo de folha segundo a legislação panamenha. Cálculo
// puro em Decimal, arredondado a centavos na saída.

use rust_decimal::Decimal;

use crate::models::payroll::{PayrollEstimate, PayrollEstimatePayload};

// Cotas CSS (Caja de Seguro Social) e seguro educativo
const SS_EMPLOYEE: Decimal = Decimal::from_parts(975, 0, 0, false, 4); // 9.75%
const SE_EMPLOYEE: Decimal = Decimal::from_parts(125, 0, 0, false, 4); // 1.25%
const SS_EMPLOYER: Decimal = Decimal::from_parts(1225, 0, 0, false, 4); // 12.25%
const SE_EMPLOYER: Decimal = Decimal::from_parts(150, 0, 0, false, 4); // 1.50%

// Provisões de lei
const XIII_MES: Decimal = Decimal::from_parts(833, 0, 0, false, 4); // 1/12 do salário
const VACATION: Decimal = Decimal::from_parts(909, 0, 0, false, 4); // 1 mês a cada 11
const SENIORITY: Decimal = Decimal::from_parts(192, 0, 0, false, 4); // 1 semana por ano

fn cents(value: Decimal) -> Decimal {
    value.round_dp(2)
}

pub fn estimate(payload: &PayrollEstimatePayload) -> PayrollEstimate {
    let salary = payload.base_salary;

    let deduction_ss = cents(salary * SS_EMPLOYEE);
    let deduction_se = cents(salary * SE_EMPLOYEE);
    let total_deductions = deduction_ss + deduction_se;
    let net_pay = salary - total_deductions;

    let employer_ss = cents(salary * SS_EMPLOYER);
    let employer_se = cents(salary * SE_EMPLOYER);
    let employer_rp = cents(salary * payload.risk_class_pct / Decimal::ONE_HUNDRED);
    let total_employer_taxes = employer_ss + employer_se + employer_rp;

    let prov_xiii = cents(salary * XIII_MES);
    let prov_vacation = cents(salary * VACATION);
    let prov_seniority = cents(salary * SENIORITY);
    let total_provisions = prov_xiii + prov_vacation + prov_seniority;

    PayrollEstimate {
        base_salary: salary,
        deduction_social_security: deduction_ss,
        deduction_educational: deduction_se,
        total_deductions,
        net_pay,
        employer_social_security: employer_ss,
        employer_educational: employer_se,
        employer_professional_risk: employer_rp,
        total_employer_taxes,
        provision_thirteenth_month: prov_xiii,
        provision_vacation: prov_vacation,
        provision_seniority: prov_seniority,
        total_provisions,
        total_monthly_cost: salary + total_employer_taxes + total_provisions,
        annual_provision_liability: total_provisions * Decimal::from(12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn salario_de_800_classe_ii() {
        let result = estimate(&PayrollEstimatePayload {
            base_salary: dec("800.00"),
            risk_class_pct: dec("2.10"),
        });

        assert_eq!(result.deduction_social_security, dec("78.00"));
        assert_eq!(result.deduction_educational, dec("10.00"));
        assert_eq!(result.total_deductions, dec("88.00"));
        assert_eq!(result.net_pay, dec("712.00"));

        assert_eq!(result.employer_social_security, dec("98.00"));
        assert_eq!(result.employer_educational, dec("12.00"));
        assert_eq!(result.employer_professional_risk, dec("16.80"));
        assert_eq!(result.total_employer_taxes, dec("126.80"));

        assert_eq!(result.provision_thirteenth_month, dec("66.64"));
        assert_eq!(result.provision_vacation, dec("72.72"));
        assert_eq!(result.provision_seniority, dec("15.36"));
        assert_eq!(result.total_provisions, dec("154.72"));

        assert_eq!(result.total_monthly_cost, dec("1081.52"));
        assert_eq!(result.annual_provision_liability, dec("1856.64"));
    }

    #[test]
    fn salario_zero() {
        let result = estimate(&PayrollEstimatePayload {
            base_salary: Decimal::ZERO,
            risk_class_pct: dec("2.10"),
        });
        assert_eq!(result.net_pay, Decimal::ZERO);
        assert_eq!(result.total_monthly_cost, Decimal::ZERO);
    }

    #[test]
    fn classe_de_risco_mais_alta_so_muda_o_lado_do_empregador() {
        let base = estimate(&PayrollEstimatePayload {
            base_salary: dec("1000.00"),
            risk_class_pct: dec("2.10"),
        });
        let alto = estimate(&PayrollEstimatePayload {
            base_salary: dec("1000.00"),
            risk_class_pct: dec("5.60"),
        });
        assert_eq!(base.net_pay, alto.net_pay);
        assert_eq!(alto.employer_professional_risk, dec("56.00"));
        assert!(alto.total_monthly_cost > base.total_monthly_cost);
    }
}
