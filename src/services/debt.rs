// src/services/debt.rs
//
// Cálculo puro de morosidade (CxC de sócios). Nenhum acesso a banco aqui:
// o serviço de sócios carrega os dados e delega o cálculo a estas funções.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    finance::{Transaction, TransactionCategory, TransactionType},
    members::{DebtorEntry, DebtorReport, Member, MemberCategory, MemberStatus},
};

// Ciclos cobráveis desde a adesão, inclusive o mês corrente. A data de
// adesão é texto cru: precisa ter exatamente três campos numéricos
// (AAAA-MM-DD), senão o sócio fica fora do cálculo.
pub fn billable_cycles(join_date: &str, today: NaiveDate) -> Option<i64> {
    let parts: Vec<&str> = join_date.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let join_year: i64 = parts[0].trim().parse().ok()?;
    let join_month: i64 = parts[1].trim().parse().ok()?;
    let join_day: i64 = parts[2].trim().parse().ok()?;

    let mut elapsed = (i64::from(today.year()) - join_year) * 12
        + (i64::from(today.month()) - join_month);
    if i64::from(today.day()) < join_day {
        elapsed -= 1;
    }

    // O mês de adesão já conta como um ciclo
    Some(elapsed.saturating_add(1).max(1))
}

// Mensalidade efetiva: o titular responde pelas mensalidades dos
// dependentes ativos; dependentes nunca são cobrados diretamente.
pub fn effective_fee(member: &Member, all_members: &[Member]) -> Decimal {
    match member.category {
        MemberCategory::Dependent => Decimal::ZERO,
        MemberCategory::Individual => member.monthly_fee,
        MemberCategory::Principal => {
            let dependents: Decimal = all_members
                .iter()
                .filter(|m| {
                    m.parent_member_id == Some(member.id)
                        && m.category == MemberCategory::Dependent
                        && m.status == MemberStatus::Active
                })
                .map(|m| m.monthly_fee)
                .sum();
            member.monthly_fee + dependents
        }
    }
}

// Total pago em nome do sócio: aportes dele próprio mais os registrados
// no nome de qualquer dependente vinculado, ativo ou não. Um pagamento
// lançado no dependente abate a dívida da família mesmo que o dependente
// tenha saído depois.
pub fn paid_total(member: &Member, all_members: &[Member], transactions: &[Transaction]) -> Decimal {
    let mut ids: Vec<Uuid> = vec![member.id];
    ids.extend(
        all_members
            .iter()
            .filter(|m| {
                m.category == MemberCategory::Dependent && m.parent_member_id == Some(member.id)
            })
            .map(|m| m.id),
    );

    transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionType::Income
                && t.category == TransactionCategory::Contribution
                && t.related_member_id.map(|id| ids.contains(&id)).unwrap_or(false)
        })
        .map(|t| t.amount)
        .sum()
}

// Dívida acumulada de um sócio específico, se houver. Usado pelo fluxo
// de saldar dívida, que nunca confia num valor vindo do cliente.
pub fn amount_owed(
    member: &Member,
    all_members: &[Member],
    transactions: &[Transaction],
    today: NaiveDate,
) -> Option<Decimal> {
    if member.status != MemberStatus::Active || member.category == MemberCategory::Dependent {
        return None;
    }
    let cycles = billable_cycles(&member.join_date, today)?;

    let fee = effective_fee(member, all_members);
    let expected = Decimal::from(cycles) * fee;
    let paid = paid_total(member, all_members, transactions);
    let balance = paid - expected;

    // Tolerância de um centavo para ruído de arredondamento
    if balance < Decimal::new(-1, 2) {
        Some(balance.abs())
    } else {
        None
    }
}

pub fn compute_debtors(
    members: &[Member],
    transactions: &[Transaction],
    today: NaiveDate,
) -> DebtorReport {
    let mut debtors: Vec<DebtorEntry> = Vec::new();
    let mut total_receivable = Decimal::ZERO;

    for member in members {
        let Some(owed) = amount_owed(member, members, transactions, today) else {
            continue;
        };
        let fee = effective_fee(member, members);
        let months_owed = if fee > Decimal::ZERO {
            (owed / fee).round_dp(1)
        } else {
            Decimal::ZERO
        };

        total_receivable += owed;
        debtors.push(DebtorEntry {
            member_id: member.id,
            full_name: member.full_name.clone(),
            last_payment_date: member.last_payment_date,
            amount_owed: owed,
            months_owed,
        });
    }

    debtors.sort_by(|a, b| b.amount_owed.cmp(&a.amount_owed));
    DebtorReport {
        total_receivable,
        debtors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn member(
        name: &str,
        join_date: &str,
        fee: Decimal,
        status: MemberStatus,
        category: MemberCategory,
        parent: Option<Uuid>,
    ) -> Member {
        Member {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            email: None,
            phone: None,
            family_members: 0,
            join_date: join_date.to_string(),
            status,
            category,
            parent_member_id: parent,
            last_payment_date: None,
            monthly_fee: fee,
            photo_url: None,
            occupation: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn contribution(member_id: Uuid, amount: Decimal) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Aporte mensual".to_string(),
            amount,
            kind: TransactionType::Income,
            category: TransactionCategory::Contribution,
            related_member_id: Some(member_id),
            related_bank_account_id: None,
            transfer_to_account_id: None,
            related_project_id: None,
            related_supplier_id: None,
            related_supplier: None,
            created_at: Utc::now(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn ciclos_no_mes_de_adesao() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        assert_eq!(billable_cycles("2024-06-01", today), Some(1));
    }

    #[test]
    fn ciclos_antes_do_dia_de_aniversario() {
        // Aderiu dia 25; no dia 20 o mês corrente ainda não fechou,
        // mas o mínimo é sempre 1 ciclo.
        let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        assert_eq!(billable_cycles("2024-05-25", today), Some(1));
        assert_eq!(billable_cycles("2024-06-25", today), Some(1));
    }

    #[test]
    fn ciclos_apos_um_ano() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        assert_eq!(billable_cycles("2023-06-01", today), Some(13));
    }

    #[test]
    fn data_ilegivel_exclui_o_socio() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        assert_eq!(billable_cycles("15/01/2023", today), None);
        assert_eq!(billable_cycles("", today), None);
        assert_eq!(billable_cycles("2023-xx-01", today), None);
    }

    #[test]
    fn socio_em_dia_nao_aparece() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let m = member(
            "Ana",
            "2024-01-05",
            dec("45.00"),
            MemberStatus::Active,
            MemberCategory::Individual,
            None,
        );
        // 3 ciclos x 45 = 135, tudo pago
        let txs = vec![contribution(m.id, dec("135.00"))];
        let members = vec![m];

        let report = compute_debtors(&members, &txs, today);
        assert!(report.debtors.is_empty());
        assert_eq!(report.total_receivable, Decimal::ZERO);
    }

    #[test]
    fn moroso_com_meses_fracionarios() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let m = member(
            "Carlos",
            "2024-01-05",
            dec("45.00"),
            MemberStatus::Active,
            MemberCategory::Individual,
            None,
        );
        let txs = vec![contribution(m.id, dec("67.50"))];
        let members = vec![m.clone()];

        let report = compute_debtors(&members, &txs, today);
        assert_eq!(report.debtors.len(), 1);
        let entry = &report.debtors[0];
        assert_eq!(entry.amount_owed, dec("67.50"));
        assert_eq!(entry.months_owed, dec("1.5"));
        assert_eq!(report.total_receivable, dec("67.50"));
    }

    #[test]
    fn titular_acumula_dependentes_ativos_na_mensalidade() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let principal = member(
            "Titular",
            "2024-02-01",
            dec("45.00"),
            MemberStatus::Active,
            MemberCategory::Principal,
            None,
        );
        let dep_ativo = member(
            "Dep Ativo",
            "2024-02-01",
            dec("20.00"),
            MemberStatus::Active,
            MemberCategory::Dependent,
            Some(principal.id),
        );
        let dep_inativo = member(
            "Dep Inativo",
            "2024-02-01",
            dec("20.00"),
            MemberStatus::Inactive,
            MemberCategory::Dependent,
            Some(principal.id),
        );
        let members = vec![principal.clone(), dep_ativo, dep_inativo];

        // Só o dependente ativo entra na cobrança
        assert_eq!(effective_fee(&principal, &members), dec("65.00"));

        let report = compute_debtors(&members, &[], today);
        assert_eq!(report.debtors.len(), 1);
        assert_eq!(report.debtors[0].amount_owed, dec("65.00"));
    }

    #[test]
    fn pagamento_do_dependente_abate_a_divida_do_titular() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let principal = member(
            "Titular",
            "2024-02-01",
            dec("45.00"),
            MemberStatus::Active,
            MemberCategory::Principal,
            None,
        );
        // Dependente inativo: não soma na mensalidade, mas o pagamento
        // lançado no nome dele ainda conta.
        let dep = member(
            "Dep",
            "2024-02-01",
            dec("20.00"),
            MemberStatus::Inactive,
            MemberCategory::Dependent,
            Some(principal.id),
        );
        let txs = vec![contribution(dep.id, dec("45.00"))];
        let members = vec![principal, dep];

        let report = compute_debtors(&members, &txs, today);
        assert!(report.debtors.is_empty());
    }

    #[test]
    fn dependentes_e_inativos_ficam_fora_da_lista() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let dep = member(
            "Dep",
            "2023-01-01",
            dec("20.00"),
            MemberStatus::Active,
            MemberCategory::Dependent,
            Some(Uuid::new_v4()),
        );
        let inativo = member(
            "Inativo",
            "2023-01-01",
            dec("45.00"),
            MemberStatus::Inactive,
            MemberCategory::Individual,
            None,
        );
        let members = vec![dep, inativo];

        let report = compute_debtors(&members, &[], today);
        assert!(report.debtors.is_empty());
    }

    #[test]
    fn lista_ordenada_por_valor_devido_decrescente() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let pouco = member(
            "Deve Pouco",
            "2024-02-01",
            dec("10.00"),
            MemberStatus::Active,
            MemberCategory::Individual,
            None,
        );
        let muito = member(
            "Deve Muito",
            "2023-03-01",
            dec("45.00"),
            MemberStatus::Active,
            MemberCategory::Individual,
            None,
        );
        let members = vec![pouco, muito];

        let report = compute_debtors(&members, &[], today);
        assert_eq!(report.debtors.len(), 2);
        assert_eq!(report.debtors[0].full_name, "Deve Muito");
        assert!(report.debtors[0].amount_owed > report.debtors[1].amount_owed);
    }

    #[test]
    fn saldo_dentro_da_tolerancia_de_um_centavo() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let m = member(
            "Quase",
            "2024-02-01",
            dec("45.00"),
            MemberStatus::Active,
            MemberCategory::Individual,
            None,
        );
        // Faltando exatamente um centavo: ainda não é moroso
        let txs = vec![contribution(m.id, dec("44.99"))];
        let members = vec![m];

        let report = compute_debtors(&members, &txs, today);
        assert!(report.debtors.is_empty());
    }
}
