// src/services/finance_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::{FinanceRepository, LogRepository, MemberRepository, PeopleRepository},
    models::{
        auth::SystemUser,
        finance::{
            BankAccount, BankAccountPayload, IncomeStatement, StatementPeriod, Transaction,
            TransactionCategory, TransactionPayload, TransactionType,
        },
    },
};

#[derive(Clone)]
pub struct FinanceService {
    finance_repo: FinanceRepository,
    member_repo: MemberRepository,
    people_repo: PeopleRepository,
    log_repo: LogRepository,
    pool: PgPool,
}

// Vínculos permitidos por tipo/categoria. Lançamentos fora dessas
// combinações têm o vínculo descartado em vez de rejeitado: o formulário
// antigo mandava os campos preenchidos mesmo quando escondidos.
fn member_link_allowed(kind: TransactionType, category: TransactionCategory) -> bool {
    (kind == TransactionType::Income && category == TransactionCategory::Contribution)
        || (kind == TransactionType::Expense && category == TransactionCategory::Other)
}

fn supplier_link_allowed(kind: TransactionType) -> bool {
    kind == TransactionType::Expense
}

// Normaliza o payload antes de persistir. Transferências exigem conta de
// destino distinta da origem; os demais tipos perdem o campo.
fn sanitize(payload: &TransactionPayload) -> Result<TransactionPayload, AppError> {
    let mut clean = TransactionPayload {
        date: payload.date,
        description: payload.description.clone(),
        amount: payload.amount,
        kind: payload.kind,
        category: payload.category,
        related_member_id: payload.related_member_id,
        related_bank_account_id: payload.related_bank_account_id,
        transfer_to_account_id: payload.transfer_to_account_id,
        related_project_id: payload.related_project_id,
        related_supplier_id: payload.related_supplier_id,
        related_supplier: payload.related_supplier.clone(),
    };

    if clean.kind == TransactionType::Transfer {
        if clean.transfer_to_account_id.is_none() {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("required");
            error.message = Some("required".into());
            errors.add("transferToAccountId", error);
            return Err(errors.into());
        }
        if clean.transfer_to_account_id == clean.related_bank_account_id {
            return Err(AppError::SameAccountTransfer);
        }
    } else {
        clean.transfer_to_account_id = None;
    }

    if !member_link_allowed(clean.kind, clean.category) {
        clean.related_member_id = None;
    }
    if !supplier_link_allowed(clean.kind) {
        clean.related_supplier_id = None;
        clean.related_supplier = None;
    }

    Ok(clean)
}

impl FinanceService {
    pub fn new(
        finance_repo: FinanceRepository,
        member_repo: MemberRepository,
        people_repo: PeopleRepository,
        log_repo: LogRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            finance_repo,
            member_repo,
            people_repo,
            log_repo,
            pool,
        }
    }

    // =========================================================================
    //  CONTAS BANCÁRIAS
    // =========================================================================

    pub async fn list_accounts(&self) -> Result<Vec<BankAccount>, AppError> {
        self.finance_repo.list_accounts(&self.pool).await
    }

    pub async fn get_account(&self, id: Uuid) -> Result<BankAccount, AppError> {
        self.finance_repo.get_account(&self.pool, id).await
    }

    pub async fn create_account(
        &self,
        actor: &SystemUser,
        payload: &BankAccountPayload,
    ) -> Result<BankAccount, AppError> {
        let mut tx = self.pool.begin().await?;
        let id = self.finance_repo.create_account(&mut *tx, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "CUENTA",
                &format!("Cuenta creada: {}", payload.bank_name),
            )
            .await?;
        tx.commit().await?;

        self.finance_repo.get_account(&self.pool, id).await
    }

    pub async fn update_account(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &BankAccountPayload,
    ) -> Result<BankAccount, AppError> {
        let mut tx = self.pool.begin().await?;
        self.finance_repo.update_account(&mut *tx, id, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "CUENTA",
                &format!("Cuenta editada: {}", payload.bank_name),
            )
            .await?;
        tx.commit().await?;

        self.finance_repo.get_account(&self.pool, id).await
    }

    pub async fn delete_account(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let account = self.finance_repo.get_account(&self.pool, id).await?;

        let mut tx = self.pool.begin().await?;
        self.finance_repo.delete_account(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "CUENTA",
                &format!("Cuenta eliminada: {}", account.bank_name),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  TRANSAÇÕES
    // =========================================================================

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        self.finance_repo.list_transactions(&self.pool).await
    }

    pub async fn create_transaction(
        &self,
        actor: &SystemUser,
        payload: &TransactionPayload,
    ) -> Result<Transaction, AppError> {
        let clean = self.resolve_supplier(sanitize(payload)?).await?;

        let mut tx = self.pool.begin().await?;
        let transaction = self.finance_repo.insert_transaction(&mut *tx, &clean).await?;
        self.roll_forward_last_payment(&mut tx, &transaction).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "TRANSACCION",
                &format!("Movimiento registrado: {}", transaction.description),
            )
            .await?;
        tx.commit().await?;

        Ok(transaction)
    }

    pub async fn update_transaction(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &TransactionPayload,
    ) -> Result<Transaction, AppError> {
        let clean = self.resolve_supplier(sanitize(payload)?).await?;

        let mut tx = self.pool.begin().await?;
        let transaction = self
            .finance_repo
            .update_transaction(&mut *tx, id, &clean)
            .await?;
        self.roll_forward_last_payment(&mut tx, &transaction).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "TRANSACCION",
                &format!("Movimiento editado: {}", transaction.description),
            )
            .await?;
        tx.commit().await?;

        Ok(transaction)
    }

    pub async fn delete_transaction(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let transaction = self.finance_repo.get_transaction(&self.pool, id).await?;

        // O saldo das contas é derivado das transações, então excluir o
        // lançamento já corrige os saldos. Nada a estornar.
        let mut tx = self.pool.begin().await?;
        self.finance_repo.delete_transaction(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "TRANSACCION",
                &format!("Movimiento eliminado: {}", transaction.description),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  DEMONSTRATIVO DE RESULTADOS
    // =========================================================================

    pub async fn income_statement(
        &self,
        period: &StatementPeriod,
    ) -> Result<IncomeStatement, AppError> {
        let income = self
            .finance_repo
            .sum_by_type(&self.pool, "INCOME", period.from, period.to)
            .await?;
        let expense = self
            .finance_repo
            .sum_by_type(&self.pool, "EXPENSE", period.from, period.to)
            .await?;
        let income_by_category = self
            .finance_repo
            .totals_by_category(&self.pool, "INCOME", period.from, period.to)
            .await?;
        let expense_by_category = self
            .finance_repo
            .totals_by_category(&self.pool, "EXPENSE", period.from, period.to)
            .await?;
        let project_expenses = self
            .finance_repo
            .project_expense_totals(&self.pool, period.from, period.to)
            .await?;

        Ok(IncomeStatement {
            income,
            expense,
            net_result: income - expense,
            income_by_category,
            expense_by_category,
            project_expenses,
        })
    }

    // Se veio um fornecedor por id, o nome gravado é sempre o do cadastro
    // (snapshot), ignorando o texto livre que o cliente mandou.
    async fn resolve_supplier(
        &self,
        mut clean: TransactionPayload,
    ) -> Result<TransactionPayload, AppError> {
        if let Some(supplier_id) = clean.related_supplier_id {
            let supplier = self.people_repo.get_supplier(&self.pool, supplier_id).await?;
            clean.related_supplier = Some(supplier.business_name);
        }
        Ok(clean)
    }

    // Aporte vinculado a sócio rola a data do último pagamento para a
    // frente, nunca para trás.
    async fn roll_forward_last_payment(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        transaction: &Transaction,
    ) -> Result<(), AppError> {
        if transaction.kind != TransactionType::Income
            || transaction.category != TransactionCategory::Contribution
        {
            return Ok(());
        }
        let Some(member_id) = transaction.related_member_id else {
            return Ok(());
        };

        let member = self.member_repo.get(&mut **tx, member_id).await?;
        let is_newer = member
            .last_payment_date
            .map(|existing| transaction.date > existing)
            .unwrap_or(true);
        if is_newer {
            self.member_repo
                .set_last_payment_date(&mut **tx, member_id, transaction.date)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn payload(kind: TransactionType, category: TransactionCategory) -> TransactionPayload {
        TransactionPayload {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            description: "teste".to_string(),
            amount: Decimal::new(4500, 2),
            kind,
            category,
            related_member_id: Some(Uuid::new_v4()),
            related_bank_account_id: Some(Uuid::new_v4()),
            transfer_to_account_id: Some(Uuid::new_v4()),
            related_project_id: None,
            related_supplier_id: Some(Uuid::new_v4()),
            related_supplier: Some("Ferretería Central".to_string()),
        }
    }

    #[test]
    fn transferencia_exige_conta_de_destino() {
        let mut p = payload(TransactionType::Transfer, TransactionCategory::Internal);
        p.transfer_to_account_id = None;
        assert!(matches!(sanitize(&p), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn transferencia_para_a_mesma_conta_e_rejeitada() {
        let mut p = payload(TransactionType::Transfer, TransactionCategory::Internal);
        p.transfer_to_account_id = p.related_bank_account_id;
        assert!(matches!(sanitize(&p), Err(AppError::SameAccountTransfer)));
    }

    #[test]
    fn ingresso_descarta_vinculo_de_fornecedor_e_destino() {
        let p = payload(TransactionType::Income, TransactionCategory::Contribution);
        let clean = sanitize(&p).unwrap();
        assert!(clean.transfer_to_account_id.is_none());
        assert!(clean.related_supplier_id.is_none());
        assert!(clean.related_supplier.is_none());
        // Aporte de sócio mantém o vínculo
        assert!(clean.related_member_id.is_some());
    }

    #[test]
    fn despesa_de_manutencao_descarta_vinculo_de_socio() {
        let p = payload(TransactionType::Expense, TransactionCategory::Maintenance);
        let clean = sanitize(&p).unwrap();
        assert!(clean.related_member_id.is_none());
        assert!(clean.related_supplier_id.is_some());
    }

    #[test]
    fn despesa_avulsa_pode_vincular_socio() {
        let p = payload(TransactionType::Expense, TransactionCategory::Other);
        let clean = sanitize(&p).unwrap();
        assert!(clean.related_member_id.is_some());
    }
}
