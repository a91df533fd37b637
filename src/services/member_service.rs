// src/services/member_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, LogRepository, MemberRepository},
    models::{
        auth::SystemUser,
        finance::{Transaction, TransactionCategory, TransactionPayload, TransactionType},
        members::{DebtorReport, Member, MemberPayload, SettleDebtPayload},
    },
    services::debt,
};

#[derive(Clone)]
pub struct MemberService {
    member_repo: MemberRepository,
    finance_repo: FinanceRepository,
    log_repo: LogRepository,
    pool: PgPool,
}

impl MemberService {
    pub fn new(
        member_repo: MemberRepository,
        finance_repo: FinanceRepository,
        log_repo: LogRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            member_repo,
            finance_repo,
            log_repo,
            pool,
        }
    }

    pub async fn list(&self) -> Result<Vec<Member>, AppError> {
        self.member_repo.list_all(&self.pool).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Member, AppError> {
        self.member_repo.get(&self.pool, id).await
    }

    pub async fn create(
        &self,
        actor: &SystemUser,
        payload: &MemberPayload,
    ) -> Result<Member, AppError> {
        let mut tx = self.pool.begin().await?;
        let member = self.member_repo.create(&mut *tx, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "SOCIO",
                &format!("Socio creado: {}", member.full_name),
            )
            .await?;
        tx.commit().await?;
        Ok(member)
    }

    pub async fn update(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &MemberPayload,
    ) -> Result<Member, AppError> {
        let mut tx = self.pool.begin().await?;
        let member = self.member_repo.update(&mut *tx, id, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "SOCIO",
                &format!("Socio editado: {}", member.full_name),
            )
            .await?;
        tx.commit().await?;
        Ok(member)
    }

    pub async fn delete(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let member = self.member_repo.get(&self.pool, id).await?;

        let mut tx = self.pool.begin().await?;
        self.member_repo.delete(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "SOCIO",
                &format!("Socio eliminado: {}", member.full_name),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // Relatório de morosidade: carrega tudo e delega ao cálculo puro.
    pub async fn debtors(&self) -> Result<DebtorReport, AppError> {
        let members = self.member_repo.list_all(&self.pool).await?;
        let transactions = self.finance_repo.list_transactions(&self.pool).await?;
        let today = Utc::now().date_naive();
        Ok(debt::compute_debtors(&members, &transactions, today))
    }

    // Quita a dívida acumulada do sócio num único passo atômico: lança o
    // ingresso, atualiza a data do último pagamento e registra auditoria.
    // O valor é sempre recalculado aqui; o cliente só escolhe conta e data.
    pub async fn settle_debt(
        &self,
        actor: &SystemUser,
        member_id: Uuid,
        payload: &SettleDebtPayload,
    ) -> Result<Transaction, AppError> {
        let members = self.member_repo.list_all(&self.pool).await?;
        let transactions = self.finance_repo.list_transactions(&self.pool).await?;
        let member = members
            .iter()
            .find(|m| m.id == member_id)
            .ok_or(AppError::NotFound)?;

        let today = Utc::now().date_naive();
        let owed = debt::amount_owed(member, &members, &transactions, today)
            .ok_or(AppError::NoOutstandingDebt)?;

        // Valida a conta de destino antes de abrir a transação
        self.finance_repo
            .get_account(&self.pool, payload.bank_account_id)
            .await?;

        let tx_payload = TransactionPayload {
            date: payload.date,
            description: format!("SALDAR DEUDA ACUMULADA - Socio: {}", member.full_name),
            amount: owed.round_dp(2),
            kind: TransactionType::Income,
            category: TransactionCategory::Contribution,
            related_member_id: Some(member_id),
            related_bank_account_id: Some(payload.bank_account_id),
            transfer_to_account_id: None,
            related_project_id: None,
            related_supplier_id: None,
            related_supplier: None,
        };

        let mut tx = self.pool.begin().await?;
        let transaction = self
            .finance_repo
            .insert_transaction(&mut *tx, &tx_payload)
            .await?;
        self.member_repo
            .set_last_payment_date(&mut *tx, member_id, payload.date)
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "SALDAR",
                "SOCIO",
                &format!(
                    "Deuda saldada de {}: ${}",
                    member.full_name,
                    transaction.amount
                ),
            )
            .await?;
        tx.commit().await?;

        Ok(transaction)
    }
}
