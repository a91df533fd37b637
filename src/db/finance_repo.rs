// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{
        BankAccount, BankAccountPayload, CategoryTotal, ProjectTotal, Transaction,
        TransactionPayload,
    },
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

// Saldo derivado: opening_balance + fold sobre todas as transações que
// tocam a conta. Não existe coluna de saldo mutável para "esquecer de
// reverter" ao excluir uma transação.
const ACCOUNT_SELECT: &str = r#"
    SELECT a.id, a.bank_name, a.account_number, a.kind, a.currency,
           a.opening_balance, a.created_at,
           a.opening_balance + COALESCE((
               SELECT SUM(CASE
                   WHEN t.type = 'TRANSFER' AND t.transfer_to_account_id = a.id THEN t.amount
                   WHEN t.type = 'TRANSFER' THEN -t.amount
                   WHEN t.type = 'INCOME' THEN t.amount
                   ELSE -t.amount
               END)
               FROM transactions t
               WHERE t.related_bank_account_id = a.id
                  OR t.transfer_to_account_id = a.id
           ), 0) AS balance
    FROM bank_accounts a
"#;

const TX_COLUMNS: &str = "id, date, description, amount, type, category, \
     related_member_id, related_bank_account_id, transfer_to_account_id, \
     related_project_id, related_supplier_id, related_supplier, created_at";

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CONTAS BANCÁRIAS
    // =========================================================================

    pub async fn list_accounts<'e, E>(&self, executor: E) -> Result<Vec<BankAccount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let accounts = sqlx::query_as::<_, BankAccount>(&format!(
            "{ACCOUNT_SELECT} ORDER BY a.bank_name ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(accounts)
    }

    pub async fn get_account<'e, E>(&self, executor: E, id: Uuid) -> Result<BankAccount, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let account =
            sqlx::query_as::<_, BankAccount>(&format!("{ACCOUNT_SELECT} WHERE a.id = $1"))
                .bind(id)
                .fetch_optional(executor)
                .await?
                .ok_or(AppError::NotFound)?;
        Ok(account)
    }

    pub async fn create_account<'e, E>(
        &self,
        executor: E,
        payload: &BankAccountPayload,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO bank_accounts (bank_name, account_number, kind, currency, opening_balance)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&payload.bank_name)
        .bind(&payload.account_number)
        .bind(payload.kind)
        .bind(&payload.currency)
        .bind(payload.opening_balance)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    pub async fn update_account<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &BankAccountPayload,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE bank_accounts
            SET bank_name = $2, account_number = $3, kind = $4,
                currency = $5, opening_balance = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&payload.bank_name)
        .bind(&payload.account_number)
        .bind(payload.kind)
        .bind(&payload.currency)
        .bind(payload.opening_balance)
        .execute(executor)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_account<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM bank_accounts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  TRANSAÇÕES
    // =========================================================================

    pub async fn list_transactions<'e, E>(&self, executor: E) -> Result<Vec<Transaction>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TX_COLUMNS} FROM transactions ORDER BY date DESC, created_at DESC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(transactions)
    }

    pub async fn get_transaction<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tx = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TX_COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(tx)
    }

    pub async fn insert_transaction<'e, E>(
        &self,
        executor: E,
        payload: &TransactionPayload,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tx = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            INSERT INTO transactions (
                date, description, amount, type, category,
                related_member_id, related_bank_account_id, transfer_to_account_id,
                related_project_id, related_supplier_id, related_supplier
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {TX_COLUMNS}
            "#
        ))
        .bind(payload.date)
        .bind(&payload.description)
        .bind(payload.amount)
        .bind(payload.kind)
        .bind(payload.category)
        .bind(payload.related_member_id)
        .bind(payload.related_bank_account_id)
        .bind(payload.transfer_to_account_id)
        .bind(payload.related_project_id)
        .bind(payload.related_supplier_id)
        .bind(&payload.related_supplier)
        .fetch_one(executor)
        .await?;
        Ok(tx)
    }

    pub async fn update_transaction<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &TransactionPayload,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tx = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            UPDATE transactions SET
                date = $2, description = $3, amount = $4, type = $5, category = $6,
                related_member_id = $7, related_bank_account_id = $8,
                transfer_to_account_id = $9, related_project_id = $10,
                related_supplier_id = $11, related_supplier = $12
            WHERE id = $1
            RETURNING {TX_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.date)
        .bind(&payload.description)
        .bind(payload.amount)
        .bind(payload.kind)
        .bind(payload.category)
        .bind(payload.related_member_id)
        .bind(payload.related_bank_account_id)
        .bind(payload.transfer_to_account_id)
        .bind(payload.related_project_id)
        .bind(payload.related_supplier_id)
        .bind(&payload.related_supplier)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(tx)
    }

    pub async fn delete_transaction<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  DEMONSTRATIVO DE RESULTADOS
    // =========================================================================

    pub async fn sum_by_type<'e, E>(
        &self,
        executor: E,
        kind: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE type = $1::transaction_type
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            "#,
        )
        .bind(kind)
        .bind(from)
        .bind(to)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    pub async fn totals_by_category<'e, E>(
        &self,
        executor: E,
        kind: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<CategoryTotal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let totals = sqlx::query_as::<_, CategoryTotal>(
            r#"
            SELECT category::text AS category, SUM(amount) AS total
            FROM transactions
            WHERE type = $1::transaction_type
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            GROUP BY category
            ORDER BY total DESC
            "#,
        )
        .bind(kind)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;
        Ok(totals)
    }

    pub async fn project_expense_totals<'e, E>(
        &self,
        executor: E,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ProjectTotal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let totals = sqlx::query_as::<_, ProjectTotal>(
            r#"
            SELECT p.name AS project_name, SUM(t.amount) AS total
            FROM transactions t
            JOIN projects p ON t.related_project_id = p.id
            WHERE t.type = 'EXPENSE'
              AND ($1::date IS NULL OR t.date >= $1)
              AND ($2::date IS NULL OR t.date <= $2)
            GROUP BY p.name
            ORDER BY total DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;
        Ok(totals)
    }
}
