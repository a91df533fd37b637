// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::common::error::AppError;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Soma dos saldos derivados de todas as contas.
    pub async fn total_balance<'e, E>(&self, executor: E) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(
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
                ), 0)
            ), 0)
            FROM bank_accounts a
            "#,
        )
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    pub async fn active_member_count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM members WHERE status = 'ACTIVE'")
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    pub async fn low_stock_count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM inventory_items WHERE quantity <= min_threshold")
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    pub async fn month_total_by_type<'e, E>(
        &self,
        executor: E,
        kind: &str,
        month_start: NaiveDate,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE type = $1::transaction_type
              AND date >= $2
              AND date < $2 + INTERVAL '1 month'
            "#,
        )
        .bind(kind)
        .bind(month_start)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }
}
