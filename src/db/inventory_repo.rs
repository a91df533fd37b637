// src/db/inventory_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{InventoryItem, InventoryItemPayload, LowStockItem, MaintenanceLog},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

const ITEM_COLUMNS: &str =
    "id, name, unit, quantity, unit_cost, min_threshold, last_restock_date, created_at";

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_items<'e, E>(&self, executor: E) -> Result<Vec<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items ORDER BY name ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn get_item<'e, E>(&self, executor: E, id: Uuid) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(item)
    }

    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        payload: &InventoryItemPayload,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            INSERT INTO inventory_items (name, unit, quantity, unit_cost, min_threshold, last_restock_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(&payload.name)
        .bind(&payload.unit)
        .bind(payload.quantity)
        .bind(payload.unit_cost)
        .bind(payload.min_threshold)
        .bind(payload.last_restock_date)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &InventoryItemPayload,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            UPDATE inventory_items SET
                name = $2, unit = $3, quantity = $4, unit_cost = $5,
                min_threshold = $6, last_restock_date = $7
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.unit)
        .bind(payload.quantity)
        .bind(payload.unit_cost)
        .bind(payload.min_threshold)
        .bind(payload.last_restock_date)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(item)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // Baixa de estoque; delta negativo. A validação de saldo acontece no
    // serviço, dentro da mesma transação.
    pub async fn adjust_quantity<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE inventory_items SET quantity = ROUND(quantity + $2, 2) WHERE id = $1")
                .bind(id)
                .bind(delta)
                .execute(executor)
                .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn list_low_stock<'e, E>(&self, executor: E) -> Result<Vec<LowStockItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, LowStockItem>(
            r#"
            SELECT id, name, quantity, min_threshold, unit
            FROM inventory_items
            WHERE quantity <= min_threshold
            ORDER BY quantity ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    // =========================================================================
    //  BITÁCORA DE MANUTENÇÃO
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_maintenance_log<'e, E>(
        &self,
        executor: E,
        date: NaiveDate,
        performed_by: &str,
        description: &str,
        items_used: &Value,
        notes: Option<&str>,
        ph: Option<f64>,
        chlorine: Option<f64>,
        alkalinity: Option<f64>,
    ) -> Result<MaintenanceLog, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            INSERT INTO maintenance_logs (
                date, performed_by, description, items_used, notes,
                ph_reading, chlorine_reading, alkalinity_reading
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, date, performed_by, description, items_used, notes,
                      ph_reading, chlorine_reading, alkalinity_reading, created_at
            "#,
        )
        .bind(date)
        .bind(performed_by)
        .bind(description)
        .bind(items_used)
        .bind(notes)
        .bind(ph)
        .bind(chlorine)
        .bind(alkalinity)
        .fetch_one(executor)
        .await?;
        Ok(log)
    }

    pub async fn list_maintenance_logs<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<MaintenanceLog>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let logs = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            SELECT id, date, performed_by, description, items_used, notes,
                   ph_reading, chlorine_reading, alkalinity_reading, created_at
            FROM maintenance_logs
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(logs)
    }
}
