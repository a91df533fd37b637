// src/services/inventory_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::{InventoryRepository, LogRepository},
    models::{
        auth::SystemUser,
        inventory::{
            DosageSuggestion, DosingApplyPayload, DosingSuggestPayload, InventoryItem,
            InventoryItemPayload, LowStockItem, MaintenanceLog,
        },
    },
    services::dosing,
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    log_repo: LogRepository,
    pool: PgPool,
}

// Linha de consumo já resolvida contra o estoque
struct UsageLine {
    item_id: Uuid,
    item_name: String,
    amount: Decimal,
}

fn empty_application_error(field: &'static str) -> AppError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("empty_application");
    error.message = Some("No hay químicos por aplicar según los niveles actuales.".into());
    errors.add(field, error);
    errors.into()
}

fn to_decimal(amount: f64) -> Result<Decimal, AppError> {
    Decimal::try_from(amount)
        .map(|d| d.round_dp(2))
        .map_err(|e| anyhow::anyhow!("Dose fora de alcance numérico: {}", e).into())
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, log_repo: LogRepository, pool: PgPool) -> Self {
        Self {
            inventory_repo,
            log_repo,
            pool,
        }
    }

    // =========================================================================
    //  ITENS
    // =========================================================================

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.inventory_repo.list_items(&self.pool).await
    }

    pub async fn create_item(
        &self,
        actor: &SystemUser,
        payload: &InventoryItemPayload,
    ) -> Result<InventoryItem, AppError> {
        let mut tx = self.pool.begin().await?;
        let item = self.inventory_repo.create_item(&mut *tx, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "INVENTARIO",
                &format!("Insumo creado: {}", item.name),
            )
            .await?;
        tx.commit().await?;
        Ok(item)
    }

    pub async fn update_item(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &InventoryItemPayload,
    ) -> Result<InventoryItem, AppError> {
        let mut tx = self.pool.begin().await?;
        let item = self.inventory_repo.update_item(&mut *tx, id, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "INVENTARIO",
                &format!("Insumo editado: {}", item.name),
            )
            .await?;
        tx.commit().await?;
        Ok(item)
    }

    pub async fn delete_item(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let item = self.inventory_repo.get_item(&self.pool, id).await?;

        let mut tx = self.pool.begin().await?;
        self.inventory_repo.delete_item(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "INVENTARIO",
                &format!("Insumo eliminado: {}", item.name),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn low_stock(&self) -> Result<Vec<LowStockItem>, AppError> {
        self.inventory_repo.list_low_stock(&self.pool).await
    }

    // =========================================================================
    //  DOSAGEM QUÍMICA
    // =========================================================================

    pub fn suggest_dosage(&self, payload: &DosingSuggestPayload) -> DosageSuggestion {
        dosing::suggest(&payload.readings, &payload.purity)
    }

    // Aplica a dosagem (sugerida ou manual) contra o estoque: valida tudo
    // primeiro, depois baixa as quantidades e grava a bitácora na mesma
    // transação. Ou tudo acontece, ou nada.
    pub async fn apply_dosage(
        &self,
        actor: &SystemUser,
        payload: &DosingApplyPayload,
    ) -> Result<MaintenanceLog, AppError> {
        let is_manual = payload.mapping.is_none();

        let lines = if let Some(mapping) = &payload.mapping {
            let suggestion = dosing::suggest(&payload.readings, &payload.purity);
            let wanted = [
                ("Cloro", mapping.chlorine_item_id, suggestion.chlorine_lb),
                ("Reductor pH", mapping.ph_down_item_id, suggestion.ph_down_lb),
                ("Alcalinidad", mapping.alkalinity_item_id, suggestion.alkalinity_lb),
            ];

            let mut lines = Vec::new();
            for (label, item_id, amount) in wanted {
                if amount <= 0.0 {
                    continue;
                }
                let item_id = item_id.ok_or_else(|| AppError::UnmappedReagent(label.to_string()))?;
                let item = match self.inventory_repo.get_item(&self.pool, item_id).await {
                    Ok(item) => item,
                    Err(AppError::NotFound) => {
                        return Err(AppError::UnmappedReagent(label.to_string()))
                    }
                    Err(e) => return Err(e),
                };
                let amount = to_decimal(amount)?;
                Self::check_stock(&item, amount)?;
                lines.push(UsageLine {
                    item_id,
                    item_name: item.name,
                    amount,
                });
            }
            if lines.is_empty() {
                return Err(empty_application_error("readings"));
            }
            lines
        } else {
            if payload.manual_items.is_empty() {
                return Err(empty_application_error("manualItems"));
            }
            let mut lines = Vec::new();
            for line in &payload.manual_items {
                let item = self.inventory_repo.get_item(&self.pool, line.item_id).await?;
                Self::check_stock(&item, line.amount)?;
                lines.push(UsageLine {
                    item_id: line.item_id,
                    item_name: item.name,
                    amount: line.amount,
                });
            }
            lines
        };

        let items_used = json!(lines
            .iter()
            .map(|l| {
                json!({
                    "itemId": l.item_id,
                    "itemName": l.item_name,
                    "amountUsed": l.amount,
                })
            })
            .collect::<Vec<_>>());

        let readings = &payload.readings;
        let (description, notes) = if is_manual {
            (
                "Descarga Manual de Insumos".to_string(),
                "Despacho manual de productos para mantenimiento correctivo.".to_string(),
            )
        } else {
            (
                "Ajuste Químico Sugerido (610k gal)".to_string(),
                format!(
                    "pH: {} -> {}. Sugerencia aplicada.",
                    readings.ph, readings.target_ph
                ),
            )
        };

        let mut tx = self.pool.begin().await?;
        for line in &lines {
            self.inventory_repo
                .adjust_quantity(&mut *tx, line.item_id, -line.amount)
                .await?;
        }
        let log = self
            .inventory_repo
            .insert_maintenance_log(
                &mut *tx,
                Utc::now().date_naive(),
                &actor.full_name,
                &description,
                &items_used,
                Some(&notes),
                Some(readings.ph),
                Some(readings.chlorine),
                Some(readings.alkalinity),
            )
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "APLICAR",
                "INVENTARIO",
                &format!("Dosificación aplicada ({} insumos)", lines.len()),
            )
            .await?;
        tx.commit().await?;

        Ok(log)
    }

    pub async fn maintenance_logs(&self) -> Result<Vec<MaintenanceLog>, AppError> {
        self.inventory_repo.list_maintenance_logs(&self.pool).await
    }

    fn check_stock(item: &InventoryItem, amount: Decimal) -> Result<(), AppError> {
        if item.quantity < amount {
            return Err(AppError::InsufficientStock(item.name.clone()));
        }
        Ok(())
    }
}
