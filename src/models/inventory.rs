// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,

    #[schema(example = "Cloro granulado 65%")]
    pub name: String,
    #[schema(example = "lb")]
    pub unit: String,
    #[schema(example = "350.00")]
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    #[schema(example = "50.00")]
    pub min_threshold: Decimal,
    #[schema(value_type = Option<String>, format = Date)]
    pub last_restock_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub unit_cost: Decimal,
    #[serde(default)]
    pub min_threshold: Decimal,
    #[schema(value_type = Option<String>, format = Date)]
    pub last_restock_date: Option<NaiveDate>,
}

fn default_unit() -> String {
    "lb".to_string()
}

// Bitácora de manutenção. items_used guarda
// [{ "itemId": ..., "itemName": ..., "amountUsed": ... }] como JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: Uuid,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub performed_by: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub items_used: Value,
    pub notes: Option<String>,
    pub ph_reading: Option<f64>,
    pub chlorine_reading: Option<f64>,
    pub alkalinity_reading: Option<f64>,
    pub created_at: DateTime<Utc>,
}

// --- Calculadora de dosagem química ---

#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaterReadings {
    #[schema(example = 7.8)]
    pub ph: f64,
    #[schema(example = 1.0)]
    pub chlorine: f64,
    #[schema(example = 80.0)]
    pub alkalinity: f64,
    #[schema(example = 7.4)]
    pub target_ph: f64,
    #[schema(example = 3.0)]
    pub target_chlorine: f64,
    #[schema(example = 100.0)]
    pub target_alkalinity: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReagentPurity {
    #[schema(example = 65.0)]
    pub chlorine_purity: f64,
    #[schema(example = 93.0)]
    pub ph_down_purity: f64,
    #[schema(example = 100.0)]
    pub alkalinity_purity: f64,
}

impl Default for ReagentPurity {
    fn default() -> Self {
        Self {
            chlorine_purity: 65.0,
            ph_down_purity: 93.0,
            alkalinity_purity: 100.0,
        }
    }
}

// Massa seca recomendada (lb), arredondada a 2 decimais
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DosageSuggestion {
    #[schema(example = 15.25)]
    pub chlorine_lb: f64,
    #[schema(example = 122.0)]
    pub ph_down_lb: f64,
    #[schema(example = 20.13)]
    pub alkalinity_lb: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DosingSuggestPayload {
    pub readings: WaterReadings,
    #[serde(default)]
    pub purity: ReagentPurity,
}

// Mapeia cada reagente a um item do inventário
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReagentMapping {
    pub chlorine_item_id: Option<Uuid>,
    pub ph_down_item_id: Option<Uuid>,
    pub alkalinity_item_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualUsageLine {
    pub item_id: Uuid,
    #[schema(example = "5.00")]
    pub amount: Decimal,
}

// Aplicação: ou a sugestão calculada (readings + mapping), ou descarga manual
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DosingApplyPayload {
    pub readings: WaterReadings,
    #[serde(default)]
    pub purity: ReagentPurity,
    pub mapping: Option<ReagentMapping>,
    #[serde(default)]
    pub manual_items: Vec<ManualUsageLine>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: Decimal,
    pub min_threshold: Decimal,
    pub unit: String,
}
