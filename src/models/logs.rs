// src/models/logs.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Trilha de auditoria: cada operação de escrita acrescenta uma entrada.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemLog {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<Uuid>,
    #[schema(example = "María Delgado")]
    pub user_name: String,
    #[schema(example = "CREAR")]
    pub action: String,
    #[schema(example = "Finanzas")]
    pub entity: String,
    #[schema(example = "Saldó deuda de socio: Carlos Espinosa ($45.00)")]
    pub details: String,
}
