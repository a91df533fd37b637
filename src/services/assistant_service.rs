// src/services/assistant_service.rs

use serde_json::json;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, InventoryRepository, MemberRepository},
    models::assistant::AssistantReply,
};

const GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Clone)]
pub struct AssistantService {
    member_repo: MemberRepository,
    finance_repo: FinanceRepository,
    inventory_repo: InventoryRepository,
    client: reqwest::Client,
    api_key: Option<String>,
    pool: PgPool,
}

impl AssistantService {
    pub fn new(
        member_repo: MemberRepository,
        finance_repo: FinanceRepository,
        inventory_repo: InventoryRepository,
        api_key: Option<String>,
        pool: PgPool,
    ) -> Self {
        Self {
            member_repo,
            finance_repo,
            inventory_repo,
            client: reqwest::Client::new(),
            api_key,
            pool,
        }
    }

    // Gera um relatório em Markdown a partir do estado atual da Junta.
    // Sem retry: se o provedor falhar, o operador tenta de novo.
    pub async fn generate_report(&self, prompt: &str) -> Result<AssistantReply, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::AssistantUnavailable("API Key no configurada".to_string()))?;

        let snapshot = self.state_snapshot().await?;
        let system_prompt = format!(
            "Actúa como un experto administrador de la Junta Usuarios Piscina de Albrook.\n\
             Tienes acceso a los siguientes datos en formato JSON (Socios, Finanzas, Inventario, Bitácora):\n\
             {snapshot}\n\n\
             Tu trabajo es responder preguntas sobre el estado de la piscina, generar reportes financieros,\n\
             resúmenes de mantenimiento, o borradores de comunicados para la comunidad de socios.\n\
             Siempre refiérete a la organización como \"la Junta\".\n\
             Sé conciso, profesional y servicial. Usa formato Markdown para la respuesta.\n\
             Si te piden datos financieros, haz los cálculos basándote en la lista de transacciones provista."
        );

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{GEMINI_MODEL}:generateContent"
        );
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.3 }
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AssistantUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AssistantUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::AssistantUnavailable(e.to_string()))?;

        let report = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("No se pudo generar el reporte.")
            .to_string();

        Ok(AssistantReply { report })
    }

    async fn state_snapshot(&self) -> Result<String, AppError> {
        let members = self.member_repo.list_all(&self.pool).await?;
        let accounts = self.finance_repo.list_accounts(&self.pool).await?;
        let transactions = self.finance_repo.list_transactions(&self.pool).await?;
        let inventory = self.inventory_repo.list_items(&self.pool).await?;
        let maintenance = self.inventory_repo.list_maintenance_logs(&self.pool).await?;

        let snapshot = json!({
            "members": members,
            "bankAccounts": accounts,
            "transactions": transactions,
            "inventory": inventory,
            "maintenanceLogs": maintenance,
        });
        Ok(snapshot.to_string())
    }
}
