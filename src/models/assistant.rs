// src/models/assistant.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantPrompt {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Genera un resumen financiero del mes para los socios.")]
    pub prompt: String,
}

// Resposta em Markdown, pronta para renderizar no painel
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub report: String,
}
