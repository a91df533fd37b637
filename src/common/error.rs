use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Username já existe")]
    UsernameAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Permissão insuficiente: {0}")]
    Forbidden(&'static str),

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Transferência exige contas de origem e destino distintas")]
    SameAccountTransfer,

    #[error("Sócio sem dívida pendente")]
    NoOutstandingDebt,

    #[error("Obrigação já quitada")]
    AlreadyPaid,

    #[error("Estoque insuficiente: {0}")]
    InsufficientStock(String),

    #[error("Insumo não vinculado: {0}")]
    UnmappedReagent(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Assistente indisponível: {0}")]
    AssistantUnavailable(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// Resposta de erro já pronta para o cliente, com mensagem no idioma pedido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Converte o erro interno em resposta HTTP com mensagem localizada
    /// (es = idioma dos operadores, en = fallback).
    pub fn localize(self, locale: &Locale) -> ApiError {
        let es = locale.0 == "es";

        let (status, error): (StatusCode, String) = match &self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                return ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: if es {
                        "Uno o más campos son inválidos.".into()
                    } else {
                        "One or more fields are invalid.".into()
                    },
                    details: Some(json!(details)),
                };
            }
            AppError::UsernameAlreadyExists => (
                StatusCode::CONFLICT,
                if es {
                    "Ese nombre de usuario ya está en uso.".into()
                } else {
                    "That username is already taken.".into()
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                if es {
                    "Credenciales incorrectas.".into()
                } else {
                    "Invalid username or password.".into()
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                if es {
                    "Token de autenticación inválido o ausente.".into()
                } else {
                    "Missing or invalid authentication token.".into()
                },
            ),
            AppError::UserNotFound => (
                StatusCode::NOT_FOUND,
                if es {
                    "Usuario no encontrado.".into()
                } else {
                    "User not found.".into()
                },
            ),
            AppError::Forbidden(slug) => (
                StatusCode::FORBIDDEN,
                if es {
                    format!("Su rol no tiene el permiso '{}'.", slug)
                } else {
                    format!("Your role lacks the '{}' permission.", slug)
                },
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                if es {
                    "Registro no encontrado.".into()
                } else {
                    "Record not found.".into()
                },
            ),
            AppError::SameAccountTransfer => (
                StatusCode::BAD_REQUEST,
                if es {
                    "La cuenta de origen y destino no pueden ser la misma.".into()
                } else {
                    "Source and destination accounts must differ.".into()
                },
            ),
            AppError::NoOutstandingDebt => (
                StatusCode::BAD_REQUEST,
                if es {
                    "El socio no registra deuda pendiente.".into()
                } else {
                    "The member has no outstanding debt.".into()
                },
            ),
            AppError::AlreadyPaid => (
                StatusCode::CONFLICT,
                if es {
                    "La obligación ya fue pagada.".into()
                } else {
                    "The obligation is already paid.".into()
                },
            ),
            AppError::InsufficientStock(item) => (
                StatusCode::CONFLICT,
                if es {
                    format!("Stock insuficiente de {}.", item)
                } else {
                    format!("Insufficient stock of {}.", item)
                },
            ),
            AppError::UnmappedReagent(label) => (
                StatusCode::BAD_REQUEST,
                if es {
                    format!("El producto {} no está vinculado correctamente.", label)
                } else {
                    format!("Reagent {} is not mapped to an inventory item.", label)
                },
            ),
            AppError::AssistantUnavailable(reason) => (
                StatusCode::BAD_GATEWAY,
                if es {
                    format!("Error al conectar con el asistente inteligente: {}", reason)
                } else {
                    format!("The assistant service is unavailable: {}", reason)
                },
            ),
            // Todos os outros (DatabaseError, InternalServerError, Bcrypt, JWT, Fontes)
            // viram 500. O `tracing` loga a mensagem detalhada.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    if es {
                        "Ocurrió un error inesperado.".into()
                    } else {
                        "An unexpected error occurred.".into()
                    },
                )
            }
        };

        ApiError {
            status,
            error,
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.error, "details": details })),
            None => Json(json!({ "error": self.error })),
        };
        (self.status, body).into_response()
    }
}

// Fallback em inglês para camadas que não têm o Locale em mãos (middlewares).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.localize(&Locale::default()).into_response()
    }
}
