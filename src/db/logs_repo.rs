// src/db/logs_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::logs::SystemLog};

#[derive(Clone)]
pub struct LogRepository {
    pool: PgPool,
}

impl LogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        user_id: Option<Uuid>,
        user_name: &str,
        action: &str,
        entity: &str,
        details: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO system_logs (user_id, user_name, action, entity, details)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
        .bind(user_name)
        .bind(action)
        .bind(entity)
        .bind(details)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Somente os 500 registros mais recentes; a trilha completa fica no banco.
    pub async fn list_recent<'e, E>(&self, executor: E) -> Result<Vec<SystemLog>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let logs = sqlx::query_as::<_, SystemLog>(
            r#"
            SELECT id, timestamp, user_id, user_name, action, entity, details
            FROM system_logs
            ORDER BY timestamp DESC
            LIMIT 500
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(logs)
    }
}
