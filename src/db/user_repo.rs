// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{SystemUser, UserRole},
};

// O repositório de usuários, responsável pela tabela 'system_users'.
// Queries em runtime (`query_as` + bind), sem macro de verificação em
// tempo de compilação: o build não depende de um banco acessível.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

const USER_COLUMNS: &str =
    "id, username, password_hash, full_name, role, last_login, created_at";

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca case-insensitive: "Admin" e "admin" são o mesmo usuário
    pub async fn find_by_username(&self, username: &str) -> Result<Option<SystemUser>, AppError> {
        let maybe_user = sqlx::query_as::<_, SystemUser>(&format!(
            "SELECT {USER_COLUMNS} FROM system_users WHERE LOWER(username) = LOWER($1)"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SystemUser>, AppError> {
        let maybe_user = sqlx::query_as::<_, SystemUser>(&format!(
            "SELECT {USER_COLUMNS} FROM system_users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<SystemUser>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let users = sqlx::query_as::<_, SystemUser>(&format!(
            "SELECT {USER_COLUMNS} FROM system_users ORDER BY username ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(users)
    }

    pub async fn count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM system_users")
            .fetch_one(executor)
            .await?;
        Ok(count.0)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        username: &str,
        password_hash: &str,
        full_name: &str,
        role: UserRole,
    ) -> Result<SystemUser, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, SystemUser>(&format!(
            r#"
            INSERT INTO system_users (username, password_hash, full_name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    // O índice LOWER(username) da migration
                    return AppError::UsernameAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        username: &str,
        password_hash: Option<&str>,
        full_name: &str,
        role: UserRole,
    ) -> Result<SystemUser, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, SystemUser>(&format!(
            r#"
            UPDATE system_users
            SET username = $2,
                password_hash = COALESCE($3, password_hash),
                full_name = $4,
                role = $5
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UsernameAlreadyExists;
                }
            }
            AppError::from(e)
        })?
        .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM system_users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    pub async fn touch_last_login<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE system_users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
