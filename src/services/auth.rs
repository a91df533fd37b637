// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LogRepository, UserRepository},
    models::auth::{AuthResponse, Claims, CreateUserPayload, SystemUser, UpdateUserPayload},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    log_repo: LogRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        log_repo: LogRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            log_repo,
            jwt_secret,
            pool,
        }
    }

    // Garante que o sistema nunca nasce sem acesso: se a tabela de
    // usuários está vazia, semeia um administrador com credenciais
    // padrão. O banner no log existe para ninguém esquecer de trocá-las.
    pub async fn ensure_default_admin(&self) -> Result<(), AppError> {
        if self.user_repo.count(&self.pool).await? > 0 {
            return Ok(());
        }

        let hashed = tokio::task::spawn_blocking(|| hash("admin123", bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.user_repo
            .create(
                &self.pool,
                "admin",
                &hashed,
                "Administrador del Sistema",
                crate::models::auth::UserRole::Admin,
            )
            .await?;

        tracing::warn!("⚠️  Nenhum usuário encontrado: criado 'admin' / 'admin123'. TROQUE A SENHA.");
        Ok(())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // bcrypt é caro de propósito; fora do executor async
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.user_repo.touch_last_login(&self.pool, user.id).await?;
        self.log_repo
            .insert(
                &self.pool,
                Some(user.id),
                &user.full_name,
                "LOGIN",
                "AUTH",
                &format!("Inicio de sesión: {}", user.username),
            )
            .await?;

        let token = self.create_token(user.id)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn validate_token(&self, token: &str) -> Result<SystemUser, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    // =========================================================================
    //  GESTÃO DE USUÁRIOS (somente Admin, garantido pelo extractor de RBAC)
    // =========================================================================

    pub async fn list_users(&self) -> Result<Vec<SystemUser>, AppError> {
        self.user_repo.list_all(&self.pool).await
    }

    pub async fn create_user(
        &self,
        actor: &SystemUser,
        payload: &CreateUserPayload,
    ) -> Result<SystemUser, AppError> {
        let password_clone = payload.password.clone();
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let mut tx = self.pool.begin().await?;
        let user = self
            .user_repo
            .create(
                &mut *tx,
                &payload.username,
                &hashed,
                &payload.full_name,
                payload.role,
            )
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "USUARIO",
                &format!("Usuario creado: {}", user.username),
            )
            .await?;
        tx.commit().await?;

        Ok(user)
    }

    pub async fn update_user(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &UpdateUserPayload,
    ) -> Result<SystemUser, AppError> {
        let hashed = match &payload.password {
            Some(password) => {
                let password_clone = password.clone();
                let h = tokio::task::spawn_blocking(move || {
                    hash(&password_clone, bcrypt::DEFAULT_COST)
                })
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
                Some(h)
            }
            None => None,
        };

        let mut tx = self.pool.begin().await?;
        let user = self
            .user_repo
            .update(
                &mut *tx,
                id,
                &payload.username,
                hashed.as_deref(),
                &payload.full_name,
                payload.role,
            )
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "USUARIO",
                &format!("Usuario editado: {}", user.username),
            )
            .await?;
        tx.commit().await?;

        Ok(user)
    }

    pub async fn delete_user(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        // Um admin não pode se excluir logado
        if actor.id == id {
            return Err(AppError::Forbidden("users:manage"));
        }

        let mut tx = self.pool.begin().await?;
        self.user_repo.delete(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "USUARIO",
                &format!("Usuario eliminado: {}", id),
            )
            .await?;
        tx.commit().await?;

        Ok(())
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?;
        Ok(token)
    }
}
