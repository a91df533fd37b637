// src/db/member_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::members::{Member, MemberPayload},
};

#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

const MEMBER_COLUMNS: &str = "id, full_name, email, phone, family_members, join_date, \
     status, category, parent_member_id, last_payment_date, monthly_fee, \
     photo_url, occupation, created_at, updated_at";

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Member>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY full_name ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(members)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Member, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(member)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        payload: &MemberPayload,
    ) -> Result<Member, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, Member>(&format!(
            r#"
            INSERT INTO members (
                full_name, email, phone, family_members, join_date, status,
                category, parent_member_id, last_payment_date, monthly_fee,
                photo_url, occupation
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(&payload.full_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.family_members)
        .bind(&payload.join_date)
        .bind(payload.status)
        .bind(payload.category)
        .bind(payload.parent_member_id)
        .bind(payload.last_payment_date)
        .bind(payload.monthly_fee)
        .bind(&payload.photo_url)
        .bind(&payload.occupation)
        .fetch_one(executor)
        .await?;
        Ok(member)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &MemberPayload,
    ) -> Result<Member, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, Member>(&format!(
            r#"
            UPDATE members SET
                full_name = $2, email = $3, phone = $4, family_members = $5,
                join_date = $6, status = $7, category = $8,
                parent_member_id = $9, last_payment_date = $10,
                monthly_fee = $11, photo_url = $12, occupation = $13,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.full_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.family_members)
        .bind(&payload.join_date)
        .bind(payload.status)
        .bind(payload.category)
        .bind(payload.parent_member_id)
        .bind(payload.last_payment_date)
        .bind(payload.monthly_fee)
        .bind(&payload.photo_url)
        .bind(&payload.occupation)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(member)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn set_last_payment_date<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        date: NaiveDate,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE members SET last_payment_date = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(date)
                .execute(executor)
                .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
