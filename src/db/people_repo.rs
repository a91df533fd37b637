// src/db/people_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::people::{
        BoardMember, BoardMemberPayload, Employee, EmployeePayload, Supplier, SupplierPayload,
    },
};

#[derive(Clone)]
pub struct PeopleRepository {
    pool: PgPool,
}

const SUPPLIER_COLUMNS: &str =
    "id, business_name, ruc, address, phone, email, contact_name, created_at";

const BOARD_COLUMNS: &str =
    "id, full_name, role, period_start, period_end, email, phone, active, created_at";

const EMPLOYEE_COLUMNS: &str = "id, full_name, cedula, position, start_date, base_salary, \
     email, phone, status, payment_method, account_number, bank_name, created_at";

impl PeopleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FORNECEDORES
    // =========================================================================

    pub async fn list_suppliers<'e, E>(&self, executor: E) -> Result<Vec<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY business_name ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(suppliers)
    }

    pub async fn get_supplier<'e, E>(&self, executor: E, id: Uuid) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(supplier)
    }

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        payload: &SupplierPayload,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            INSERT INTO suppliers (business_name, ruc, address, phone, email, contact_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SUPPLIER_COLUMNS}
            "#
        ))
        .bind(&payload.business_name)
        .bind(&payload.ruc)
        .bind(&payload.address)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.contact_name)
        .fetch_one(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn update_supplier<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &SupplierPayload,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            UPDATE suppliers SET
                business_name = $2, ruc = $3, address = $4,
                phone = $5, email = $6, contact_name = $7
            WHERE id = $1
            RETURNING {SUPPLIER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.business_name)
        .bind(&payload.ruc)
        .bind(&payload.address)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.contact_name)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(supplier)
    }

    pub async fn delete_supplier<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  DIRETORIA
    // =========================================================================

    pub async fn list_board_members<'e, E>(&self, executor: E) -> Result<Vec<BoardMember>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let board = sqlx::query_as::<_, BoardMember>(&format!(
            "SELECT {BOARD_COLUMNS} FROM board_members ORDER BY period_start DESC, full_name ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(board)
    }

    pub async fn create_board_member<'e, E>(
        &self,
        executor: E,
        payload: &BoardMemberPayload,
    ) -> Result<BoardMember, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, BoardMember>(&format!(
            r#"
            INSERT INTO board_members (full_name, role, period_start, period_end, email, phone, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BOARD_COLUMNS}
            "#
        ))
        .bind(&payload.full_name)
        .bind(payload.role)
        .bind(payload.period_start)
        .bind(payload.period_end)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.active)
        .fetch_one(executor)
        .await?;
        Ok(member)
    }

    pub async fn update_board_member<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &BoardMemberPayload,
    ) -> Result<BoardMember, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, BoardMember>(&format!(
            r#"
            UPDATE board_members SET
                full_name = $2, role = $3, period_start = $4, period_end = $5,
                email = $6, phone = $7, active = $8
            WHERE id = $1
            RETURNING {BOARD_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.full_name)
        .bind(payload.role)
        .bind(payload.period_start)
        .bind(payload.period_end)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.active)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(member)
    }

    pub async fn delete_board_member<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM board_members WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  FUNCIONÁRIOS
    // =========================================================================

    pub async fn list_employees<'e, E>(&self, executor: E) -> Result<Vec<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY full_name ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(employees)
    }

    pub async fn create_employee<'e, E>(
        &self,
        executor: E,
        payload: &EmployeePayload,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (
                full_name, cedula, position, start_date, base_salary,
                email, phone, status, payment_method, account_number, bank_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&payload.full_name)
        .bind(&payload.cedula)
        .bind(&payload.position)
        .bind(payload.start_date)
        .bind(payload.base_salary)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.status)
        .bind(payload.payment_method)
        .bind(&payload.account_number)
        .bind(&payload.bank_name)
        .fetch_one(executor)
        .await?;
        Ok(employee)
    }

    pub async fn update_employee<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &EmployeePayload,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees SET
                full_name = $2, cedula = $3, position = $4, start_date = $5,
                base_salary = $6, email = $7, phone = $8, status = $9,
                payment_method = $10, account_number = $11, bank_name = $12
            WHERE id = $1
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.full_name)
        .bind(&payload.cedula)
        .bind(&payload.position)
        .bind(payload.start_date)
        .bind(payload.base_salary)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.status)
        .bind(payload.payment_method)
        .bind(&payload.account_number)
        .bind(&payload.bank_name)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(employee)
    }

    pub async fn delete_employee<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
