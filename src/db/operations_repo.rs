// src/db/operations_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::operations::{
        PaymentStatus, Project, ProjectPayload, ProjectTask, ProjectTaskPayload, PurchaseOrder,
        PurchaseOrderPayload, ServiceOrder, ServiceOrderPayload,
    },
};

#[derive(Clone)]
pub struct OperationsRepository {
    pool: PgPool,
}

const PROJECT_COLUMNS: &str = "id, name, description, start_date, end_date, budget, \
     status, priority, execution_order, progress, created_at";

const TASK_COLUMNS: &str =
    "id, project_id, name, assigned_to, start_date, end_date, estimated_cost, status";

const SERVICE_COLUMNS: &str = "id, title, description, service_type, responsible, start_date, \
     deadline, status, estimated_cost, actual_cost, materials, payment_status, \
     related_transaction_id, created_at";

const PURCHASE_COLUMNS: &str = "id, supplier_id, supplier_name, date, status, items, \
     total_amount, payment_status, related_transaction_id, created_at";

impl OperationsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PROJETOS
    // =========================================================================

    pub async fn list_projects<'e, E>(&self, executor: E) -> Result<Vec<Project>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY execution_order ASC, name ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(projects)
    }

    pub async fn list_tasks<'e, E>(
        &self,
        executor: E,
        project_id: Uuid,
    ) -> Result<Vec<ProjectTask>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tasks = sqlx::query_as::<_, ProjectTask>(&format!(
            "SELECT {TASK_COLUMNS} FROM project_tasks WHERE project_id = $1 ORDER BY start_date ASC NULLS LAST"
        ))
        .bind(project_id)
        .fetch_all(executor)
        .await?;
        Ok(tasks)
    }

    pub async fn list_all_tasks<'e, E>(&self, executor: E) -> Result<Vec<ProjectTask>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tasks = sqlx::query_as::<_, ProjectTask>(&format!(
            "SELECT {TASK_COLUMNS} FROM project_tasks ORDER BY project_id, start_date ASC NULLS LAST"
        ))
        .fetch_all(executor)
        .await?;
        Ok(tasks)
    }

    pub async fn create_project<'e, E>(
        &self,
        executor: E,
        payload: &ProjectPayload,
    ) -> Result<Project, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (
                name, description, start_date, end_date, budget,
                status, priority, execution_order, progress
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.budget)
        .bind(payload.status)
        .bind(payload.priority)
        .bind(payload.execution_order)
        .bind(payload.progress)
        .fetch_one(executor)
        .await?;
        Ok(project)
    }

    pub async fn update_project<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &ProjectPayload,
    ) -> Result<Project, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects SET
                name = $2, description = $3, start_date = $4, end_date = $5,
                budget = $6, status = $7, priority = $8,
                execution_order = $9, progress = $10
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.budget)
        .bind(payload.status)
        .bind(payload.priority)
        .bind(payload.execution_order)
        .bind(payload.progress)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(project)
    }

    pub async fn delete_project<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // Cada gravação de projeto substitui o conjunto de tarefas inteiro
    pub async fn replace_tasks<'e, E>(
        &self,
        executor: E,
        project_id: Uuid,
        tasks: &[ProjectTaskPayload],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        sqlx::query("DELETE FROM project_tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        for task in tasks {
            sqlx::query(
                r#"
                INSERT INTO project_tasks (
                    project_id, name, assigned_to, start_date, end_date,
                    estimated_cost, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(project_id)
            .bind(&task.name)
            .bind(&task.assigned_to)
            .bind(task.start_date)
            .bind(task.end_date)
            .bind(task.estimated_cost)
            .bind(task.status)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  ORDENS DE SERVIÇO
    // =========================================================================

    pub async fn list_service_orders<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<ServiceOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, ServiceOrder>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service_orders ORDER BY start_date DESC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(orders)
    }

    pub async fn get_service_order<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, ServiceOrder>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service_orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(order)
    }

    pub async fn create_service_order<'e, E>(
        &self,
        executor: E,
        payload: &ServiceOrderPayload,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, ServiceOrder>(&format!(
            r#"
            INSERT INTO service_orders (
                title, description, service_type, responsible, start_date,
                deadline, status, estimated_cost, actual_cost, materials
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.service_type)
        .bind(&payload.responsible)
        .bind(payload.start_date)
        .bind(payload.deadline)
        .bind(payload.status)
        .bind(payload.estimated_cost)
        .bind(payload.actual_cost)
        .bind(&payload.materials)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn update_service_order<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &ServiceOrderPayload,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, ServiceOrder>(&format!(
            r#"
            UPDATE service_orders SET
                title = $2, description = $3, service_type = $4, responsible = $5,
                start_date = $6, deadline = $7, status = $8,
                estimated_cost = $9, actual_cost = $10, materials = $11
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.service_type)
        .bind(&payload.responsible)
        .bind(payload.start_date)
        .bind(payload.deadline)
        .bind(payload.status)
        .bind(payload.estimated_cost)
        .bind(payload.actual_cost)
        .bind(&payload.materials)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(order)
    }

    pub async fn delete_service_order<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM service_orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn mark_service_order_paid<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE service_orders SET payment_status = $2, related_transaction_id = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(PaymentStatus::Paid)
        .bind(transaction_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // =========================================================================
    //  ORDENS DE COMPRA
    // =========================================================================

    pub async fn list_purchase_orders<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<PurchaseOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, PurchaseOrder>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchase_orders ORDER BY date DESC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(orders)
    }

    pub async fn get_purchase_order<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<PurchaseOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, PurchaseOrder>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchase_orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(order)
    }

    pub async fn create_purchase_order<'e, E>(
        &self,
        executor: E,
        payload: &PurchaseOrderPayload,
    ) -> Result<PurchaseOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, PurchaseOrder>(&format!(
            r#"
            INSERT INTO purchase_orders (supplier_id, supplier_name, date, status, items, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(payload.supplier_id)
        .bind(&payload.supplier_name)
        .bind(payload.date)
        .bind(payload.status)
        .bind(&payload.items)
        .bind(payload.total_amount)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn update_purchase_order<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &PurchaseOrderPayload,
    ) -> Result<PurchaseOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, PurchaseOrder>(&format!(
            r#"
            UPDATE purchase_orders SET
                supplier_id = $2, supplier_name = $3, date = $4,
                status = $5, items = $6, total_amount = $7
            WHERE id = $1
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.supplier_id)
        .bind(&payload.supplier_name)
        .bind(payload.date)
        .bind(payload.status)
        .bind(&payload.items)
        .bind(payload.total_amount)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(order)
    }

    pub async fn delete_purchase_order<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM purchase_orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn mark_purchase_order_paid<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE purchase_orders SET payment_status = $2, status = 'PAID', related_transaction_id = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(PaymentStatus::Paid)
        .bind(transaction_id)
        .execute(executor)
        .await?;
        Ok(())
    }
}
