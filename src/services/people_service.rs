// src/services/people_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LogRepository, PeopleRepository},
    models::{
        auth::SystemUser,
        people::{
            BoardMember, BoardMemberPayload, Employee, EmployeePayload, Supplier, SupplierPayload,
        },
    },
};

#[derive(Clone)]
pub struct PeopleService {
    people_repo: PeopleRepository,
    log_repo: LogRepository,
    pool: PgPool,
}

impl PeopleService {
    pub fn new(people_repo: PeopleRepository, log_repo: LogRepository, pool: PgPool) -> Self {
        Self {
            people_repo,
            log_repo,
            pool,
        }
    }

    // =========================================================================
    //  FORNECEDORES
    // =========================================================================

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.people_repo.list_suppliers(&self.pool).await
    }

    pub async fn create_supplier(
        &self,
        actor: &SystemUser,
        payload: &SupplierPayload,
    ) -> Result<Supplier, AppError> {
        let mut tx = self.pool.begin().await?;
        let supplier = self.people_repo.create_supplier(&mut *tx, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "PROVEEDOR",
                &format!("Proveedor creado: {}", supplier.business_name),
            )
            .await?;
        tx.commit().await?;
        Ok(supplier)
    }

    pub async fn update_supplier(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &SupplierPayload,
    ) -> Result<Supplier, AppError> {
        let mut tx = self.pool.begin().await?;
        let supplier = self.people_repo.update_supplier(&mut *tx, id, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "PROVEEDOR",
                &format!("Proveedor editado: {}", supplier.business_name),
            )
            .await?;
        tx.commit().await?;
        Ok(supplier)
    }

    pub async fn delete_supplier(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let supplier = self.people_repo.get_supplier(&self.pool, id).await?;

        let mut tx = self.pool.begin().await?;
        self.people_repo.delete_supplier(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "PROVEEDOR",
                &format!("Proveedor eliminado: {}", supplier.business_name),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  DIRETORIA
    // =========================================================================

    pub async fn list_board_members(&self) -> Result<Vec<BoardMember>, AppError> {
        self.people_repo.list_board_members(&self.pool).await
    }

    pub async fn create_board_member(
        &self,
        actor: &SystemUser,
        payload: &BoardMemberPayload,
    ) -> Result<BoardMember, AppError> {
        let mut tx = self.pool.begin().await?;
        let member = self.people_repo.create_board_member(&mut *tx, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "DIRECTIVA",
                &format!("Miembro de junta creado: {}", member.full_name),
            )
            .await?;
        tx.commit().await?;
        Ok(member)
    }

    pub async fn update_board_member(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &BoardMemberPayload,
    ) -> Result<BoardMember, AppError> {
        let mut tx = self.pool.begin().await?;
        let member = self
            .people_repo
            .update_board_member(&mut *tx, id, payload)
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "DIRECTIVA",
                &format!("Miembro de junta editado: {}", member.full_name),
            )
            .await?;
        tx.commit().await?;
        Ok(member)
    }

    pub async fn delete_board_member(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        self.people_repo.delete_board_member(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "DIRECTIVA",
                &format!("Miembro de junta eliminado: {}", id),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  FUNCIONÁRIOS
    // =========================================================================

    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        self.people_repo.list_employees(&self.pool).await
    }

    pub async fn create_employee(
        &self,
        actor: &SystemUser,
        payload: &EmployeePayload,
    ) -> Result<Employee, AppError> {
        let mut tx = self.pool.begin().await?;
        let employee = self.people_repo.create_employee(&mut *tx, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "EMPLEADO",
                &format!("Empleado creado: {}", employee.full_name),
            )
            .await?;
        tx.commit().await?;
        Ok(employee)
    }

    pub async fn update_employee(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &EmployeePayload,
    ) -> Result<Employee, AppError> {
        let mut tx = self.pool.begin().await?;
        let employee = self.people_repo.update_employee(&mut *tx, id, payload).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "EMPLEADO",
                &format!("Empleado editado: {}", employee.full_name),
            )
            .await?;
        tx.commit().await?;
        Ok(employee)
    }

    pub async fn delete_employee(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        self.people_repo.delete_employee(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "EMPLEADO",
                &format!("Empleado eliminado: {}", id),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
