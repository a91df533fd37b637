// src/services/operations_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, LogRepository, OperationsRepository},
    models::{
        auth::SystemUser,
        finance::{Transaction, TransactionPayload, TransactionType},
        operations::{
            PayObligationPayload, PayableEntry, PayableKind, PayableReport, PaymentStatus,
            Project, ProjectPayload, ProjectWithTasks, PurchaseOrder, PurchaseOrderPayload,
            PurchaseStatus, ServiceOrder, ServiceOrderPayload, ServiceStatus,
        },
    },
};

#[derive(Clone)]
pub struct OperationsService {
    operations_repo: OperationsRepository,
    finance_repo: FinanceRepository,
    log_repo: LogRepository,
    pool: PgPool,
}

// Referência curta da ordem de compra, no padrão dos comprovantes antigos
fn purchase_reference(id: Uuid) -> String {
    let id = id.to_string();
    format!("Orden Compra #{}", &id[id.len() - 4..])
}

// CxP em aberto: serviços concluídos ou em andamento ainda não pagos
// (cancelados nunca geram dívida) e compras efetivadas com pagamento
// pendente (rascunhos ainda não comprometem caixa).
pub fn compute_payables(
    service_orders: &[ServiceOrder],
    purchase_orders: &[PurchaseOrder],
) -> PayableReport {
    let mut payables: Vec<PayableEntry> = Vec::new();

    for so in service_orders {
        let billable = so.status == ServiceStatus::Completed || so.status == ServiceStatus::InProgress;
        if so.status == ServiceStatus::Cancelled
            || so.payment_status != PaymentStatus::Pending
            || !billable
        {
            continue;
        }
        payables.push(PayableEntry {
            id: so.id,
            kind: PayableKind::Service,
            reference: so.title.clone(),
            beneficiary: so.responsible.clone(),
            date: so.start_date,
            amount: so.actual_cost.unwrap_or(so.estimated_cost),
        });
    }

    for po in purchase_orders {
        if po.status == PurchaseStatus::Cancelled
            || po.status == PurchaseStatus::Draft
            || po.payment_status != PaymentStatus::Pending
        {
            continue;
        }
        payables.push(PayableEntry {
            id: po.id,
            kind: PayableKind::Purchase,
            reference: purchase_reference(po.id),
            beneficiary: po.supplier_name.clone(),
            date: po.date,
            amount: po.total_amount,
        });
    }

    payables.sort_by(|a, b| b.amount.cmp(&a.amount));
    let total_payable: Decimal = payables.iter().map(|p| p.amount).sum();
    PayableReport {
        total_payable,
        payables,
    }
}

impl OperationsService {
    pub fn new(
        operations_repo: OperationsRepository,
        finance_repo: FinanceRepository,
        log_repo: LogRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            operations_repo,
            finance_repo,
            log_repo,
            pool,
        }
    }

    // =========================================================================
    //  PROJETOS
    // =========================================================================

    pub async fn list_projects(&self) -> Result<Vec<ProjectWithTasks>, AppError> {
        let projects = self.operations_repo.list_projects(&self.pool).await?;
        let mut tasks = self.operations_repo.list_all_tasks(&self.pool).await?;

        let mut result: Vec<ProjectWithTasks> = projects
            .into_iter()
            .map(|project| ProjectWithTasks {
                project,
                tasks: Vec::new(),
            })
            .collect();
        for task in tasks.drain(..) {
            if let Some(entry) = result.iter_mut().find(|p| p.project.id == task.project_id) {
                entry.tasks.push(task);
            }
        }
        Ok(result)
    }

    pub async fn create_project(
        &self,
        actor: &SystemUser,
        payload: &ProjectPayload,
    ) -> Result<ProjectWithTasks, AppError> {
        let mut tx = self.pool.begin().await?;
        let project = self.operations_repo.create_project(&mut *tx, payload).await?;
        self.operations_repo
            .replace_tasks(&mut *tx, project.id, &payload.tasks)
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "PROYECTO",
                &format!("Proyecto creado: {}", project.name),
            )
            .await?;
        tx.commit().await?;

        let tasks = self.operations_repo.list_tasks(&self.pool, project.id).await?;
        Ok(ProjectWithTasks { project, tasks })
    }

    pub async fn update_project(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &ProjectPayload,
    ) -> Result<ProjectWithTasks, AppError> {
        let mut tx = self.pool.begin().await?;
        let project = self.operations_repo.update_project(&mut *tx, id, payload).await?;
        self.operations_repo
            .replace_tasks(&mut *tx, id, &payload.tasks)
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "PROYECTO",
                &format!("Proyecto editado: {}", project.name),
            )
            .await?;
        tx.commit().await?;

        let tasks = self.operations_repo.list_tasks(&self.pool, id).await?;
        Ok(ProjectWithTasks { project, tasks })
    }

    pub async fn delete_project(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        self.operations_repo.delete_project(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "PROYECTO",
                &format!("Proyecto eliminado: {}", id),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  ORDENS DE SERVIÇO
    // =========================================================================

    pub async fn list_service_orders(&self) -> Result<Vec<ServiceOrder>, AppError> {
        self.operations_repo.list_service_orders(&self.pool).await
    }

    pub async fn create_service_order(
        &self,
        actor: &SystemUser,
        payload: &ServiceOrderPayload,
    ) -> Result<ServiceOrder, AppError> {
        let mut tx = self.pool.begin().await?;
        let order = self
            .operations_repo
            .create_service_order(&mut *tx, payload)
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "SERVICIO",
                &format!("Orden de servicio creada: {}", order.title),
            )
            .await?;
        tx.commit().await?;
        Ok(order)
    }

    pub async fn update_service_order(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &ServiceOrderPayload,
    ) -> Result<ServiceOrder, AppError> {
        let mut tx = self.pool.begin().await?;
        let order = self
            .operations_repo
            .update_service_order(&mut *tx, id, payload)
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "SERVICIO",
                &format!("Orden de servicio editada: {}", order.title),
            )
            .await?;
        tx.commit().await?;
        Ok(order)
    }

    pub async fn delete_service_order(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let order = self.operations_repo.get_service_order(&self.pool, id).await?;

        let mut tx = self.pool.begin().await?;
        self.operations_repo.delete_service_order(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "SERVICIO",
                &format!("Orden de servicio eliminada: {}", order.title),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  ORDENS DE COMPRA
    // =========================================================================

    pub async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>, AppError> {
        self.operations_repo.list_purchase_orders(&self.pool).await
    }

    pub async fn create_purchase_order(
        &self,
        actor: &SystemUser,
        payload: &PurchaseOrderPayload,
    ) -> Result<PurchaseOrder, AppError> {
        let mut tx = self.pool.begin().await?;
        let order = self
            .operations_repo
            .create_purchase_order(&mut *tx, payload)
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "CREAR",
                "COMPRA",
                &format!("Orden de compra creada: {}", order.supplier_name),
            )
            .await?;
        tx.commit().await?;
        Ok(order)
    }

    pub async fn update_purchase_order(
        &self,
        actor: &SystemUser,
        id: Uuid,
        payload: &PurchaseOrderPayload,
    ) -> Result<PurchaseOrder, AppError> {
        let mut tx = self.pool.begin().await?;
        let order = self
            .operations_repo
            .update_purchase_order(&mut *tx, id, payload)
            .await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "EDITAR",
                "COMPRA",
                &format!("Orden de compra editada: {}", order.supplier_name),
            )
            .await?;
        tx.commit().await?;
        Ok(order)
    }

    pub async fn delete_purchase_order(&self, actor: &SystemUser, id: Uuid) -> Result<(), AppError> {
        let order = self.operations_repo.get_purchase_order(&self.pool, id).await?;

        let mut tx = self.pool.begin().await?;
        self.operations_repo.delete_purchase_order(&mut *tx, id).await?;
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "ELIMINAR",
                "COMPRA",
                &format!("Orden de compra eliminada: {}", order.supplier_name),
            )
            .await?;
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    //  CONTAS A PAGAR
    // =========================================================================

    pub async fn payables(&self) -> Result<PayableReport, AppError> {
        let services = self.operations_repo.list_service_orders(&self.pool).await?;
        let purchases = self.operations_repo.list_purchase_orders(&self.pool).await?;
        Ok(compute_payables(&services, &purchases))
    }

    // Quita uma obrigação: lança a saída e marca a ordem como paga no
    // mesmo commit. O valor vem sempre da ordem, não do cliente.
    pub async fn pay_obligation(
        &self,
        actor: &SystemUser,
        payload: &PayObligationPayload,
    ) -> Result<Transaction, AppError> {
        // Valida a conta de origem antes de qualquer coisa
        self.finance_repo
            .get_account(&self.pool, payload.bank_account_id)
            .await?;

        let (description, amount, supplier_id, supplier_name) = match payload.kind {
            PayableKind::Service => {
                let order = self
                    .operations_repo
                    .get_service_order(&self.pool, payload.order_id)
                    .await?;
                if order.payment_status == PaymentStatus::Paid {
                    return Err(AppError::AlreadyPaid);
                }
                (
                    format!("PAGO CXP Servicio: {}", order.title),
                    order.actual_cost.unwrap_or(order.estimated_cost),
                    None,
                    None,
                )
            }
            PayableKind::Purchase => {
                let order = self
                    .operations_repo
                    .get_purchase_order(&self.pool, payload.order_id)
                    .await?;
                if order.payment_status == PaymentStatus::Paid {
                    return Err(AppError::AlreadyPaid);
                }
                (
                    format!("PAGO CXP Compra: {}", purchase_reference(order.id)),
                    order.total_amount,
                    order.supplier_id,
                    Some(order.supplier_name),
                )
            }
        };

        let tx_payload = TransactionPayload {
            date: payload.date,
            description,
            amount,
            kind: TransactionType::Expense,
            category: payload.category,
            related_member_id: None,
            related_bank_account_id: Some(payload.bank_account_id),
            transfer_to_account_id: None,
            related_project_id: None,
            related_supplier_id: supplier_id,
            related_supplier: supplier_name,
        };

        let mut tx = self.pool.begin().await?;
        let transaction = self.finance_repo.insert_transaction(&mut *tx, &tx_payload).await?;
        match payload.kind {
            PayableKind::Service => {
                self.operations_repo
                    .mark_service_order_paid(&mut *tx, payload.order_id, transaction.id)
                    .await?;
            }
            PayableKind::Purchase => {
                self.operations_repo
                    .mark_purchase_order_paid(&mut *tx, payload.order_id, transaction.id)
                    .await?;
            }
        }
        self.log_repo
            .insert(
                &mut *tx,
                Some(actor.id),
                &actor.full_name,
                "PAGAR",
                "CXP",
                &format!("{} (${})", transaction.description, transaction.amount),
            )
            .await?;
        tx.commit().await?;

        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service(
        status: ServiceStatus,
        payment: PaymentStatus,
        estimated: &str,
        actual: Option<&str>,
    ) -> ServiceOrder {
        ServiceOrder {
            id: Uuid::new_v4(),
            title: "Soldadura".to_string(),
            description: None,
            service_type: None,
            responsible: "Taller Pérez".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            deadline: None,
            status,
            estimated_cost: dec(estimated),
            actual_cost: actual.map(dec),
            materials: json!([]),
            payment_status: payment,
            related_transaction_id: None,
            created_at: Utc::now(),
        }
    }

    fn purchase(status: PurchaseStatus, payment: PaymentStatus, total: &str) -> PurchaseOrder {
        PurchaseOrder {
            id: Uuid::new_v4(),
            supplier_id: None,
            supplier_name: "Químicos del Istmo".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            status,
            items: json!([]),
            total_amount: dec(total),
            payment_status: payment,
            related_transaction_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn servico_concluido_pendente_entra_na_lista() {
        let report = compute_payables(
            &[service(
                ServiceStatus::Completed,
                PaymentStatus::Pending,
                "150.00",
                None,
            )],
            &[],
        );
        assert_eq!(report.payables.len(), 1);
        assert_eq!(report.total_payable, dec("150.00"));
    }

    #[test]
    fn custo_real_prevalece_sobre_o_estimado() {
        let report = compute_payables(
            &[service(
                ServiceStatus::InProgress,
                PaymentStatus::Pending,
                "150.00",
                Some("180.00"),
            )],
            &[],
        );
        assert_eq!(report.payables[0].amount, dec("180.00"));
    }

    #[test]
    fn servico_pendente_de_execucao_ainda_nao_deve() {
        let report = compute_payables(
            &[service(
                ServiceStatus::Pending,
                PaymentStatus::Pending,
                "150.00",
                None,
            )],
            &[],
        );
        assert!(report.payables.is_empty());
    }

    #[test]
    fn cancelados_pagos_e_rascunhos_ficam_fora() {
        let report = compute_payables(
            &[
                service(ServiceStatus::Cancelled, PaymentStatus::Pending, "90.00", None),
                service(ServiceStatus::Completed, PaymentStatus::Paid, "90.00", None),
            ],
            &[
                purchase(PurchaseStatus::Draft, PaymentStatus::Pending, "200.00"),
                purchase(PurchaseStatus::Cancelled, PaymentStatus::Pending, "200.00"),
                purchase(PurchaseStatus::Paid, PaymentStatus::Paid, "200.00"),
            ],
        );
        assert!(report.payables.is_empty());
        assert_eq!(report.total_payable, Decimal::ZERO);
    }

    #[test]
    fn lista_mista_ordenada_por_valor() {
        let report = compute_payables(
            &[service(
                ServiceStatus::Completed,
                PaymentStatus::Pending,
                "150.00",
                None,
            )],
            &[purchase(
                PurchaseStatus::Received,
                PaymentStatus::Pending,
                "420.00",
            )],
        );
        assert_eq!(report.payables.len(), 2);
        assert_eq!(report.payables[0].kind, PayableKind::Purchase);
        assert_eq!(report.payables[0].amount, dec("420.00"));
        assert_eq!(report.total_payable, dec("570.00"));
    }
}
