// src/services/dashboard_service.rs

use chrono::{Datelike, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::DashboardSummary,
    services::{member_service::MemberService, operations_service::OperationsService},
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
    member_service: MemberService,
    operations_service: OperationsService,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(
        dashboard_repo: DashboardRepository,
        member_service: MemberService,
        operations_service: OperationsService,
        pool: PgPool,
    ) -> Self {
        Self {
            dashboard_repo,
            member_service,
            operations_service,
            pool,
        }
    }

    // Visão geral do painel: saldos, CxC, CxP e movimento do mês corrente
    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let today = Utc::now().date_naive();
        let month_start = today.with_day(1).unwrap_or(today);

        let total_balance = self.dashboard_repo.total_balance(&self.pool).await?;
        let active_members = self.dashboard_repo.active_member_count(&self.pool).await?;
        let low_stock_items = self.dashboard_repo.low_stock_count(&self.pool).await?;
        let month_income = self
            .dashboard_repo
            .month_total_by_type(&self.pool, "INCOME", month_start)
            .await?;
        let month_expense = self
            .dashboard_repo
            .month_total_by_type(&self.pool, "EXPENSE", month_start)
            .await?;

        let receivable = self.member_service.debtors().await?;
        let payable = self.operations_service.payables().await?;

        Ok(DashboardSummary {
            total_balance,
            total_receivable: receivable.total_receivable,
            total_payable: payable.total_payable,
            active_members,
            low_stock_items,
            month_income,
            month_expense,
        })
    }
}
