// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Users ---
        handlers::auth::list_users,
        handlers::auth::create_user,
        handlers::auth::update_user,
        handlers::auth::delete_user,

        // --- Members ---
        handlers::members::list_members,
        handlers::members::get_member,
        handlers::members::create_member,
        handlers::members::update_member,
        handlers::members::delete_member,
        handlers::members::list_debtors,
        handlers::members::settle_debt,

        // --- FINANCE ---
        handlers::finance::list_accounts,
        handlers::finance::create_account,
        handlers::finance::update_account,
        handlers::finance::delete_account,
        handlers::finance::list_transactions,
        handlers::finance::create_transaction,
        handlers::finance::update_transaction,
        handlers::finance::delete_transaction,
        handlers::finance::income_statement,

        // --- INVENTORY ---
        handlers::inventory::list_items,
        handlers::inventory::create_item,
        handlers::inventory::update_item,
        handlers::inventory::delete_item,
        handlers::inventory::list_low_stock,
        handlers::inventory::suggest_dosage,
        handlers::inventory::apply_dosage,
        handlers::inventory::list_maintenance_logs,

        // --- OPERATIONS ---
        handlers::operations::list_projects,
        handlers::operations::create_project,
        handlers::operations::update_project,
        handlers::operations::delete_project,
        handlers::operations::list_service_orders,
        handlers::operations::create_service_order,
        handlers::operations::update_service_order,
        handlers::operations::delete_service_order,
        handlers::operations::list_purchase_orders,
        handlers::operations::create_purchase_order,
        handlers::operations::update_purchase_order,
        handlers::operations::delete_purchase_order,
        handlers::operations::list_payables,
        handlers::operations::pay_obligation,

        // --- People ---
        handlers::people::list_suppliers,
        handlers::people::create_supplier,
        handlers::people::update_supplier,
        handlers::people::delete_supplier,
        handlers::people::list_board_members,
        handlers::people::create_board_member,
        handlers::people::update_board_member,
        handlers::people::delete_board_member,
        handlers::people::list_employees,
        handlers::people::create_employee,
        handlers::people::update_employee,
        handlers::people::delete_employee,

        // --- Payroll ---
        handlers::payroll::estimate,

        // --- Dashboard ---
        handlers::dashboard::summary,

        // --- Documents ---
        handlers::documents::payment_receipt,
        handlers::documents::income_statement_pdf,

        // --- Assistant ---
        handlers::assistant::generate_report,

        // --- Logs ---
        handlers::logs::list_logs,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::SystemUser,
            models::auth::LoginPayload,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,

            // --- Members ---
            models::members::MemberStatus,
            models::members::MemberCategory,
            models::members::Member,
            models::members::MemberPayload,
            models::members::DebtorEntry,
            models::members::DebtorReport,
            models::members::SettleDebtPayload,

            // --- FINANCE ---
            models::finance::TransactionType,
            models::finance::TransactionCategory,
            models::finance::BankAccountKind,
            models::finance::BankAccount,
            models::finance::BankAccountPayload,
            models::finance::Transaction,
            models::finance::TransactionPayload,
            models::finance::CategoryTotal,
            models::finance::ProjectTotal,
            models::finance::IncomeStatement,

            // --- INVENTORY ---
            models::inventory::InventoryItem,
            models::inventory::InventoryItemPayload,
            models::inventory::MaintenanceLog,
            models::inventory::WaterReadings,
            models::inventory::ReagentPurity,
            models::inventory::DosageSuggestion,
            models::inventory::DosingSuggestPayload,
            models::inventory::ReagentMapping,
            models::inventory::ManualUsageLine,
            models::inventory::DosingApplyPayload,
            models::inventory::LowStockItem,

            // --- OPERATIONS ---
            models::operations::ProjectStatus,
            models::operations::ProjectPriority,
            models::operations::TaskStatus,
            models::operations::Project,
            models::operations::ProjectTask,
            models::operations::ProjectWithTasks,
            models::operations::ProjectTaskPayload,
            models::operations::ProjectPayload,
            models::operations::ServiceStatus,
            models::operations::PaymentStatus,
            models::operations::ServiceOrder,
            models::operations::ServiceOrderPayload,
            models::operations::PurchaseStatus,
            models::operations::PurchaseOrder,
            models::operations::PurchaseOrderPayload,
            models::operations::PayableKind,
            models::operations::PayableEntry,
            models::operations::PayableReport,
            models::operations::PayObligationPayload,

            // --- People ---
            models::people::Supplier,
            models::people::SupplierPayload,
            models::people::BoardRole,
            models::people::BoardMember,
            models::people::BoardMemberPayload,
            models::people::EmployeeStatus,
            models::people::PaymentMethod,
            models::people::Employee,
            models::people::EmployeePayload,

            // --- Payroll ---
            models::payroll::PayrollEstimatePayload,
            models::payroll::PayrollEstimate,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,

            // --- Assistant ---
            models::assistant::AssistantPrompt,
            models::assistant::AssistantReply,

            // --- Logs ---
            models::logs::SystemLog,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Sessão"),
        (name = "Users", description = "Gestão de Usuários do Sistema"),
        (name = "Members", description = "Diretório de Sócios e Morosidade"),
        (name = "Finance", description = "Contas, Movimentos e Demonstrativos"),
        (name = "Inventory", description = "Almoxarifado e Dosagem Química"),
        (name = "Operations", description = "Projetos, Ordens e Contas a Pagar"),
        (name = "People", description = "Fornecedores, Diretoria e Funcionários"),
        (name = "Payroll", description = "Projeção de Custos Laborais"),
        (name = "Dashboard", description = "Indicadores Gerenciais"),
        (name = "Documents", description = "Recibos e Relatórios em PDF"),
        (name = "Assistant", description = "Relatórios Gerenciais por IA"),
        (name = "Logs", description = "Trilha de Auditoria")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
