pub mod auth;
pub mod debt;
pub mod dosing;
pub mod payroll;

pub mod assistant_service;
pub mod dashboard_service;
pub mod document_service;
pub mod finance_service;
pub mod inventory_service;
pub mod member_service;
pub mod operations_service;
pub mod people_service;

pub use assistant_service::AssistantService;
pub use auth::AuthService;
pub use dashboard_service::DashboardService;
pub use document_service::DocumentService;
pub use finance_service::FinanceService;
pub use inventory_service::InventoryService;
pub use member_service::MemberService;
pub use operations_service::OperationsService;
pub use people_service::PeopleService;
