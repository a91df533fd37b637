pub mod user_repo;
pub use user_repo::UserRepository;
pub mod member_repo;
pub use member_repo::MemberRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod people_repo;
pub use people_repo::PeopleRepository;
pub mod operations_repo;
pub mod finance_repo;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;

pub use finance_repo::FinanceRepository;

pub use operations_repo::OperationsRepository;

pub mod logs_repo;
pub use logs_repo::LogRepository;
