pub mod assistant;
pub mod auth;
pub mod dashboard;
pub mod finance;
pub mod inventory;
pub mod logs;
pub mod members;
pub mod operations;
pub mod payroll;
pub mod people;
