mod customer_service;
mod project_service;

pub use customer_service::CustomerService;
pub use project_service::ProjectService;
