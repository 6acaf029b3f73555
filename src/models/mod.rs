mod customer;
mod project;

pub use customer::Customer;
pub use project::Project;
