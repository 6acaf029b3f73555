use tracing::info;

use crate::errors::StoreError;
use crate::models::Customer;
use crate::repository::Repository;

pub struct CustomerService<R> {
    repository: R,
}

impl<R: Repository<Customer>> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>, StoreError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Customer>, StoreError> {
        self.repository.get_by_id(id).await
    }

    /// First customer whose name equals `name` ignoring case, scanning every row
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError> {
        let wanted = name.to_lowercase();
        let customers = self.repository.get_all().await?;

        Ok(customers
            .into_iter()
            .find(|customer| customer.name.to_lowercase() == wanted))
    }

    /// Insert a new customer; duplicate names are allowed
    pub async fn create(&self, name: &str) -> Result<Customer, StoreError> {
        let mut customer = Customer::new(name);
        self.repository.add(&mut customer).await?;

        info!(id = customer.id, name = %customer.name, "customer created");
        Ok(customer)
    }
}
