use std::collections::HashMap;

use tracing::info;

use crate::errors::StoreError;
use crate::models::{Customer, Project};
use crate::repository::Repository;
use crate::services::CustomerService;

pub struct ProjectService<C, P> {
    customers: CustomerService<C>,
    projects: P,
}

impl<C, P> ProjectService<C, P>
where
    C: Repository<Customer>,
    P: Repository<Project>,
{
    pub fn new(customers: CustomerService<C>, projects: P) -> Self {
        Self { customers, projects }
    }

    /// All projects, each with its customer resolved when the row exists
    pub async fn get_all(&self) -> Result<Vec<Project>, StoreError> {
        let projects = self.projects.get_all().await?;
        if projects.is_empty() {
            return Ok(projects);
        }

        let customers: HashMap<i32, Customer> = self
            .customers
            .get_all()
            .await?
            .into_iter()
            .map(|customer| (customer.id, customer))
            .collect();

        Ok(projects
            .into_iter()
            .map(|mut project| {
                project.customer = customers.get(&project.customer_id).cloned();
                project
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Project>, StoreError> {
        let Some(mut project) = self.projects.get_by_id(id).await? else {
            return Ok(None);
        };

        project.customer = self.customers.get_by_id(project.customer_id).await?;
        Ok(Some(project))
    }

    /// Create a project for the named customer, creating the customer first
    /// when no name matches. The two inserts are separate save cycles.
    pub async fn create(&self, project_name: &str, customer_name: &str) -> Result<Project, StoreError> {
        let customer = match self.customers.get_by_name(customer_name).await? {
            Some(customer) => customer,
            None => self.customers.create(customer_name).await?,
        };

        let mut project = Project::new(project_name, customer.id);
        self.projects.add(&mut project).await?;
        project.customer = Some(customer);

        info!(id = project.id, customer_id = project.customer_id, "project created");
        Ok(project)
    }

    /// Rename a project. A missing id leaves the store untouched and is
    /// reported as `NotFound`.
    pub async fn update(&self, id: i32, new_name: &str) -> Result<Project, StoreError> {
        let mut project = self
            .projects
            .get_by_id(id)
            .await?
            .ok_or(StoreError::NotFound { entity: "project", id })?;

        project.name = new_name.to_string();
        if !self.projects.update(&project).await? {
            // Removed between the read and the write
            return Err(StoreError::NotFound { entity: "project", id });
        }

        info!(id, "project renamed");
        Ok(project)
    }

    /// Remove a project; returns false when no project had that id
    pub async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        self.projects.delete(id).await
    }

    /// A customer with its owned projects loaded
    pub async fn get_customer_with_projects(&self, customer_id: i32) -> Result<Option<Customer>, StoreError> {
        let Some(mut customer) = self.customers.get_by_id(customer_id).await? else {
            return Ok(None);
        };

        customer.projects = self
            .projects
            .get_all()
            .await?
            .into_iter()
            .filter(|project| project.customer_id == customer_id)
            .collect();

        Ok(Some(customer))
    }
}
