use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::db::entity::Entity;
use crate::errors::StoreError;
use crate::repository::Repository;

struct Table<E> {
    rows: BTreeMap<i32, E>,
    next_id: i32,
}

/// In-process table with generated ids; clones share the same rows
pub struct MemoryRepository<E> {
    table: Arc<Mutex<Table<E>>>,
}

impl<E> Clone for MemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<E>, StoreError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn add(&self, entity: &mut E) -> Result<(), StoreError> {
        let mut table = self.table.lock().await;
        let id = table.next_id;
        table.next_id += 1;
        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<bool, StoreError> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let repo = MemoryRepository::<Customer>::new();
        assert!(repo.get_all().await.unwrap().is_empty());
        assert_eq!(repo.get_by_id(-1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_assigns_increasing_ids() {
        let repo = MemoryRepository::new();
        let mut first = Customer::new("Acme");
        let mut second = Customer::new("Globex");
        repo.add(&mut first).await.unwrap();
        repo.add(&mut second).await.unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(repo.get_by_id(2).await.unwrap().unwrap().name, "Globex");
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = MemoryRepository::new();
        let mut customer = Customer::new("Acme");
        repo.add(&mut customer).await.unwrap();

        customer.name = "Acme AB".into();
        assert!(repo.update(&customer).await.unwrap());
        assert!(!repo.update(&Customer { id: 99, ..Customer::new("ghost") }).await.unwrap());

        assert!(repo.delete(customer.id).await.unwrap());
        assert!(!repo.delete(customer.id).await.unwrap());
        assert_eq!(repo.get_by_id(customer.id).await.unwrap(), None);
    }
}
