//! Uniform CRUD access over one entity type.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::db::entity::Entity;
use crate::errors::StoreError;

/// Every method is one save cycle against the store; nothing is batched.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All rows ordered by id; an empty store yields an empty list
    async fn get_all(&self) -> Result<Vec<E>, StoreError>;

    /// The row with this id, or `None` (including for zero and negative ids)
    async fn get_by_id(&self, id: i32) -> Result<Option<E>, StoreError>;

    /// Insert the entity and write the generated id back into it
    async fn add(&self, entity: &mut E) -> Result<(), StoreError>;

    /// Overwrite every scalar column of the row with the entity's id.
    /// Returns whether a row was touched.
    async fn update(&self, entity: &E) -> Result<bool, StoreError>;

    /// Remove the row if present. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}
