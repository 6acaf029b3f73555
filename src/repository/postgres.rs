use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::Row;
use tracing::debug;

use crate::db::entity::{delete_sql, insert_sql, select_all_sql, select_by_id_sql, update_sql, Entity};
use crate::db::retry::WriteError;
use crate::db::Database;
use crate::errors::StoreError;
use crate::repository::Repository;

/// Repository over the Postgres table of `E`
pub struct PgRepository<E> {
    db: Database,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> PgRepository<E> {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        let sql = select_all_sql::<E>();
        let sql = sql.as_str();
        let pool = self.db.get_pool();

        let rows = self
            .db
            .retry()
            .run(move || sqlx::query_as::<_, E>(sql).fetch_all(pool))
            .await?;

        debug!(table = E::TABLE, count = rows.len(), "fetched rows");
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<E>, StoreError> {
        if id <= 0 {
            return Ok(None);
        }

        let sql = select_by_id_sql::<E>();
        let sql = sql.as_str();
        let pool = self.db.get_pool();

        let row = self
            .db
            .retry()
            .run(move || sqlx::query_as::<_, E>(sql).bind(id).fetch_optional(pool))
            .await?;

        Ok(row)
    }

    async fn add(&self, entity: &mut E) -> Result<(), StoreError> {
        let sql = insert_sql::<E>();
        let sql = sql.as_str();
        let pool = self.db.get_pool();
        let pending = &*entity;

        let id = self
            .db
            .retry()
            .run(move || async move {
                let mut tx = pool.begin().await?;
                let row = pending.bind_columns(sqlx::query(sql)).fetch_one(&mut *tx).await?;
                let id = row.try_get::<i32, _>("id")?;
                tx.commit().await.map_err(WriteError::Commit)?;
                Ok::<_, WriteError>(id)
            })
            .await?;

        entity.set_id(id);
        debug!(table = E::TABLE, id, "inserted row");
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<bool, StoreError> {
        let sql = update_sql::<E>();
        let sql = sql.as_str();
        let pool = self.db.get_pool();
        let id = entity.id();

        let affected = self
            .db
            .retry()
            .run(move || async move {
                let mut tx = pool.begin().await?;
                let result = entity.bind_columns(sqlx::query(sql)).bind(id).execute(&mut *tx).await?;
                tx.commit().await.map_err(WriteError::Commit)?;
                Ok::<_, WriteError>(result.rows_affected())
            })
            .await?;

        debug!(table = E::TABLE, id, affected, "updated row");
        Ok(affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let sql = delete_sql::<E>();
        let sql = sql.as_str();
        let pool = self.db.get_pool();

        let affected = self
            .db
            .retry()
            .run(move || async move {
                let mut tx = pool.begin().await?;
                let result = sqlx::query(sql).bind(id).execute(&mut *tx).await?;
                tx.commit().await.map_err(WriteError::Commit)?;
                Ok::<_, WriteError>(result.rows_affected())
            })
            .await?;

        debug!(table = E::TABLE, id, affected, "deleted row");
        Ok(affected > 0)
    }
}

/// These run against the database in `DATABASE_URL`:
/// `cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::config::Config;
    use crate::db;
    use crate::models::{Customer, Project};

    async fn database() -> Database {
        let config = Config::load().expect("DATABASE_URL must be set");
        db::init(&config).await.expect("database reachable")
    }

    fn unique(prefix: &str) -> String {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        format!("{}-{}", prefix, nanos)
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn add_writes_back_generated_id() {
        let repo = database().await.customers();
        let mut first = Customer::new(unique("first"));
        let mut second = Customer::new(unique("second"));
        repo.add(&mut first).await.unwrap();
        repo.add(&mut second).await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(repo.get_by_id(first.id).await.unwrap().unwrap().name, first.name);
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn get_by_id_treats_non_positive_and_unknown_ids_as_absent() {
        let repo = database().await.projects();

        assert!(repo.get_by_id(0).await.unwrap().is_none());
        assert!(repo.get_by_id(-5).await.unwrap().is_none());
        assert!(repo.get_by_id(i32::MAX).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn get_all_returns_inserted_rows_in_id_order() {
        let db = database().await;
        let customers = db.customers();
        let mut customer = Customer::new(unique("lister"));
        customers.add(&mut customer).await.unwrap();

        let projects = db.projects();
        let mut a = Project::new(unique("a"), customer.id);
        let mut b = Project::new(unique("b"), customer.id);
        projects.add(&mut a).await.unwrap();
        projects.add(&mut b).await.unwrap();

        let ids: Vec<i32> = projects
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|p| p.customer_id == customer.id)
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, [a.id, b.id]);
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn update_binds_every_column_to_the_right_row() {
        let db = database().await;
        let customers = db.customers();
        let mut acme = Customer::new(unique("acme"));
        let mut globex = Customer::new(unique("globex"));
        customers.add(&mut acme).await.unwrap();
        customers.add(&mut globex).await.unwrap();

        let projects = db.projects();
        let mut project = Project::new(unique("website"), acme.id);
        projects.add(&mut project).await.unwrap();

        project.name = unique("webshop");
        project.customer_id = globex.id;
        assert!(projects.update(&project).await.unwrap());

        let stored = projects.get_by_id(project.id).await.unwrap().unwrap();
        assert_eq!(stored.name, project.name);
        assert_eq!(stored.customer_id, globex.id);

        let ghost = Project { id: i32::MAX, ..project.clone() };
        assert!(!projects.update(&ghost).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn delete_is_idempotent() {
        let db = database().await;
        let customers = db.customers();
        let mut customer = Customer::new(unique("deleter"));
        customers.add(&mut customer).await.unwrap();

        let projects = db.projects();
        let mut project = Project::new(unique("doomed"), customer.id);
        projects.add(&mut project).await.unwrap();

        assert!(projects.delete(project.id).await.unwrap());
        assert!(!projects.delete(project.id).await.unwrap());
        assert!(projects.get_by_id(project.id).await.unwrap().is_none());
    }
}
