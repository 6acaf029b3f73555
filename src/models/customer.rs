use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

use crate::db::entity::Entity;
use crate::models::Project;

#[derive(sqlx::FromRow, Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    /// Owned projects, only populated when explicitly loaded
    #[sqlx(skip)]
    pub projects: Vec<Project>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            projects: Vec::new(),
        }
    }
}

impl Entity for Customer {
    const NAME: &'static str = "customer";
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn bind_columns<'q>(&self, query: Query<'q, Postgres, PgArguments>) -> Query<'q, Postgres, PgArguments> {
        query.bind(self.name.clone())
    }
}
