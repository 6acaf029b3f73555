use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

use crate::db::entity::Entity;
use crate::models::Customer;

#[derive(sqlx::FromRow, Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub customer_id: i32,
    /// Resolved owner; `None` when the join was not loaded
    #[sqlx(skip)]
    pub customer: Option<Customer>,
}

impl Project {
    pub fn new(name: impl Into<String>, customer_id: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            customer_id,
            customer: None,
        }
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer.as_ref().map(|customer| customer.name.as_str())
    }
}

impl Entity for Project {
    const NAME: &'static str = "project";
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] = &["name", "customer_id"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn bind_columns<'q>(&self, query: Query<'q, Postgres, PgArguments>) -> Query<'q, Postgres, PgArguments> {
        query.bind(self.name.clone()).bind(self.customer_id)
    }
}
