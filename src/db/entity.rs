//! Table metadata shared by every persisted record, and the SQL generated from it.
//!
//! Statements use `$n` placeholders in the order of [`Entity::COLUMNS`], followed
//! by the id where the statement needs one.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};

/// A record stored in its own table with a generated integer id
pub trait Entity: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static {
    /// Human readable name used in errors and logs
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Writable scalar columns, excluding `id`
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    /// Bind the values of [`Entity::COLUMNS`], in order
    fn bind_columns<'q>(&self, query: Query<'q, Postgres, PgArguments>) -> Query<'q, Postgres, PgArguments>;
}

fn select_list<E: Entity>() -> String {
    std::iter::once("id")
        .chain(E::COLUMNS.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn select_all_sql<E: Entity>() -> String {
    format!("SELECT {} FROM {} ORDER BY id ASC", select_list::<E>(), E::TABLE)
}

pub(crate) fn select_by_id_sql<E: Entity>() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", select_list::<E>(), E::TABLE)
}

pub(crate) fn insert_sql<E: Entity>() -> String {
    let placeholders = (1..=E::COLUMNS.len())
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders
    )
}

pub(crate) fn update_sql<E: Entity>() -> String {
    let assignments = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE id = ${}",
        E::TABLE,
        assignments,
        E::COLUMNS.len() + 1
    )
}

pub(crate) fn delete_sql<E: Entity>() -> String {
    format!("DELETE FROM {} WHERE id = $1", E::TABLE)
}
