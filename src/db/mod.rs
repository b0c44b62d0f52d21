//! Database module
//!
//! This module holds the storage contract and its PostgreSQL and MySQL
//! implementations.

pub mod connection;
pub mod mysql;
pub mod postgres;
pub mod store;

pub use connection::connect;
pub use mysql::MySqlStore;
pub use postgres::PgStore;
pub use store::Store;

#[cfg(test)]
pub use store::MockStore;

/// Whether a driver error is a unique-constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
