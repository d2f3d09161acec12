//! Database connection management and PostgreSQL stores.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::DatabaseHandle;
#[cfg(feature = "postgres")]
pub use postgres_repo::{PostgresPostStore, PostgresUserRepository};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
