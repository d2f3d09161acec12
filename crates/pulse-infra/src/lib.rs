//! # Pulse Infrastructure
//!
//! Concrete implementations of the ports defined in `pulse-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL stores via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod clock;
pub mod database;
pub mod memory;

#[cfg(feature = "auth")]
pub mod auth;

pub use clock::{ManualClock, SystemClock};
pub use database::DatabaseConfig;
pub use memory::{InMemoryPostStore, InMemoryUserRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::{DatabaseHandle, PostgresPostStore, PostgresUserRepository};
