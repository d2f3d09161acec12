//! # Pulse Core
//!
//! The domain layer of the Pulse backend.
//! This crate contains the post lifecycle rules with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::PostService;
