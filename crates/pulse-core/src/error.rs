//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Reaction, Topic};

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("No posts found for topic {0}")]
    NoPostsForTopic(Topic),

    #[error("No active posts found for topic {0}")]
    NoActivePosts(Topic),

    #[error("Post owner cannot {0} their own post")]
    OwnerReaction(Reaction),

    #[error("Cannot interact with an expired post")]
    PostExpired,

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Store(#[from] RepoError),
}

impl DomainError {
    pub(crate) fn post_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
