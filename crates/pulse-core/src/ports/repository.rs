use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, PostDraft, Reaction, Topic, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user. A taken username is a `RepoError::Constraint`.
    async fn create(&self, user: User) -> Result<User, RepoError>;
}

/// Post store.
///
/// Counter and comment mutations are single atomic commands; callers never
/// write back a post they read earlier.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a draft, assigning it a fresh id.
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts tagged with `topic`, in the store's natural order.
    async fn find_by_topic(&self, topic: Topic) -> Result<Vec<Post>, RepoError>;

    /// Atomically add one to the given counter, returning its new value.
    async fn increment_counter(&self, id: Uuid, reaction: Reaction) -> Result<u64, RepoError>;

    /// Atomically append a comment, returning the full sequence afterwards.
    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Vec<Comment>, RepoError>;
}
