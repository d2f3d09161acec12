//! In-memory post store - used as fallback when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use pulse_core::domain::{Comment, Post, PostDraft, Reaction, Topic};
use pulse_core::error::RepoError;
use pulse_core::ports::PostStore;

#[derive(Default)]
struct Inner {
    posts: HashMap<Uuid, Post>,
    /// Insertion order, which is this store's natural listing order.
    order: Vec<Uuid>,
}

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Every mutation holds the write lock for the whole read-modify-write, so
/// concurrent increments and appends on one post are never lost.
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    inner: RwLock<Inner>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let post = draft.into_post(Uuid::new_v4());

        let mut inner = self.inner.write().await;
        inner.order.push(post.id);
        inner.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(&id).cloned())
    }

    async fn find_by_topic(&self, topic: Topic) -> Result<Vec<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.posts.get(id))
            .filter(|post| post.has_topic(topic))
            .cloned()
            .collect())
    }

    async fn increment_counter(&self, id: Uuid, reaction: Reaction) -> Result<u64, RepoError> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        let counter = match reaction {
            Reaction::Like => &mut post.likes,
            Reaction::Dislike => &mut post.dislikes,
        };
        *counter += 1;

        Ok(*counter)
    }

    async fn append_comment(&self, id: Uuid, comment: Comment) -> Result<Vec<Comment>, RepoError> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.comments.push(comment);

        Ok(post.comments.clone())
    }
}
