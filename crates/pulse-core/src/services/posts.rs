//! Post lifecycle engine.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    Comment, Post, PostDraft, PostStatus, Reaction, Requester, Topic, time_left_seconds,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, PostStore};

use super::ranking;
use super::validation::{parse_timestamp, parse_topics, require_text};

/// Raw input for a new post, as it arrives from the caller.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub topics: Vec<String>,
    pub body: String,
    pub expires_at: String,
    pub owner_name: String,
}

/// A post together with its status at the time it was read.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub status: PostStatus,
}

/// Result of a like or dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub reaction: Reaction,
    pub count: u64,
    pub time_left_seconds: u64,
}

/// Result of a comment.
#[derive(Debug, Clone)]
pub struct CommentOutcome {
    pub comments: Vec<Comment>,
    pub time_left_seconds: u64,
}

/// Condensed view of the most active post for a topic.
#[derive(Debug, Clone)]
pub struct ActivitySummary {
    pub id: Uuid,
    pub title: String,
    pub owner_name: String,
    pub likes: u64,
    pub dislikes: u64,
    pub comment_count: usize,
    pub status: PostStatus,
}

/// Applies the post rules on top of a [`PostStore`].
///
/// Every status check reads the injected clock at call time; nothing derived
/// from the clock is kept between calls.
pub struct PostService {
    store: Arc<dyn PostStore>,
    clock: Arc<dyn Clock>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn status_of(&self, post: &Post) -> PostStatus {
        post.status_at(self.clock.now())
    }

    /// Validate and persist a new post.
    ///
    /// An `expires_at` in the past is accepted; the post is simply born expired.
    pub async fn create(&self, input: NewPost) -> Result<PostView, DomainError> {
        require_text("title", &input.title)?;
        require_text("body", &input.body)?;
        require_text("ownerName", &input.owner_name)?;
        require_text("expiresAt", &input.expires_at)?;
        let topics = parse_topics(&input.topics)?;
        let expires_at = parse_timestamp(&input.expires_at)?;

        let now = self.clock.now();
        if expires_at <= now {
            tracing::debug!(%expires_at, "Creating a post that is already expired");
        }

        let post = self
            .store
            .create(PostDraft {
                title: input.title,
                body: input.body,
                topics,
                owner_name: input.owner_name,
                expires_at,
                created_at: now,
            })
            .await?;

        tracing::info!(
            post_id = %post.id,
            owner = %post.owner_name,
            %expires_at,
            "Post created"
        );

        let status = self.status_of(&post);
        Ok(PostView { post, status })
    }

    /// Every post filed under `topic`, live or expired, in store order.
    pub async fn list_by_topic(&self, topic: Topic) -> Result<Vec<PostView>, DomainError> {
        let posts = self.store.find_by_topic(topic).await?;
        tracing::debug!(%topic, count = posts.len(), "Listing posts by topic");

        let now = self.clock.now();
        Ok(posts
            .into_iter()
            .map(|post| {
                let status = post.status_at(now);
                PostView { post, status }
            })
            .collect())
    }

    pub async fn like(
        &self,
        id: Uuid,
        requester: &Requester,
    ) -> Result<ReactionOutcome, DomainError> {
        self.react(id, requester, Reaction::Like).await
    }

    pub async fn dislike(
        &self,
        id: Uuid,
        requester: &Requester,
    ) -> Result<ReactionOutcome, DomainError> {
        self.react(id, requester, Reaction::Dislike).await
    }

    async fn react(
        &self,
        id: Uuid,
        requester: &Requester,
        reaction: Reaction,
    ) -> Result<ReactionOutcome, DomainError> {
        let post = self.find(id).await?;

        if post.is_owned_by(&requester.username) {
            return Err(DomainError::OwnerReaction(reaction));
        }
        if self.status_of(&post) == PostStatus::Expired {
            return Err(DomainError::PostExpired);
        }

        let count = self
            .store
            .increment_counter(id, reaction)
            .await
            .map_err(|e| not_found_or(e, id))?;

        tracing::debug!(post_id = %id, user = %requester.username, %reaction, count, "Reaction recorded");

        Ok(ReactionOutcome {
            reaction,
            count,
            time_left_seconds: time_left_seconds(post.expires_at, self.clock.now()),
        })
    }

    /// Append a comment. Owners may comment on their own posts.
    pub async fn comment(
        &self,
        id: Uuid,
        requester: &Requester,
        text: &str,
    ) -> Result<CommentOutcome, DomainError> {
        require_text("comment", text)?;

        let post = self.find(id).await?;
        if self.status_of(&post) == PostStatus::Expired {
            return Err(DomainError::PostExpired);
        }

        let comment = Comment {
            user: requester.username.clone(),
            comment: text.to_string(),
            timestamp: self.clock.now(),
        };
        let comments = self
            .store
            .append_comment(id, comment)
            .await
            .map_err(|e| not_found_or(e, id))?;

        tracing::debug!(post_id = %id, user = %requester.username, total = comments.len(), "Comment added");

        Ok(CommentOutcome {
            comments,
            time_left_seconds: time_left_seconds(post.expires_at, self.clock.now()),
        })
    }

    /// The live post with the highest `likes + dislikes + comments` for `topic`.
    pub async fn most_active(&self, topic: Topic) -> Result<ActivitySummary, DomainError> {
        let posts = self.store.find_by_topic(topic).await?;
        if posts.is_empty() {
            return Err(DomainError::NoPostsForTopic(topic));
        }

        let post = ranking::most_active(&posts, self.clock.now())
            .ok_or(DomainError::NoActivePosts(topic))?;

        Ok(ActivitySummary {
            id: post.id,
            title: post.title.clone(),
            owner_name: post.owner_name.clone(),
            likes: post.likes,
            dislikes: post.dislikes,
            comment_count: post.comments.len(),
            status: self.status_of(post),
        })
    }

    async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }
}

fn not_found_or(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => DomainError::Store(other),
    }
}
