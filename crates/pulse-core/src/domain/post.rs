use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Topic;

/// Post entity - a time-bounded message filed under one or more topics.
///
/// Status is not a field: it depends on the clock and is derived through
/// [`Post::status_at`] every time it is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub topics: BTreeSet<Topic>,
    pub owner_name: String,
    pub expires_at: DateTime<Utc>,
    pub likes: u64,
    pub dislikes: u64,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn status_at(&self, now: DateTime<Utc>) -> PostStatus {
        compute_status(self.expires_at, now)
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner_name == username
    }

    pub fn has_topic(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }

    /// Activity score used for "most active" ranking.
    pub fn activity(&self) -> u64 {
        self.likes + self.dislikes + self.comments.len() as u64
    }
}

/// A validated post waiting for the store to assign it an id.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub topics: BTreeSet<Topic>,
    pub owner_name: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PostDraft {
    /// Materialize the draft as a fresh post with zeroed counters.
    pub fn into_post(self, id: Uuid) -> Post {
        Post {
            id,
            title: self.title,
            body: self.body,
            topics: self.topics,
            owner_name: self.owner_name,
            expires_at: self.expires_at,
            likes: 0,
            dislikes: 0,
            comments: Vec::new(),
            created_at: self.created_at,
        }
    }
}

/// A comment embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub user: String,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

/// Derived lifecycle state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    Live,
    Expired,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Live => "Live",
            PostStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two counters a non-owner can bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaction::Like => f.write_str("like"),
            Reaction::Dislike => f.write_str("dislike"),
        }
    }
}

/// `Live` strictly before `expires_at`, `Expired` from that instant on.
pub fn compute_status(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> PostStatus {
    if now < expires_at {
        PostStatus::Live
    } else {
        PostStatus::Expired
    }
}

/// Whole seconds left before `expires_at`, floored and clamped at zero.
pub fn time_left_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let remaining_ms = (expires_at - now).num_milliseconds();
    if remaining_ms <= 0 {
        0
    } else {
        (remaining_ms / 1000) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_status_flips_at_expiry_instant() {
        let expires_at = at(10);
        assert_eq!(compute_status(expires_at, at(9)), PostStatus::Live);
        assert_eq!(compute_status(expires_at, at(10)), PostStatus::Expired);
        assert_eq!(compute_status(expires_at, at(11)), PostStatus::Expired);
    }

    #[test]
    fn test_time_left_is_floored() {
        let now = at(0);
        let expires_at = now + Duration::milliseconds(1500);
        assert_eq!(time_left_seconds(expires_at, now), 1);

        let expires_at = now + Duration::milliseconds(999);
        assert_eq!(time_left_seconds(expires_at, now), 0);
    }

    #[test]
    fn test_time_left_never_negative() {
        assert_eq!(time_left_seconds(at(0), at(5)), 0);
        assert_eq!(time_left_seconds(at(5), at(5)), 0);
    }

    #[test]
    fn test_activity_counts_comments() {
        let mut post = PostDraft {
            title: "t".into(),
            body: "b".into(),
            topics: BTreeSet::from([Topic::Tech]),
            owner_name: "alice".into(),
            expires_at: at(60),
            created_at: at(0),
        }
        .into_post(Uuid::new_v4());

        post.likes = 3;
        post.dislikes = 1;
        post.comments.push(Comment {
            user: "bob".into(),
            comment: "hi".into(),
            timestamp: at(1),
        });

        assert_eq!(post.activity(), 5);
    }
}
