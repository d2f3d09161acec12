//! "Most active" selection.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::domain::{Post, PostStatus};

/// Order posts from most to least active.
///
/// Equal activity falls back to the older post, then to the smaller id, so
/// the outcome never depends on the order the store returned rows in.
pub fn by_activity(a: &Post, b: &Post) -> Ordering {
    b.activity()
        .cmp(&a.activity())
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Pick the most active post among those still live at `now`.
pub fn most_active(posts: &[Post], now: DateTime<Utc>) -> Option<&Post> {
    posts
        .iter()
        .filter(|p| p.status_at(now) == PostStatus::Live)
        .min_by(|a, b| by_activity(a, b))
}
