//! Domain entities - the core business objects.

mod post;
mod topic;
mod user;

pub use post::{
    Comment, Post, PostDraft, PostStatus, Reaction, compute_status, time_left_seconds,
};
pub use topic::{Topic, UnknownTopic};
pub use user::{Requester, User};
