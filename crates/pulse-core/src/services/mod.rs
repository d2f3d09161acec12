//! Application services built on the ports.

mod posts;
pub mod ranking;
pub mod validation;

pub use posts::{
    ActivitySummary, CommentOutcome, NewPost, PostService, PostView, ReactionOutcome,
};
