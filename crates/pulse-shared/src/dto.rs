//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request to create a post.
///
/// Missing fields deserialize as empty so that the server reports them as
/// validation failures rather than as malformed JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub body: String,
    /// ISO-8601 timestamp.
    #[serde(default)]
    pub expires_at: String,
    /// Defaults to the authenticated user when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

/// Request to comment on a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreatedResponse {
    pub id: Uuid,
    pub title: String,
    pub topics: Vec<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDto {
    pub user: String,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

/// A post as listed under a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub owner_name: String,
    pub topics: Vec<String>,
    pub status: String,
    pub likes: u64,
    pub dislikes: u64,
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub likes: u64,
    pub time_left_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DislikeResponse {
    pub dislikes: u64,
    pub time_left_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comments: Vec<CommentDto>,
    pub time_left_seconds: u64,
}

/// The most active live post of a topic. `comments` is a count here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostActiveResponse {
    pub id: Uuid,
    pub title: String,
    pub owner_name: String,
    pub likes: u64,
    pub dislikes: u64,
    pub comments: usize,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_tolerates_missing_fields() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.title, "Hi");
        assert!(req.topics.is_empty());
        assert!(req.expires_at.is_empty());
        assert!(req.owner_name.is_none());
    }

    #[test]
    fn test_camel_case_on_the_wire() {
        let json = serde_json::to_value(LikeResponse {
            likes: 3,
            time_left_seconds: 42,
        })
        .unwrap();

        assert_eq!(json["likes"], 3);
        assert_eq!(json["timeLeftSeconds"], 42);

        let req: CreatePostRequest = serde_json::from_str(
            r#"{"title":"t","topics":["Tech"],"body":"b","expiresAt":"2030-01-01T00:00:00Z","ownerName":"alice"}"#,
        )
        .unwrap();
        assert_eq!(req.expires_at, "2030-01-01T00:00:00Z");
        assert_eq!(req.owner_name.as_deref(), Some("alice"));
    }
}
