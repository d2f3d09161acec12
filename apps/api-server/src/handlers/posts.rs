//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use pulse_core::domain::{Comment, Post};
use pulse_core::services::validation::parse_topic;
use pulse_core::services::{ActivitySummary, NewPost, PostView};
use pulse_shared::ApiResponse;
use pulse_shared::dto::{
    CommentDto, CommentRequest, CommentResponse, CreatePostRequest, DislikeResponse,
    LikeResponse, MostActiveResponse, PostCreatedResponse, PostSummary,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn topic_names(post: &Post) -> Vec<String> {
    post.topics.iter().map(|t| t.as_str().to_string()).collect()
}

fn comment_dto(comment: Comment) -> CommentDto {
    CommentDto {
        user: comment.user,
        comment: comment.comment,
        timestamp: comment.timestamp,
    }
}

fn summary(view: PostView) -> PostSummary {
    let PostView { post, status } = view;
    PostSummary {
        topics: topic_names(&post),
        id: post.id,
        title: post.title,
        owner_name: post.owner_name,
        status: status.to_string(),
        likes: post.likes,
        dislikes: post.dislikes,
        comments: post.comments.into_iter().map(comment_dto).collect(),
    }
}

fn most_active_response(s: ActivitySummary) -> MostActiveResponse {
    MostActiveResponse {
        id: s.id,
        title: s.title,
        owner_name: s.owner_name,
        likes: s.likes,
        dislikes: s.dislikes,
        comments: s.comment_count,
        status: s.status.to_string(),
    }
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let owner_name = req.owner_name.unwrap_or(identity.username);

    let view = state
        .posts
        .create(NewPost {
            title: req.title,
            topics: req.topics,
            body: req.body,
            expires_at: req.expires_at,
            owner_name,
        })
        .await?;

    let response = PostCreatedResponse {
        topics: topic_names(&view.post),
        id: view.post.id,
        title: view.post.title,
        status: view.status.to_string(),
    };

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        response,
        "Post created successfully",
    )))
}

/// GET /api/posts/topic/{topic}
pub async fn list_by_topic(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let topic = parse_topic(&path.into_inner())?;
    let posts: Vec<PostSummary> = state
        .posts
        .list_by_topic(topic)
        .await?
        .into_iter()
        .map(summary)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/most-active/{topic}
pub async fn most_active(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let topic = parse_topic(&path.into_inner())?;
    let activity = state.posts.most_active(topic).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(most_active_response(activity))))
}

/// POST /api/posts/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .posts
        .like(path.into_inner(), &identity.requester())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        LikeResponse {
            likes: outcome.count,
            time_left_seconds: outcome.time_left_seconds,
        },
        "Post liked successfully",
    )))
}

/// POST /api/posts/{id}/dislike
pub async fn dislike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .posts
        .dislike(path.into_inner(), &identity.requester())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        DislikeResponse {
            dislikes: outcome.count,
            time_left_seconds: outcome.time_left_seconds,
        },
        "Post disliked successfully",
    )))
}

/// POST /api/posts/{id}/comment
pub async fn comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .posts
        .comment(path.into_inner(), &identity.requester(), &body.comment)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        CommentResponse {
            comments: outcome.comments.into_iter().map(comment_dto).collect(),
            time_left_seconds: outcome.time_left_seconds,
        },
        "Comment added successfully",
    )))
}
