//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use pulse_core::ports::AuthError;
use pulse_core::{DomainError, RepoError};
use pulse_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.problem())
    }
}

impl AppError {
    fn problem(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        }
    }

    /// Render with the request path as the problem `instance`.
    pub fn response_for(&self, req: &HttpRequest) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.problem().with_instance(req.path()))
    }
}

/// `PathConfig` error handler: a path segment that does not parse names no resource.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Unparseable path parameter");
    let response = AppError::NotFound(format!("No resource at {}", req.path())).response_for(req);
    InternalError::from_response(err, response).into()
}

/// `JsonConfig` error handler: malformed or mistyped request bodies.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
    let response = AppError::BadRequest(format!("Invalid JSON body: {err}")).response_for(req);
    InternalError::from_response(err, response).into()
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            e @ (DomainError::NotFound { .. }
            | DomainError::NoPostsForTopic(_)
            | DomainError::NoActivePosts(_)) => AppError::NotFound(e.to_string()),
            e @ (DomainError::OwnerReaction(_) | DomainError::PostExpired) => {
                AppError::Forbidden(e.to_string())
            }
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Store(e) => AppError::from(e),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashingError(msg) => AppError::Internal(msg),
            e => AppError::Unauthorized(e.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::domain::{Reaction, Topic};
    use uuid::Uuid;

    fn status_of(err: DomainError) -> StatusCode {
        AppError::from(err).status_code()
    }

    #[test]
    fn test_domain_errors_map_to_http_status() {
        assert_eq!(
            status_of(DomainError::Validation("title is required".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::NotFound {
                entity_type: "Post",
                id: Uuid::new_v4()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::NoActivePosts(Topic::Sport)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::OwnerReaction(Reaction::Like)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_of(DomainError::PostExpired), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(DomainError::Duplicate("Username already taken".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::Store(RepoError::Query("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_forbidden_keeps_domain_message() {
        match AppError::from(DomainError::OwnerReaction(Reaction::Dislike)) {
            AppError::Forbidden(msg) => {
                assert_eq!(msg, "Post owner cannot dislike their own post")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_credentials_is_unauthorized() {
        let err = AppError::from(AuthError::InvalidCredentials);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
