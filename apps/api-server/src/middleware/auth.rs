//! Bearer token extractor.

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use pulse_core::domain::Requester;
use pulse_core::ports::{AuthError, TokenClaims, TokenService};
use pulse_shared::ErrorResponse;

/// Authenticated caller, decoded from the `Authorization: Bearer` header.
///
/// Taking it as a handler argument makes the route require a valid token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

impl Identity {
    pub fn requester(&self) -> Requester {
        Requester::new(self.user_id, self.username.clone())
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized("Invalid credentials"),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
            tracing::error!("TokenService not found in app data");
            return ready(Err(AuthenticationError(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ))));
        };

        let result = bearer_token(req)
            .and_then(|token| token_service.validate_token(token))
            .map(Identity::from)
            .map_err(AuthenticationError);

        if let Err(e) = &result {
            tracing::debug!(error = %e, path = %req.path(), "Rejected request");
        }

        ready(result)
    }
}
