//! Authentication extractors.
//!
//! The access token is read from `Authorization: Bearer <jwt>` or, for
//! browser clients, from the `access_token` cookie set at login.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use blogicum_core::domain::Author;
use blogicum_core::ports::{AuthError, TokenClaims};

use crate::middleware::flash::see_other;
use crate::state::AppState;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

pub const LOGIN_PATH: &str = "/auth/login/";

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

impl Identity {
    pub fn author(&self) -> Author {
        Author {
            id: self.user_id,
            username: self.username.clone(),
        }
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
pub enum AuthenticationError {
    /// No credentials at all: send the visitor to the login page.
    LoginRequired { next: String },
    /// Credentials were presented but rejected.
    Rejected(AuthError),
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthenticationError::LoginRequired { next } => write!(f, "Login required for {next}"),
            AuthenticationError::Rejected(err) => write!(f, "{err}"),
        }
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AuthenticationError::LoginRequired { .. } => actix_web::http::StatusCode::SEE_OTHER,
            AuthenticationError::Rejected(AuthError::HashingError(_)) => {
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
            }
            AuthenticationError::Rejected(_) => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use blogicum_shared::ErrorResponse;

        let err = match self {
            AuthenticationError::LoginRequired { next } => {
                return see_other(&format!("{LOGIN_PATH}?next={next}"));
            }
            AuthenticationError::Rejected(err) => err,
        };

        let error = match err {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::InvalidCredentials => ErrorResponse::unauthorized()
                .with_detail("Please enter a correct username and password."),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

/// The raw token of a request, if it carries one.
fn extract_token(req: &HttpRequest) -> Result<Option<String>, AuthError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let auth_str = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

        // Parse "Bearer <token>"
        return auth_str
            .strip_prefix("Bearer ")
            .map(|token| Some(token.to_string()))
            .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()));
    }

    Ok(req
        .cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty()))
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthenticationError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Err(AuthenticationError::Rejected(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        )));
    };

    let token = extract_token(req)
        .map_err(AuthenticationError::Rejected)?
        .ok_or_else(|| AuthenticationError::LoginRequired {
            next: req.uri().path().to_string(),
        })?;

    state
        .tokens
        .validate_token(&token)
        .map(Identity::from)
        .map_err(AuthenticationError::Rejected)
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|identity| identity.user_id)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(authenticate(req).ok())))
    }
}
