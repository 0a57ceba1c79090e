//! Authentication handlers.

use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, http::header, web};

use blogicum_core::domain::forms::clean_registration;
use blogicum_core::domain::{NewUser, User};
use blogicum_core::ports::AuthError;
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::{AuthResponse, LoginForm, NextQuery, RegisterForm};

use super::views;
use crate::middleware::auth::{ACCESS_TOKEN_COOKIE, AuthenticationError, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn issue_token(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
        user: views::user(user),
    })
}

fn token_cookie(auth: &AuthResponse) -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE, auth.access_token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(auth.expires_in as i64))
        .finish()
}

/// Argon2 runs on the blocking thread pool, off the async workers.
async fn hash_password(state: &AppState, password: String) -> AppResult<String> {
    let passwords = Arc::clone(&state.passwords);
    web::block(move || passwords.hash(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn verify_password(state: &AppState, password: String, hash: String) -> AppResult<bool> {
    let passwords = Arc::clone(&state.passwords);
    web::block(move || passwords.verify(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Only same-site absolute paths are followed after login.
///
/// Backslashes are refused too: browsers read `/\host` as `//host`.
fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|path| {
        path.starts_with('/')
            && !path.starts_with("//")
            && !path.contains('\\')
            && !path.chars().any(|c| c.is_ascii_control())
    })
}

/// POST /auth/registration/
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let registration = clean_registration(&form.username, &form.email, &form.password)
        .map_err(|errors| {
            AppError::invalid_form(
                errors,
                &serde_json::json!({ "username": form.username, "email": form.email }),
            )
        })?;

    if state
        .users
        .find_by_username(&registration.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A user with that username already exists.".to_string(),
        ));
    }

    let password_hash = hash_password(&state, registration.password).await?;

    let user = state
        .users
        .create(NewUser::new(
            registration.username,
            registration.email,
            password_hash,
        ))
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let auth = issue_token(&state, &user)?;
    Ok(HttpResponse::Created().cookie(token_cookie(&auth)).json(auth))
}

/// POST /auth/login/?next=<path>
pub async fn login(
    state: web::Data<AppState>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = form.into_inner();
    let rejected = || AuthenticationError::Rejected(AuthError::InvalidCredentials);

    let user = state
        .users
        .find_by_username(form.username.trim())
        .await
        .map_err(AppError::from)?
        .ok_or_else(rejected)?;

    let valid = verify_password(&state, form.password, user.password_hash.clone()).await?;

    if !valid {
        tracing::warn!(username = %user.username, "Failed login attempt");
        return Err(rejected().into());
    }

    let auth = issue_token(&state, &user)?;
    let cookie = token_cookie(&auth);

    tracing::info!(user_id = user.id, "User logged in");

    match safe_next(query.next.as_deref()) {
        Some(next) => Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, next))
            .cookie(cookie)
            .finish()),
        None => Ok(HttpResponse::Ok().cookie(cookie).json(auth)),
    }
}

/// POST /auth/logout/
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(ACCESS_TOKEN_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}

/// GET /auth/me/ - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::user(&user))))
}
