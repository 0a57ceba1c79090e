//! Paginated post listings: index, category and profile pages.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use blogicum_core::domain::pagination::PageRequest;
use blogicum_core::domain::visibility::PostFilter;
use blogicum_shared::dto::{FeedResponse, PageQuery, ProfileResponse};

use super::views;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::IncomingFlash;
use crate::state::AppState;

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let page = PageRequest::parse(query.page.as_deref())?;

    let posts = state
        .posts
        .list(&PostFilter::published(Utc::now()), page)
        .await?;

    Ok(flash.respond(&FeedResponse {
        category: None,
        page: views::page(posts, views::post),
        messages: flash.messages(),
    }))
}

/// GET /category/{slug}/
///
/// The category itself must exist and be published, whether or not it has
/// any visible posts.
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let category = state
        .categories
        .find_by_slug(&slug)
        .await?
        .filter(|category| category.is_published)
        .ok_or_else(|| AppError::NotFound(format!("category {} not found", slug)))?;

    let page = PageRequest::parse(query.page.as_deref())?;
    let filter = PostFilter::published(Utc::now()).in_category(category.id);
    let posts = state.posts.list(&filter, page).await?;

    tracing::debug!(%slug, total = posts.total_items, "Category listing");

    Ok(flash.respond(&FeedResponse {
        category: Some(views::category_response(&category)),
        page: views::page(posts, views::post),
        messages: flash.messages(),
    }))
}

/// GET /profile/{username}/
///
/// The owner sees every post they wrote; other readers only the public ones.
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    viewer: OptionalIdentity,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", username)))?;

    let page = PageRequest::parse(query.page.as_deref())?;
    let filter = PostFilter::profile(user.id, viewer.user_id(), Utc::now());
    let posts = state.posts.list(&filter, page).await?;

    let mut profile = views::user(&user);
    if viewer.user_id() != Some(user.id) {
        profile.email = None;
    }

    Ok(flash.respond(&ProfileResponse {
        profile,
        page: views::page(posts, views::post),
        messages: flash.messages(),
    }))
}
