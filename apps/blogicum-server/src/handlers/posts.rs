//! Post detail page and the author's create/edit/delete flow.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use blogicum_core::domain::visibility::PostFilter;
use blogicum_core::domain::{NewPost, Post, PostSummary};
use blogicum_shared::dto::{CommentForm, PostDetailResponse, PostForm, PostFormResponse};

use super::forms::clean_post_form;
use super::{authorize, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::{Flash, IncomingFlash, see_other};
use crate::state::AppState;

async fn load_post(state: &AppState, post_id: i64) -> AppResult<Post> {
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))
}

async fn load_summary(state: &AppState, post_id: i64, filter: &PostFilter) -> AppResult<PostSummary> {
    state
        .posts
        .find_summary(post_id, filter)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))
}

/// GET /posts/{id}/
///
/// Hidden posts are shown to their author only.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    viewer: OptionalIdentity,
    flash: IncomingFlash,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let filter = PostFilter::published(Utc::now()).or_owned_by(viewer.user_id());
    let summary = load_summary(&state, post_id, &filter).await?;
    let comments = state.comments.list_for_post(post_id).await?;

    Ok(flash.respond(&PostDetailResponse {
        post: views::post(summary),
        comments: comments.into_iter().map(views::comment).collect(),
        form: CommentForm::default(),
        messages: flash.messages(),
    }))
}

/// GET /posts/new/
pub async fn new_form(_identity: Identity) -> HttpResponse {
    HttpResponse::Ok().json(PostFormResponse {
        form: views::blank_post_form(Utc::now()),
        post: None,
    })
}

/// POST /posts/new/
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let draft = clean_post_form(&state, &form).await?;

    let post = state
        .posts
        .create(NewPost::new(draft, identity.user_id))
        .await?;

    tracing::info!(post_id = post.id, user_id = identity.user_id, "Post created");
    Ok(see_other(&views::profile_url(&identity.username)))
}

/// GET /posts/{id}/edit/
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = load_post(&state, post_id).await?;
    authorize(&post, &identity, post_id, Flash::NotPostAuthor)?;

    let summary = load_summary(&state, post_id, &PostFilter::all()).await?;
    Ok(HttpResponse::Ok().json(PostFormResponse {
        form: views::post_form(&post),
        post: Some(views::post(summary)),
    }))
}

/// POST /posts/{id}/edit/
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let mut post = load_post(&state, post_id).await?;
    authorize(&post, &identity, post_id, Flash::NotPostAuthor)?;

    let draft = clean_post_form(&state, &form).await?;
    post.apply(draft);
    state.posts.update(post).await?;

    tracing::info!(post_id, user_id = identity.user_id, "Post updated");
    Ok(see_other(&views::post_url(post_id)))
}

/// GET /posts/{id}/delete/
pub async fn delete_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = load_post(&state, post_id).await?;
    authorize(&post, &identity, post_id, Flash::NotPostAuthor)?;

    let summary = load_summary(&state, post_id, &PostFilter::all()).await?;
    Ok(HttpResponse::Ok().json(PostFormResponse {
        form: views::post_form(&post),
        post: Some(views::post(summary)),
    }))
}

/// POST /posts/{id}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = load_post(&state, post_id).await?;
    authorize(&post, &identity, post_id, Flash::NotPostAuthor)?;

    state.posts.delete(post_id).await?;

    tracing::info!(post_id, user_id = identity.user_id, "Post deleted");
    Ok(see_other("/"))
}

pub(super) async fn visible_to(
    state: &AppState,
    post_id: i64,
    identity: &Identity,
) -> AppResult<PostSummary> {
    let filter = PostFilter::published(Utc::now()).or_owned_by(Some(identity.user_id));
    load_summary(state, post_id, &filter).await
}
