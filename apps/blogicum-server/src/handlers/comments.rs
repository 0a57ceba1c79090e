//! Comment creation and the author's edit/delete flow.

use actix_web::{HttpResponse, web};

use blogicum_core::domain::forms::clean_comment;
use blogicum_core::domain::{Comment, NewComment};
use blogicum_shared::dto::{CommentForm, CommentFormResponse};

use super::posts::visible_to;
use super::{authorize, views};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::{Flash, see_other};
use crate::state::AppState;

/// A comment addressed through its post; a mismatched pair is not found.
async fn load_comment(state: &AppState, post_id: i64, comment_id: i64) -> AppResult<Comment> {
    state
        .comments
        .find_by_id(comment_id)
        .await?
        .filter(|comment| comment.belongs_to(post_id))
        .ok_or_else(|| {
            AppError::NotFound(format!("comment {} of post {} not found", comment_id, post_id))
        })
}

/// POST /posts/{id}/comment/
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    visible_to(&state, post_id, &identity).await?;

    let text = clean_comment(&form.text).map_err(|errors| AppError::invalid_form(errors, &*form))?;
    let comment = state
        .comments
        .create(NewComment::new(text, identity.user_id, post_id))
        .await?;

    tracing::info!(comment_id = comment.id, post_id, user_id = identity.user_id, "Comment added");
    Ok(see_other(&views::post_url(post_id)))
}

/// GET /posts/{id}/comment/{comment_id}/edit/
/// GET /posts/{id}/comment/{comment_id}/delete/
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = load_comment(&state, post_id, comment_id).await?;
    authorize(&comment, &identity, post_id, Flash::NotCommentAuthor)?;

    let form = CommentForm {
        text: comment.text.clone(),
    };
    Ok(HttpResponse::Ok().json(CommentFormResponse {
        form,
        comment: views::comment_by(comment, identity.author()),
    }))
}

/// POST /posts/{id}/comment/{comment_id}/edit/
///
/// Only the text changes; the comment stays on its post.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let mut comment = load_comment(&state, post_id, comment_id).await?;
    authorize(&comment, &identity, post_id, Flash::NotCommentAuthor)?;

    let text = clean_comment(&form.text).map_err(|errors| AppError::invalid_form(errors, &*form))?;
    comment.edit(text);
    state.comments.update(comment).await?;

    tracing::info!(comment_id, post_id, user_id = identity.user_id, "Comment updated");
    Ok(see_other(&views::post_url(post_id)))
}

/// POST /posts/{id}/comment/{comment_id}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = load_comment(&state, post_id, comment_id).await?;
    authorize(&comment, &identity, post_id, Flash::NotCommentAuthor)?;

    state.comments.delete(comment_id).await?;

    tracing::info!(comment_id, post_id, user_id = identity.user_id, "Comment deleted");
    Ok(see_other(&views::post_url(post_id)))
}
