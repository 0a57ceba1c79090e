//! Cleaning of submitted post forms against stored categories and locations.

use blogicum_core::domain::PostDraft;
use blogicum_core::domain::forms::{INVALID_CHOICE, PostFields, clean_post};

use blogicum_shared::dto::PostForm;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn fields(form: &PostForm) -> PostFields<'_> {
    PostFields {
        title: &form.title,
        text: &form.text,
        image: &form.image,
        pub_date: &form.pub_date,
        category: &form.category,
        location: &form.location,
        is_published: &form.is_published,
    }
}

/// Validate `form`; the chosen category and location must exist.
pub async fn clean_post_form(state: &AppState, form: &PostForm) -> AppResult<PostDraft> {
    let draft = clean_post(fields(form)).map_err(|errors| AppError::invalid_form(errors, form))?;

    let mut errors = blogicum_core::FieldErrors::new();
    if state.categories.find_by_id(draft.category_id).await?.is_none() {
        errors.add("category", INVALID_CHOICE);
    }
    if let Some(location_id) = draft.location_id {
        if state.locations.find_by_id(location_id).await?.is_none() {
            errors.add("location", INVALID_CHOICE);
        }
    }

    errors
        .into_result(draft)
        .map_err(|errors| AppError::invalid_form(errors, form))
}
