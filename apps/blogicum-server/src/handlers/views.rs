//! Domain → wire conversions shared by the handlers.

use blogicum_core::domain::pagination::Page;
use blogicum_core::domain::{
    Author, Category, Comment, CommentView, Location, Post, PostSummary, User,
};
use blogicum_shared::dto::{
    AuthorResponse, CategoryResponse, CommentResponse, LocationResponse, PageResponse, PostForm,
    PostResponse, UserResponse,
};
use chrono::{DateTime, Utc};

/// `datetime-local` rendering used to prefill `pub_date`.
const FORM_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

pub fn post_url(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

pub fn profile_url(username: &str) -> String {
    format!("/profile/{username}/")
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub fn author(author: Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        username: author.username,
    }
}

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        created_at: timestamp(user.created_at),
    }
}

fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.name,
        description: category.description,
        slug: category.slug,
    }
}

fn location(location: Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name,
    }
}

pub fn category_response(value: &Category) -> CategoryResponse {
    category(value.clone())
}

pub fn post(summary: PostSummary) -> PostResponse {
    let PostSummary {
        post,
        author: post_author,
        category: post_category,
        location: post_location,
        comment_count,
    } = summary;

    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        image: post.image,
        pub_date: timestamp(post.pub_date),
        is_published: post.is_published,
        author: author(post_author),
        category: category(post_category),
        location: post_location.map(location),
        comment_count,
    }
}

pub fn comment(view: CommentView) -> CommentResponse {
    comment_by(view.comment, view.author)
}

pub fn comment_by(comment: Comment, comment_author: Author) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        text: comment.text,
        created_at: timestamp(comment.created_at),
        author: author(comment_author),
    }
}

pub fn page<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageResponse<U> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let page = page.map(f);

    PageResponse {
        items: page.items,
        number: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
        has_next,
        has_previous,
    }
}

/// A blank post form; `pub_date` starts now.
pub fn blank_post_form(now: DateTime<Utc>) -> PostForm {
    PostForm {
        pub_date: now.format(FORM_DATETIME).to_string(),
        ..PostForm::default()
    }
}

/// A post form prefilled from a stored post.
pub fn post_form(post: &Post) -> PostForm {
    PostForm {
        title: post.title.clone(),
        text: post.text.clone(),
        image: post.image.clone().unwrap_or_default(),
        pub_date: post.pub_date.format(FORM_DATETIME).to_string(),
        location: post
            .location_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        category: post.category_id.to_string(),
        is_published: if post.is_published { "on" } else { "" }.to_string(),
    }
}
