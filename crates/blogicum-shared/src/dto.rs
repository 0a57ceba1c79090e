//! Data Transfer Objects - form payloads and response bodies for the API.
//!
//! Forms mirror what an HTML form posts: every field is text and missing
//! fields deserialize to empty strings.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Create/edit post form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub text: String,
    pub image: String,
    pub pub_date: String,
    pub location: String,
    pub category: String,
    pub is_published: String,
}

/// Comment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub text: String,
}

/// Request to register a new user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Query string of paginated listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Query string carrying the post-login destination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: String,
}

/// Authentication token issued on registration and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub id: i64,
    pub name: String,
}

/// A post as listings and the detail page show it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: String,
    pub is_published: bool,
    pub author: AuthorResponse,
    pub category: CategoryResponse,
    pub location: Option<LocationResponse>,
    pub comment_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    pub created_at: String,
    pub author: AuthorResponse,
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// `GET /` and `GET /category/{slug}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    pub page: PageResponse<PostResponse>,
    pub messages: Vec<String>,
}

/// `GET /profile/{username}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserResponse,
    pub page: PageResponse<PostResponse>,
    pub messages: Vec<String>,
}

/// `GET /posts/{id}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
    pub form: CommentForm,
    pub messages: Vec<String>,
}

/// A post form ready to be filled in; `post` is set when editing or deleting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormResponse {
    pub form: PostForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostResponse>,
}

/// A comment form for editing, or the comment about to be deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentFormResponse {
    pub form: CommentForm,
    pub comment: CommentResponse,
}
