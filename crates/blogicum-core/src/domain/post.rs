use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::location::Location;
use super::user::Author;

pub const TITLE_MAX_LENGTH: usize = 256;

/// Post entity - a blog entry owned by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub author_id: i64,
    pub category_id: i64,
    pub location_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Apply edited fields. The author and creation time never change.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.text = draft.text;
        self.image = draft.image;
        self.pub_date = draft.pub_date;
        self.is_published = draft.is_published;
        self.category_id = draft.category_id;
        self.location_id = draft.location_id;
    }
}

/// Validated post fields as submitted through the post form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub category_id: i64,
    pub location_id: Option<i64>,
}

/// Data needed to insert a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub draft: PostDraft,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(draft: PostDraft, author_id: i64) -> Self {
        Self {
            draft,
            author_id,
            created_at: Utc::now(),
        }
    }
}

/// A post joined with everything a listing or detail page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub post: Post,
    pub author: Author,
    pub category: Category,
    pub location: Option<Location>,
    pub comment_count: u64,
}
