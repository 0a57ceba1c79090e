use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::Author;

/// Comment entity - always scoped to its parent post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Replace the text. The parent post is fixed at creation.
    pub fn edit(&mut self, text: String) {
        self.text = text;
    }

    pub fn belongs_to(&self, post_id: i64) -> bool {
        self.post_id == post_id
    }
}

/// Data needed to insert a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub author_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(text: String, author_id: i64, post_id: i64) -> Self {
        Self {
            text,
            author_id,
            post_id,
            created_at: Utc::now(),
        }
    }
}

/// A comment with its author, as shown under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub comment: Comment,
    pub author: Author,
}
