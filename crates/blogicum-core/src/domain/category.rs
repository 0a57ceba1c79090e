use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity - groups posts and can be hidden from the public as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            slug: slug.into(),
            is_published: true,
        }
    }

    pub fn unpublished(mut self) -> Self {
        self.is_published = false;
        self
    }
}

/// Slugs use latin letters, digits, hyphens and underscores only.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
