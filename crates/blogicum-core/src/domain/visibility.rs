//! Which posts a reader is allowed to see.
//!
//! A post is public when it is published, its category is published and its
//! publication date has passed. Listings compose a [`PostFilter`] from the
//! constructors below; repositories evaluate it either in memory through
//! [`PostFilter::matches`] or by translating it into SQL.

use chrono::{DateTime, Utc};

use super::category::Category;
use super::post::Post;

/// The visibility predicate shared by every public listing and the detail page.
pub fn is_publicly_visible(post: &Post, category: &Category, now: DateTime<Utc>) -> bool {
    post.is_published && category.is_published && post.pub_date <= now
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only publicly visible posts.
    Public { now: DateTime<Utc> },
    /// Publicly visible posts plus every post written by `owner_id`.
    PublicOrOwnedBy { now: DateTime<Utc>, owner_id: i64 },
    /// No restriction.
    Any,
}

/// Composable post query: a visibility rule narrowed by author and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostFilter {
    pub visibility: Visibility,
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl PostFilter {
    /// Posts the public may see at `now`.
    pub fn published(now: DateTime<Utc>) -> Self {
        Self {
            visibility: Visibility::Public { now },
            author_id: None,
            category_id: None,
        }
    }

    /// Every post regardless of publication state.
    pub fn all() -> Self {
        Self {
            visibility: Visibility::Any,
            author_id: None,
            category_id: None,
        }
    }

    /// A profile page: the owner sees all of their posts, anyone else only
    /// the public ones.
    pub fn profile(author_id: i64, viewer_id: Option<i64>, now: DateTime<Utc>) -> Self {
        let base = if viewer_id == Some(author_id) {
            Self::all()
        } else {
            Self::published(now)
        };
        base.by_author(author_id)
    }

    pub fn by_author(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Widen a public filter so that `owner_id` also sees their own hidden posts.
    pub fn or_owned_by(mut self, owner_id: Option<i64>) -> Self {
        if let (Visibility::Public { now }, Some(owner_id)) = (self.visibility, owner_id) {
            self.visibility = Visibility::PublicOrOwnedBy { now, owner_id };
        }
        self
    }

    pub fn matches(&self, post: &Post, category: &Category) -> bool {
        if self.author_id.is_some_and(|id| post.author_id != id) {
            return false;
        }
        if self.category_id.is_some_and(|id| post.category_id != id) {
            return false;
        }

        match self.visibility {
            Visibility::Public { now } => is_publicly_visible(post, category, now),
            Visibility::PublicOrOwnedBy { now, owner_id } => {
                post.author_id == owner_id || is_publicly_visible(post, category, now)
            }
            Visibility::Any => true,
        }
    }
}
