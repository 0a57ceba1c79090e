//! The single authorization rule of the blog: only authors change their content.

use thiserror::Error;

use super::comment::Comment;
use super::post::Post;

/// A user tried to change a record written by someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user {requester_id} is not the author (author is {owner_id})")]
pub struct NotAuthor {
    pub owner_id: i64,
    pub requester_id: i64,
}

pub fn ensure_author(owner_id: i64, requester_id: i64) -> Result<(), NotAuthor> {
    if owner_id == requester_id {
        Ok(())
    } else {
        Err(NotAuthor {
            owner_id,
            requester_id,
        })
    }
}

/// Records that carry an author.
pub trait Owned {
    fn author_id(&self) -> i64;

    fn authorize(&self, requester_id: i64) -> Result<(), NotAuthor> {
        ensure_author(self.author_id(), requester_id)
    }
}

impl Owned for Post {
    fn author_id(&self) -> i64 {
        self.author_id
    }
}

impl Owned for Comment {
    fn author_id(&self) -> i64 {
        self.author_id
    }
}
