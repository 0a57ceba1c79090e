//! Domain entities - the core business objects.

mod category;
mod comment;
mod location;
mod post;
mod user;

pub mod forms;
pub mod ownership;
pub mod pagination;
pub mod visibility;

pub use category::{Category, NewCategory, is_valid_slug};
pub use comment::{Comment, CommentView, NewComment};
pub use location::{Location, NewLocation};
pub use post::{NewPost, Post, PostDraft, PostSummary, TITLE_MAX_LENGTH};
pub use user::{Author, NewUser, USERNAME_MAX_LENGTH, User};
