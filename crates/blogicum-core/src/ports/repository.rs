use async_trait::async_trait;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::visibility::PostFilter;
use crate::domain::{
    Category, Comment, CommentView, Location, NewCategory, NewComment, NewLocation, NewPost,
    NewUser, Post, PostSummary, User,
};
use crate::error::RepoError;

/// Lookup and removal shared by every repository.
#[async_trait]
pub trait BaseRepository<T>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user. A taken username is a [`RepoError::Constraint`].
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    async fn create(&self, category: NewCategory) -> Result<Category, RepoError>;
}

/// Location repository.
#[async_trait]
pub trait LocationRepository: BaseRepository<Location> {
    async fn create(&self, location: NewLocation) -> Result<Location, RepoError>;
}

/// Post repository. Deleting a post removes its comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post> {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// One page of posts matching `filter`, newest publication date first.
    async fn list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, RepoError>;

    /// A single post, only if it matches `filter`.
    async fn find_summary(
        &self,
        id: i64,
        filter: &PostFilter,
    ) -> Result<Option<PostSummary>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment> {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// Persist a new text. The parent post is never rewritten.
    async fn update(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Comments under a post, oldest first.
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentView>, RepoError>;
}
