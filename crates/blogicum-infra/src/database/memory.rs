//! In-memory blog store - used when no database is configured, and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blogicum_core::domain::pagination::{Page, PageRequest};
use blogicum_core::domain::visibility::PostFilter;
use blogicum_core::domain::{
    Category, Comment, CommentView, Location, NewCategory, NewComment, NewLocation, NewPost,
    NewUser, Post, PostSummary, User, is_valid_slug,
};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserRepository,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    locations: BTreeMap<i64, Location>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn summarize(&self, post: &Post) -> Result<PostSummary, RepoError> {
        let author = self
            .users
            .get(&post.author_id)
            .map(User::author)
            .ok_or_else(|| RepoError::Query(format!("post {} has no author", post.id)))?;
        let category = self
            .categories
            .get(&post.category_id)
            .cloned()
            .ok_or_else(|| RepoError::Query(format!("post {} has no category", post.id)))?;
        let location = post
            .location_id
            .and_then(|id| self.locations.get(&id))
            .cloned();
        let comment_count = self
            .comments
            .values()
            .filter(|c| c.post_id == post.id)
            .count() as u64;

        Ok(PostSummary {
            post: post.clone(),
            author,
            category,
            location,
            comment_count,
        })
    }

    fn matching_posts(&self, filter: &PostFilter) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .posts
            .values()
            .filter(|post| {
                self.categories
                    .get(&post.category_id)
                    .is_some_and(|category| filter.matches(post, category))
            })
            .collect();

        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        posts
    }

    fn check_post_references(&self, author_id: i64, post: &Post) -> Result<(), RepoError> {
        if !self.users.contains_key(&author_id) {
            return Err(RepoError::Constraint(format!("user {author_id} does not exist")));
        }
        if !self.categories.contains_key(&post.category_id) {
            return Err(RepoError::Constraint(format!(
                "category {} does not exist",
                post.category_id
            )));
        }
        if let Some(location_id) = post.location_id {
            if !self.locations.contains_key(&location_id) {
                return Err(RepoError::Constraint(format!(
                    "location {location_id} does not exist"
                )));
            }
        }
        Ok(())
    }

    fn remove_post(&mut self, post_id: i64) -> Option<Post> {
        let post = self.posts.remove(&post_id)?;
        self.comments.retain(|_, c| c.post_id != post_id);
        Some(post)
    }
}

/// In-memory implementation of every repository port.
///
/// Enforces the same keys and cascades as the relational schema.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryBlog {
    tables: RwLock<Tables>,
}

impl InMemoryBlog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User> for InMemoryBlog {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;

        let owned: Vec<i64> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            tables.remove_post(post_id);
        }
        tables.comments.retain(|_, c| c.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryBlog {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == new_user.username) {
            return Err(RepoError::Constraint(format!(
                "username {} already exists",
                new_user.username
            )));
        }

        let user = User {
            id: tables.next_id(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: new_user.created_at,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl BaseRepository<Category> for InMemoryBlog {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.values().any(|p| p.category_id == id) {
            return Err(RepoError::Constraint(format!("category {id} still has posts")));
        }
        tables
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryBlog {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn create(&self, new_category: NewCategory) -> Result<Category, RepoError> {
        if !is_valid_slug(&new_category.slug) {
            return Err(RepoError::Constraint(format!(
                "invalid slug {}",
                new_category.slug
            )));
        }

        let mut tables = self.tables.write().await;
        if tables
            .categories
            .values()
            .any(|c| c.slug == new_category.slug)
        {
            return Err(RepoError::Constraint(format!(
                "slug {} already exists",
                new_category.slug
            )));
        }

        let category = Category {
            id: tables.next_id(),
            name: new_category.name,
            description: new_category.description,
            slug: new_category.slug,
            is_published: new_category.is_published,
            created_at: chrono::Utc::now(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }
}

#[async_trait]
impl BaseRepository<Location> for InMemoryBlog {
    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, RepoError> {
        Ok(self.tables.read().await.locations.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.locations.remove(&id).ok_or(RepoError::NotFound)?;
        for post in tables.posts.values_mut() {
            if post.location_id == Some(id) {
                post.location_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for InMemoryBlog {
    async fn create(&self, new_location: NewLocation) -> Result<Location, RepoError> {
        let mut tables = self.tables.write().await;
        let location = Location {
            id: tables.next_id(),
            name: new_location.name,
            is_published: new_location.is_published,
            created_at: chrono::Utc::now(),
        };
        tables.locations.insert(location.id, location.clone());
        Ok(location)
    }
}

#[async_trait]
impl BaseRepository<Post> for InMemoryBlog {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .remove_post(id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryBlog {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let draft = new_post.draft;
        let post = Post {
            id: 0,
            title: draft.title,
            text: draft.text,
            image: draft.image,
            pub_date: draft.pub_date,
            is_published: draft.is_published,
            author_id: new_post.author_id,
            category_id: draft.category_id,
            location_id: draft.location_id,
            created_at: new_post.created_at,
        };
        tables.check_post_references(post.author_id, &post)?;

        let post = Post {
            id: tables.next_id(),
            ..post
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let stored = tables.posts.get(&post.id).ok_or(RepoError::NotFound)?;
        let author_id = stored.author_id;
        let created_at = stored.created_at;
        tables.check_post_references(author_id, &post)?;

        let post = Post {
            author_id,
            created_at,
            ..post
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, RepoError> {
        let tables = self.tables.read().await;
        let posts = tables.matching_posts(filter);

        let window = page
            .resolve(posts.len() as u64)
            .map_err(|_| RepoError::NotFound)?;

        let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(window.size).unwrap_or(usize::MAX);
        let items = posts
            .into_iter()
            .skip(offset)
            .take(size)
            .map(|post| tables.summarize(post))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(window.into_page(items))
    }

    async fn find_summary(
        &self,
        id: i64,
        filter: &PostFilter,
    ) -> Result<Option<PostSummary>, RepoError> {
        let tables = self.tables.read().await;
        let Some(post) = tables.posts.get(&id) else {
            return Ok(None);
        };
        let visible = tables
            .categories
            .get(&post.category_id)
            .is_some_and(|category| filter.matches(post, category));

        if visible {
            tables.summarize(post).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl BaseRepository<Comment> for InMemoryBlog {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlog {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&new_comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                new_comment.post_id
            )));
        }
        if !tables.users.contains_key(&new_comment.author_id) {
            return Err(RepoError::Constraint(format!(
                "user {} does not exist",
                new_comment.author_id
            )));
        }

        let comment = Comment {
            id: tables.next_id(),
            text: new_comment.text,
            author_id: new_comment.author_id,
            post_id: new_comment.post_id,
            created_at: new_comment.created_at,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .comments
            .get_mut(&comment.id)
            .ok_or(RepoError::NotFound)?;
        stored.edit(comment.text);
        Ok(stored.clone())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentView>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<&Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        comments
            .into_iter()
            .map(|comment| {
                let author = tables
                    .users
                    .get(&comment.author_id)
                    .map(User::author)
                    .ok_or_else(|| {
                        RepoError::Query(format!("comment {} has no author", comment.id))
                    })?;
                Ok(CommentView {
                    comment: comment.clone(),
                    author,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogicum_core::domain::PostDraft;
    use chrono::{TimeDelta, Utc};

    async fn user(store: &InMemoryBlog, username: &str) -> User {
        UserRepository::create(
            store,
            NewUser::new(username.to_string(), None, "hash".to_string()),
        )
        .await
        .unwrap()
    }

    fn draft(category_id: i64, is_published: bool, offset: TimeDelta) -> PostDraft {
        PostDraft {
            title: "Title".to_string(),
            text: "Text".to_string(),
            image: None,
            pub_date: Utc::now() + offset,
            is_published,
            category_id,
            location_id: None,
        }
    }

    #[tokio::test]
    async fn test_list_applies_visibility_and_ordering() {
        let store = InMemoryBlog::new();
        let alice = user(&store, "alice").await;
        let open = CategoryRepository::create(&store, NewCategory::new("Open", "open"))
            .await
            .unwrap();
        let hidden = CategoryRepository::create(
            &store,
            NewCategory::new("Hidden", "hidden").unpublished(),
        )
        .await
        .unwrap();

        let older = PostRepository::create(
            &store,
            NewPost::new(draft(open.id, true, -TimeDelta::days(2)), alice.id),
        )
        .await
        .unwrap();
        let newer = PostRepository::create(
            &store,
            NewPost::new(draft(open.id, true, -TimeDelta::days(1)), alice.id),
        )
        .await
        .unwrap();
        for post in [
            draft(open.id, false, -TimeDelta::days(1)),
            draft(open.id, true, TimeDelta::days(1)),
            draft(hidden.id, true, -TimeDelta::days(1)),
        ] {
            PostRepository::create(&store, NewPost::new(post, alice.id))
                .await
                .unwrap();
        }

        let page = store
            .list(&PostFilter::published(Utc::now()), PageRequest::first())
            .await
            .unwrap();
        let ids: Vec<i64> = page.items.iter().map(|s| s.post.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);

        let all = store
            .list(&PostFilter::all().by_author(alice.id), PageRequest::first())
            .await
            .unwrap();
        assert_eq!(all.total_items, 5);
    }

    #[tokio::test]
    async fn test_list_paginates_by_ten() {
        let store = InMemoryBlog::new();
        let alice = user(&store, "alice").await;
        let category = CategoryRepository::create(&store, NewCategory::new("C", "c"))
            .await
            .unwrap();
        for i in 0..23 {
            PostRepository::create(
                &store,
                NewPost::new(draft(category.id, true, -TimeDelta::minutes(i + 1)), alice.id),
            )
            .await
            .unwrap();
        }

        let filter = PostFilter::published(Utc::now());
        let first = store.list(&filter, PageRequest::first()).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 3);

        let last = store.list(&filter, PageRequest::number(3)).await.unwrap();
        assert_eq!(last.items.len(), 3);

        assert!(matches!(
            store.list(&filter, PageRequest::number(4)).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_deleting_post_removes_its_comments() {
        let store = InMemoryBlog::new();
        let alice = user(&store, "alice").await;
        let category = CategoryRepository::create(&store, NewCategory::new("C", "c"))
            .await
            .unwrap();
        let post = PostRepository::create(
            &store,
            NewPost::new(draft(category.id, true, -TimeDelta::hours(1)), alice.id),
        )
        .await
        .unwrap();
        let comment = CommentRepository::create(
            &store,
            NewComment::new("First!".to_string(), alice.id, post.id),
        )
        .await
        .unwrap();

        BaseRepository::<Post>::delete(&store, post.id).await.unwrap();

        assert!(
            BaseRepository::<Comment>::find_by_id(&store, comment.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_comment_update_keeps_post() {
        let store = InMemoryBlog::new();
        let alice = user(&store, "alice").await;
        let category = CategoryRepository::create(&store, NewCategory::new("C", "c"))
            .await
            .unwrap();
        let post = PostRepository::create(
            &store,
            NewPost::new(draft(category.id, true, -TimeDelta::hours(1)), alice.id),
        )
        .await
        .unwrap();
        let mut comment = CommentRepository::create(
            &store,
            NewComment::new("Before".to_string(), alice.id, post.id),
        )
        .await
        .unwrap();

        comment.text = "After".to_string();
        comment.post_id = 999;
        let updated = CommentRepository::update(&store, comment).await.unwrap();

        assert_eq!(updated.text, "After");
        assert_eq!(updated.post_id, post.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_constraint_error() {
        let store = InMemoryBlog::new();
        user(&store, "alice").await;

        let result = UserRepository::create(
            &store,
            NewUser::new("alice".to_string(), None, "hash".to_string()),
        )
        .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
