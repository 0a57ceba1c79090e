//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use blogicum_core::domain::pagination::{Page, PageRequest};
use blogicum_core::domain::visibility::{PostFilter, Visibility};
use blogicum_core::domain::{
    Author, Category, Comment, CommentView, Location, NewCategory, NewComment, NewLocation,
    NewPost, NewUser, Post, PostSummary, User,
};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

fn author_of(model: &user::Model) -> Author {
    Author {
        id: model.id,
        username: model.username.clone(),
    }
}

fn dangling(relation: &str, post_id: i64) -> RepoError {
    RepoError::Query(format!("post {post_id} references a missing {relation}"))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(new_user)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_category: NewCategory) -> Result<Category, RepoError> {
        let model = category::ActiveModel::from(new_category)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn create(&self, new_location: NewLocation) -> Result<Location, RepoError> {
        let model = location::ActiveModel::from(new_location)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }
}

fn public_condition(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(post::Column::IsPublished.eq(true))
        .add(category::Column::IsPublished.eq(true))
        .add(post::Column::PubDate.lte(now))
}

/// Translate a [`PostFilter`] into a query joined on `categories`.
fn filtered_posts(filter: &PostFilter) -> Select<PostEntity> {
    let mut query = PostEntity::find().inner_join(CategoryEntity);

    query = match filter.visibility {
        Visibility::Public { now } => query.filter(public_condition(now)),
        Visibility::PublicOrOwnedBy { now, owner_id } => query.filter(
            Condition::any()
                .add(post::Column::AuthorId.eq(owner_id))
                .add(public_condition(now)),
        ),
        Visibility::Any => query,
    };

    if let Some(author_id) = filter.author_id {
        query = query.filter(post::Column::AuthorId.eq(author_id));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(post::Column::CategoryId.eq(category_id));
    }

    query
}

impl PostgresPostRepository {
    /// Load authors, categories, locations and comment counts for a batch of
    /// posts with one query per relation.
    async fn summarize(&self, posts: Vec<post::Model>) -> Result<Vec<PostSummary>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let author_ids: Vec<i64> = posts.iter().map(|p| p.author_id).collect();
        let category_ids: Vec<i64> = posts.iter().map(|p| p.category_id).collect();
        let location_ids: Vec<i64> = posts.iter().filter_map(|p| p.location_id).collect();

        let authors: HashMap<i64, user::Model> = UserEntity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let categories: HashMap<i64, category::Model> = CategoryEntity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let locations: HashMap<i64, location::Model> = if location_ids.is_empty() {
            HashMap::new()
        } else {
            LocationEntity::find()
                .filter(location::Column::Id.is_in(location_ids))
                .all(&self.db)
                .await
                .map_err(map_db_err)?
                .into_iter()
                .map(|m| (m.id, m))
                .collect()
        };

        let comment_counts: HashMap<i64, i64> = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(Expr::col(comment::Column::Id).count(), "comment_count")
            .filter(comment::Column::PostId.is_in(post_ids))
            .group_by(comment::Column::PostId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .collect();

        posts
            .into_iter()
            .map(|model| {
                let author = authors
                    .get(&model.author_id)
                    .map(author_of)
                    .ok_or_else(|| dangling("author", model.id))?;
                let category = categories
                    .get(&model.category_id)
                    .cloned()
                    .ok_or_else(|| dangling("category", model.id))?;
                let location = model
                    .location_id
                    .and_then(|id| locations.get(&id))
                    .cloned()
                    .map(Into::into);
                let comment_count = comment_counts
                    .get(&model.id)
                    .map_or(0, |count| u64::try_from(*count).unwrap_or(0));

                Ok(PostSummary {
                    post: model.into(),
                    author,
                    category: category.into(),
                    location,
                    comment_count,
                })
            })
            .collect()
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, author_id = model.author_id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .update(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn list(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, RepoError> {
        let query = filtered_posts(filter);

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;
        let window = page.resolve(total).map_err(|_| RepoError::NotFound)?;

        let models = query
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::Id)
            .offset(window.offset())
            .limit(window.size)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let items = self.summarize(models).await?;
        Ok(window.into_page(items))
    }

    async fn find_summary(
        &self,
        id: i64,
        filter: &PostFilter,
    ) -> Result<Option<PostSummary>, RepoError> {
        let model = filtered_posts(filter)
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        let Some(model) = model else {
            return Ok(None);
        };

        Ok(self.summarize(vec![model]).await?.pop())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(new_comment)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(comment)
            .update(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<CommentView>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .map(|(comment, author)| {
                let author = author.as_ref().map(author_of).ok_or_else(|| {
                    RepoError::Query(format!("comment {} references a missing author", comment.id))
                })?;

                Ok(CommentView {
                    comment: comment.into(),
                    author,
                })
            })
            .collect()
    }
}
