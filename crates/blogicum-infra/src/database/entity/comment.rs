//! Comment entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub author_id: i64,
    pub post_id: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for blogicum_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            author_id: model.author_id,
            post_id: model.post_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<blogicum_core::domain::NewComment> for ActiveModel {
    fn from(comment: blogicum_core::domain::NewComment) -> Self {
        Self {
            id: NotSet,
            text: Set(comment.text),
            author_id: Set(comment.author_id),
            post_id: Set(comment.post_id),
            created_at: Set(comment.created_at.into()),
        }
    }
}

/// Only the text of a stored comment is ever written back.
impl From<blogicum_core::domain::Comment> for ActiveModel {
    fn from(comment: blogicum_core::domain::Comment) -> Self {
        Self {
            id: Unchanged(comment.id),
            text: Set(comment.text),
            author_id: NotSet,
            post_id: NotSet,
            created_at: NotSet,
        }
    }
}
