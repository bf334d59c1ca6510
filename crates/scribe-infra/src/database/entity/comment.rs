//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::{Post, PostFields};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub article_id: Uuid,
    pub registered_author_id: Option<Uuid>,
    pub unregistered_author_name: Option<String>,
    pub unregistered_author_email: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub publication_date: DateTimeWithTimeZone,
    pub published: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Article,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RegisteredAuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    RegisteredAuthor,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RegisteredAuthor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Comment.
impl From<Model> for scribe_core::domain::Comment {
    fn from(model: Model) -> Self {
        let mut comment = Self::with_id(
            model.id.into(),
            model.article_id.into(),
            model.registered_author_id.map(Into::into),
            PostFields {
                content: model.content,
                publication_date: model.publication_date.into(),
                published: model.published,
            },
        );
        comment.set_unregistered_author_name(model.unregistered_author_name);
        comment.set_unregistered_author_email(model.unregistered_author_email);
        comment
    }
}

/// Conversion from Domain Comment to SeaORM ActiveModel.
impl From<scribe_core::domain::Comment> for ActiveModel {
    fn from(comment: scribe_core::domain::Comment) -> Self {
        Self {
            id: Set(comment.id().into()),
            article_id: Set(comment.article().into()),
            registered_author_id: Set(comment.registered_author().map(Into::into)),
            unregistered_author_name: Set(comment.unregistered_author_name().map(str::to_string)),
            unregistered_author_email: Set(comment
                .unregistered_author_email()
                .map(str::to_string)),
            content: Set(comment.content().to_string()),
            publication_date: Set(comment.publication_date().into()),
            published: Set(comment.is_published()),
        }
    }
}
