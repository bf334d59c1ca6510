//! Article entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::{Post, PostFields};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub publication_date: DateTimeWithTimeZone,
    pub published: bool,
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
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::article_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::article_tag::Relation::Article.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Article.
impl From<Model> for scribe_core::domain::Article {
    fn from(model: Model) -> Self {
        Self::with_id(
            model.id.into(),
            model.author_id.into(),
            model.title,
            model.slug,
            PostFields {
                content: model.content,
                publication_date: model.publication_date.into(),
                published: model.published,
            },
        )
    }
}

/// Conversion from Domain Article to SeaORM ActiveModel.
impl From<scribe_core::domain::Article> for ActiveModel {
    fn from(article: scribe_core::domain::Article) -> Self {
        Self {
            id: Set(article.id().into()),
            author_id: Set(article.author().into()),
            title: Set(article.title().to_string()),
            slug: Set(article.slug().to_string()),
            content: Set(article.content().to_string()),
            publication_date: Set(article.publication_date().into()),
            published: Set(article.is_published()),
        }
    }
}
